//! Identity types for live objects, object kinds and fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle identifying a live object instance.
///
/// Stable for one edit/simulate cycle only. Not stable across process
/// restarts or across destroying and recreating an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub i64);

impl ObjectId {
    /// Create a new object ID
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object:{}", self.0)
    }
}

/// Name of an object's structural kind (e.g. `"Transform"`, `"PhysBone"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKind(pub String);

impl ObjectKind {
    pub const TRANSFORM: &'static str = "Transform";
    pub const MESH_FILTER: &'static str = "MeshFilter";
    pub const MESH_RENDERER: &'static str = "MeshRenderer";
    pub const SKINNED_MESH_RENDERER: &'static str = "SkinnedMeshRenderer";
    pub const AVATAR_DESCRIPTOR: &'static str = "AvatarDescriptor";

    /// Create a new kind name
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Get the kind as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ObjectKind {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ObjectKind {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Path of one leaf field inside an object, e.g. `"m_Radius"` or
/// `"settings.pull"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(pub String);

impl FieldPath {
    /// Create a new field path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for FieldPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id() {
        let id = ObjectId::new(-1204);
        assert_eq!(id.raw(), -1204);
        assert_eq!(format!("{}", id), "object:-1204");
    }

    #[test]
    fn test_object_kind() {
        let kind = ObjectKind::new("Transform");
        assert_eq!(kind.as_str(), ObjectKind::TRANSFORM);
        assert_ne!(ObjectKind::from("PhysBone"), kind);
        assert_eq!(format!("{}", kind), "Transform");
    }

    #[test]
    fn test_field_path_lookup_by_str() {
        let mut map = indexmap::IndexMap::new();
        map.insert(FieldPath::new("pull"), 1);
        assert_eq!(map.get("pull"), Some(&1));
    }
}
