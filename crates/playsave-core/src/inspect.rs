//! Inspection capability the host exposes for each live object
//!
//! This is the seam between the engine and the host environment. The host
//! implements [`ObjectGraph`] to enumerate instances and [`Inspectable`] to
//! describe, read and batch-write one instance's fields.

use crate::{FieldKind, FieldPath, FieldValue, ObjectId, ObjectKind, WriteSet};
use serde::{Deserialize, Serialize};

/// Where an instance comes from with respect to reusable templates
///
/// Instances that belong to a template asset, or that are instances of one,
/// are read-only for the engine: edits to them would not persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemplateOrigin {
    /// A plain scene object
    #[default]
    None,
    /// Part of a template asset on disk
    Asset,
    /// Part of an instance of a template placed in the scene
    Instance,
}

impl TemplateOrigin {
    pub fn is_template(&self) -> bool {
        !matches!(self, TemplateOrigin::None)
    }
}

/// One entry of an object's field listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub path: FieldPath,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(path: impl Into<FieldPath>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Field-level access to one live object.
///
/// `fields` must return descriptors in the same order on every call for an
/// unchanged object structure.
pub trait Inspectable {
    /// Identity of this instance
    fn id(&self) -> ObjectId;

    /// Structural kind of this instance
    fn kind(&self) -> &ObjectKind;

    /// Whether the host already destroyed this instance
    fn is_destroyed(&self) -> bool {
        false
    }

    fn template_origin(&self) -> TemplateOrigin {
        TemplateOrigin::None
    }

    /// Ordered listing of every visible field, composite ones included
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Read the current value of a leaf field
    ///
    /// Returns `None` for composite fields and unknown paths.
    fn read_field(&self, path: &FieldPath) -> Option<FieldValue>;

    /// Apply a batch of writes in one commit, returning how many landed
    fn apply(&mut self, writes: WriteSet) -> usize;
}

/// Enumeration of the live object set
pub trait ObjectGraph {
    /// IDs of every live instance, inactive ones only when asked
    fn instances(&self, include_inactive: bool) -> Vec<ObjectId>;

    /// Look up an instance; `None` once it is gone
    fn get(&self, id: ObjectId) -> Option<&dyn Inspectable>;

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Inspectable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_origin() {
        assert!(!TemplateOrigin::default().is_template());
        assert!(TemplateOrigin::Asset.is_template());
        assert!(TemplateOrigin::Instance.is_template());
    }
}
