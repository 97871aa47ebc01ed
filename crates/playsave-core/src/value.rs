//! Tagged field values and the conversion table between them and native types
//!
//! [`FieldKind`] classifies every field the host can report. Only the leaf
//! kinds have a [`FieldValue`] counterpart; composite kinds (generic structs,
//! arrays, curves, ...) are never captured and never restored.

use crate::error::{Error, Result};
use crate::identity::ObjectId;
use crate::math::{Bounds, BoundsInt, Color, Quat, Rect, RectInt, Vec2, Vec2Int, Vec3, Vec3Int, Vec4};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a field as reported by the host's inspection layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Boolean,
    Float,
    String,
    Color,
    ObjectReference,
    Enum,
    Vector2,
    Vector3,
    Vector4,
    Vector2Int,
    Vector3Int,
    Rect,
    RectInt,
    Bounds,
    BoundsInt,
    Quaternion,
    /// Nested user-defined structure; has no single leaf value
    Generic,
    ArraySize,
    LayerMask,
    AnimationCurve,
    Gradient,
    ManagedReference,
}

impl FieldKind {
    /// Every kind that has a [`FieldValue`] representation
    pub const LEAF_KINDS: [FieldKind; 17] = [
        FieldKind::Integer,
        FieldKind::Boolean,
        FieldKind::Float,
        FieldKind::String,
        FieldKind::Color,
        FieldKind::ObjectReference,
        FieldKind::Enum,
        FieldKind::Vector2,
        FieldKind::Vector3,
        FieldKind::Vector4,
        FieldKind::Vector2Int,
        FieldKind::Vector3Int,
        FieldKind::Rect,
        FieldKind::RectInt,
        FieldKind::Bounds,
        FieldKind::BoundsInt,
        FieldKind::Quaternion,
    ];

    /// Whether values of this kind can be captured and restored
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            FieldKind::Generic
                | FieldKind::ArraySize
                | FieldKind::LayerMask
                | FieldKind::AnimationCurve
                | FieldKind::Gradient
                | FieldKind::ManagedReference
        )
    }

    /// Whether a field of this kind can take `value`.
    ///
    /// Integer and enum fields share an integer representation and accept
    /// each other's values; every other kind needs an exact tag match.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (FieldKind::Integer, FieldValue::Enum(_)) => true,
            (FieldKind::Enum, FieldValue::Integer(i)) => i32::try_from(*i).is_ok(),
            _ => self.is_leaf() && *self == value.kind(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Float => "float",
            FieldKind::String => "string",
            FieldKind::Color => "color",
            FieldKind::ObjectReference => "object_reference",
            FieldKind::Enum => "enum",
            FieldKind::Vector2 => "vector2",
            FieldKind::Vector3 => "vector3",
            FieldKind::Vector4 => "vector4",
            FieldKind::Vector2Int => "vector2_int",
            FieldKind::Vector3Int => "vector3_int",
            FieldKind::Rect => "rect",
            FieldKind::RectInt => "rect_int",
            FieldKind::Bounds => "bounds",
            FieldKind::BoundsInt => "bounds_int",
            FieldKind::Quaternion => "quaternion",
            FieldKind::Generic => "generic",
            FieldKind::ArraySize => "array_size",
            FieldKind::LayerMask => "layer_mask",
            FieldKind::AnimationCurve => "animation_curve",
            FieldKind::Gradient => "gradient",
            FieldKind::ManagedReference => "managed_reference",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A captured leaf value tagged with its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Integer(i64),
    Boolean(bool),
    Float(f64),
    String(String),
    Color(Color),
    /// Reference to another object; `None` is the null reference
    ObjectReference(Option<ObjectId>),
    /// Enum stored by its underlying index, not by name
    Enum(i32),
    Vector2(Vec2),
    Vector3(Vec3),
    Vector4(Vec4),
    Vector2Int(Vec2Int),
    Vector3Int(Vec3Int),
    Rect(Rect),
    RectInt(RectInt),
    Bounds(Bounds),
    BoundsInt(BoundsInt),
    Quaternion(Quat),
}

impl FieldValue {
    /// Create an enum value from its index
    pub fn enum_index(index: i32) -> Self {
        FieldValue::Enum(index)
    }

    /// The kind tag of this value
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Color(_) => FieldKind::Color,
            FieldValue::ObjectReference(_) => FieldKind::ObjectReference,
            FieldValue::Enum(_) => FieldKind::Enum,
            FieldValue::Vector2(_) => FieldKind::Vector2,
            FieldValue::Vector3(_) => FieldKind::Vector3,
            FieldValue::Vector4(_) => FieldKind::Vector4,
            FieldValue::Vector2Int(_) => FieldKind::Vector2Int,
            FieldValue::Vector3Int(_) => FieldKind::Vector3Int,
            FieldValue::Rect(_) => FieldKind::Rect,
            FieldValue::RectInt(_) => FieldKind::RectInt,
            FieldValue::Bounds(_) => FieldKind::Bounds,
            FieldValue::BoundsInt(_) => FieldKind::BoundsInt,
            FieldValue::Quaternion(_) => FieldKind::Quaternion,
        }
    }

    /// Retag this value for a field of `kind`.
    ///
    /// Returns `None` when the field cannot take the value; callers skip the
    /// write in that case.
    pub fn coerce_to(self, kind: FieldKind) -> Option<FieldValue> {
        if !kind.accepts(&self) {
            return None;
        }
        match (kind, self) {
            (FieldKind::Integer, FieldValue::Enum(i)) => Some(FieldValue::Integer(i64::from(i))),
            (FieldKind::Enum, FieldValue::Integer(i)) => i32::try_from(i).ok().map(FieldValue::Enum),
            (_, value) => Some(value),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::String(s) => write!(f, "\"{}\"", s),
            FieldValue::Color(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a),
            FieldValue::ObjectReference(Some(id)) => write!(f, "{}", id),
            FieldValue::ObjectReference(None) => write!(f, "none"),
            FieldValue::Enum(i) => write!(f, "enum#{}", i),
            FieldValue::Vector2(v) => write!(f, "({}, {})", v.x, v.y),
            FieldValue::Vector3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            FieldValue::Vector4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            FieldValue::Vector2Int(v) => write!(f, "({}, {})", v.x, v.y),
            FieldValue::Vector3Int(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            FieldValue::Rect(r) => write!(f, "rect({}, {}, {}x{})", r.x, r.y, r.width, r.height),
            FieldValue::RectInt(r) => write!(f, "rect({}, {}, {}x{})", r.x, r.y, r.width, r.height),
            FieldValue::Bounds(b) => write!(
                f,
                "bounds(center: ({}, {}, {}), extents: ({}, {}, {}))",
                b.center.x, b.center.y, b.center.z, b.extents.x, b.extents.y, b.extents.z
            ),
            FieldValue::BoundsInt(b) => write!(
                f,
                "bounds(position: ({}, {}, {}), size: ({}, {}, {}))",
                b.position.x, b.position.y, b.position.z, b.size.x, b.size.y, b.size.z
            ),
            FieldValue::Quaternion(q) => write!(f, "quat({}, {}, {}, {})", q.x, q.y, q.z, q.w),
        }
    }
}

// Native -> tagged and tagged -> native, one pair per leaf kind.
macro_rules! leaf_conversions {
    ($($variant:ident => $native:ty),* $(,)?) => {
        $(
            impl From<$native> for FieldValue {
                fn from(value: $native) -> Self {
                    FieldValue::$variant(value)
                }
            }

            impl TryFrom<FieldValue> for $native {
                type Error = Error;

                fn try_from(value: FieldValue) -> Result<Self> {
                    match value {
                        FieldValue::$variant(inner) => Ok(inner),
                        other => Err(Error::TypeError {
                            expected: FieldKind::$variant.name().to_string(),
                            got: other.kind().name().to_string(),
                        }),
                    }
                }
            }
        )*
    };
}

leaf_conversions! {
    Integer => i64,
    Boolean => bool,
    Float => f64,
    String => String,
    Color => Color,
    ObjectReference => Option<ObjectId>,
    Vector2 => Vec2,
    Vector3 => Vec3,
    Vector4 => Vec4,
    Vector2Int => Vec2Int,
    Vector3Int => Vec3Int,
    Rect => Rect,
    RectInt => RectInt,
    Bounds => Bounds,
    BoundsInt => BoundsInt,
    Quaternion => Quat,
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Integer(i64::from(i))
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<ObjectId> for FieldValue {
    fn from(id: ObjectId) -> Self {
        FieldValue::ObjectReference(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_kinds_match_value_tags() {
        let values = [
            FieldValue::Integer(1),
            FieldValue::Boolean(true),
            FieldValue::Float(1.0),
            FieldValue::String("a".into()),
            FieldValue::Color(Color::new(1.0, 1.0, 1.0, 1.0)),
            FieldValue::ObjectReference(None),
            FieldValue::Enum(1),
            FieldValue::Vector2(Vec2::new(1.0, 1.0)),
            FieldValue::Vector3(Vec3::new(1.0, 1.0, 1.0)),
            FieldValue::Vector4(Vec4::new(1.0, 1.0, 1.0, 1.0)),
            FieldValue::Vector2Int(Vec2Int::new(1, 1)),
            FieldValue::Vector3Int(Vec3Int::new(1, 1, 1)),
            FieldValue::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)),
            FieldValue::RectInt(RectInt::new(0, 0, 1, 1)),
            FieldValue::Bounds(Bounds::new(Vec3::default(), Vec3::new(1.0, 1.0, 1.0))),
            FieldValue::BoundsInt(BoundsInt::new(Vec3Int::default(), Vec3Int::new(1, 1, 1))),
            FieldValue::Quaternion(Quat::IDENTITY),
        ];
        let kinds: Vec<FieldKind> = values.iter().map(FieldValue::kind).collect();
        assert_eq!(kinds, FieldKind::LEAF_KINDS);
        for kind in FieldKind::LEAF_KINDS {
            assert!(kind.is_leaf(), "{} should be a leaf kind", kind);
        }

        for kind in [
            FieldKind::Generic,
            FieldKind::ArraySize,
            FieldKind::LayerMask,
            FieldKind::AnimationCurve,
            FieldKind::Gradient,
            FieldKind::ManagedReference,
        ] {
            assert!(!kind.is_leaf());
            assert!(values.iter().all(|value| !kind.accepts(value)));
        }
    }

    #[test]
    fn test_accepts_exact_tag() {
        assert!(FieldKind::Float.accepts(&FieldValue::Float(2.0)));
        assert!(!FieldKind::Float.accepts(&FieldValue::Integer(2)));
        assert!(!FieldKind::Vector3.accepts(&FieldValue::Vector2(Vec2::new(1.0, 2.0))));
        assert!(!FieldKind::Generic.accepts(&FieldValue::Boolean(true)));
    }

    #[test]
    fn test_integer_and_enum_interchange() {
        assert!(FieldKind::Integer.accepts(&FieldValue::Enum(3)));
        assert!(FieldKind::Enum.accepts(&FieldValue::Integer(3)));
        assert!(!FieldKind::Enum.accepts(&FieldValue::Integer(i64::MAX)));

        assert_eq!(
            FieldValue::Enum(3).coerce_to(FieldKind::Integer),
            Some(FieldValue::Integer(3))
        );
        assert_eq!(
            FieldValue::Integer(2).coerce_to(FieldKind::Enum),
            Some(FieldValue::Enum(2))
        );
        assert_eq!(FieldValue::Boolean(true).coerce_to(FieldKind::Integer), None);
    }

    #[test]
    fn test_native_conversions() {
        let value: FieldValue = Vec3::new(1.0, 2.0, 3.0).into();
        assert_eq!(value.kind(), FieldKind::Vector3);
        let back = Vec3::try_from(value).unwrap();
        assert_eq!(back, Vec3::new(1.0, 2.0, 3.0));

        let value: FieldValue = 2.5f32.into();
        assert_eq!(value, FieldValue::Float(2.5));

        let value: FieldValue = ObjectId::new(7).into();
        assert_eq!(value, FieldValue::ObjectReference(Some(ObjectId::new(7))));
    }

    #[test]
    fn test_conversion_mismatch_is_type_error() {
        let err = Quat::try_from(FieldValue::Boolean(false)).unwrap_err();
        match err {
            Error::TypeError { expected, got } => {
                assert_eq!(expected, "quaternion");
                assert_eq!(got, "boolean");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_value_display() {
        assert_eq!(FieldValue::Float(2.0).to_string(), "2");
        assert_eq!(FieldValue::from("pull").to_string(), "\"pull\"");
        assert_eq!(FieldValue::ObjectReference(None).to_string(), "none");
        assert_eq!(FieldValue::Enum(1).to_string(), "enum#1");
    }

    #[test]
    fn test_value_serialization() {
        let value = FieldValue::Bounds(Bounds::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.5, 0.5, 0.5)));
        let serialized = ron::to_string(&value).expect("serialize");
        let deserialized: FieldValue = ron::from_str(&serialized).expect("deserialize");
        assert_eq!(deserialized, value);
    }
}
