//! In-memory reference host
//!
//! `Scene` implements [`ObjectGraph`] and [`Inspectable`] over plain data so
//! the engine can run without a real editor. A play session is modelled by
//! cloning the edit scene: the clone keeps every identity, gets mutated, is
//! captured, and the snapshot is restored onto the original.

use crate::{
    FieldDescriptor, FieldKind, FieldPath, FieldValue, Inspectable, ObjectGraph, ObjectId,
    ObjectKind, TemplateOrigin, WriteSet,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One field of a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneField {
    pub kind: FieldKind,
    /// Current value; always `None` for composite kinds
    pub value: Option<FieldValue>,
}

/// A live object with an ordered field table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub active: bool,
    pub destroyed: bool,
    pub origin: TemplateOrigin,
    fields: IndexMap<FieldPath, SceneField>,
    /// Number of batches applied through [`Inspectable::apply`]
    commits: usize,
}

impl SceneObject {
    /// Create a new active object with no fields
    pub fn new(id: ObjectId, kind: impl Into<ObjectKind>) -> Self {
        Self {
            id,
            kind: kind.into(),
            active: true,
            destroyed: false,
            origin: TemplateOrigin::None,
            fields: IndexMap::new(),
            commits: 0,
        }
    }

    /// Declare a leaf field, its kind taken from the initial value
    pub fn define(&mut self, path: impl Into<FieldPath>, value: impl Into<FieldValue>) -> &mut Self {
        let value = value.into();
        self.fields.insert(
            path.into(),
            SceneField {
                kind: value.kind(),
                value: Some(value),
            },
        );
        self
    }

    /// Declare a composite field (generic struct, array, curve, ...)
    pub fn define_composite(&mut self, path: impl Into<FieldPath>, kind: FieldKind) -> &mut Self {
        self.fields.insert(path.into(), SceneField { kind, value: None });
        self
    }

    /// Get a field's current value
    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        self.fields.get(path).and_then(|f| f.value.as_ref())
    }

    /// Mutate a field directly, as gameplay code would during simulation
    ///
    /// Returns `false` when the field does not exist or cannot take `value`.
    pub fn set(&mut self, path: &str, value: impl Into<FieldValue>) -> bool {
        match self.fields.get_mut(path) {
            Some(field) => match value.into().coerce_to(field.kind) {
                Some(value) => {
                    field.value = Some(value);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Change a field's declared kind, dropping its value when it no longer fits
    pub fn redeclare(&mut self, path: &str, kind: FieldKind) {
        if let Some(field) = self.fields.get_mut(path) {
            field.value = field.value.take().and_then(|v| v.coerce_to(kind));
            field.kind = kind;
        }
    }

    pub fn commit_count(&self) -> usize {
        self.commits
    }
}

impl Inspectable for SceneObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn template_origin(&self) -> TemplateOrigin {
        self.origin
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|(path, field)| FieldDescriptor::new(path.clone(), field.kind))
            .collect()
    }

    fn read_field(&self, path: &FieldPath) -> Option<FieldValue> {
        self.fields
            .get(path)
            .filter(|f| f.kind.is_leaf())
            .and_then(|f| f.value.clone())
    }

    fn apply(&mut self, writes: WriteSet) -> usize {
        let mut applied = 0;
        for write in writes {
            if let Some(field) = self.fields.get_mut(&write.path) {
                if let Some(value) = write.value.coerce_to(field.kind) {
                    field.value = Some(value);
                    applied += 1;
                }
            }
        }
        self.commits += 1;
        applied
    }
}

/// All objects of a scene, in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    objects: IndexMap<ObjectId, SceneObject>,
    next_id: i64,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Create a new object and add it to the scene
    pub fn create(&mut self, kind: impl Into<ObjectKind>) -> &mut SceneObject {
        let id = ObjectId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.objects
            .entry(id)
            .or_insert_with(|| SceneObject::new(id, kind))
    }

    /// Put an object back under its own identity, replacing any current one
    ///
    /// Fresh identities handed out by [`create`](Self::create) stay above
    /// every inserted one, except for `i64::MAX` which leaves the counter alone.
    pub fn insert(&mut self, object: SceneObject) {
        if let Some(next) = object.id.raw().checked_add(1) {
            self.next_id = self.next_id.max(next);
        }
        self.objects.insert(object.id, object);
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Remove an object; its identity is gone until reinserted
    pub fn destroy(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.shift_remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectGraph for Scene {
    fn instances(&self, include_inactive: bool) -> Vec<ObjectId> {
        self.objects
            .values()
            .filter(|o| include_inactive || o.active)
            .map(|o| o.id)
            .collect()
    }

    fn get(&self, id: ObjectId) -> Option<&dyn Inspectable> {
        self.objects.get(&id).map(|o| o as &dyn Inspectable)
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Inspectable> {
        self.objects.get_mut(&id).map(|o| o as &mut dyn Inspectable)
    }
}
