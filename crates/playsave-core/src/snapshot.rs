//! Captured field values and the store that holds them across a session
//!
//! # Lifecycle
//!
//! The store lives for exactly one simulation session:
//!
//! ```text
//! SessionStarting  -> begin_session()   store emptied
//! SessionEnding    -> replace_all(..)   store fully repopulated by capture
//! SessionEnded     -> get(..)           restore reads it back
//! ```
//!
//! `replace_all` swaps the whole mapping in one step, so the store never
//! holds a mix of two capture passes.

use crate::{FieldPath, FieldValue, ObjectId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Leaf field values of one object, in field enumeration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    values: IndexMap<FieldPath, FieldValue>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field value, replacing any earlier value for the path
    pub fn insert(&mut self, path: impl Into<FieldPath>, value: FieldValue) -> Option<FieldValue> {
        self.values.insert(path.into(), value)
    }

    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        self.values.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(FieldPath, FieldValue)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (FieldPath, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Per-object snapshots for the current session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotStore {
    snapshots: IndexMap<ObjectId, Snapshot>,
    /// When the current contents were captured
    captured_at: Option<DateTime<Utc>>,
}

impl SnapshotStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything held from a previous session
    pub fn begin_session(&mut self) {
        self.snapshots.clear();
        self.captured_at = None;
    }

    /// Replace the whole store with the result of one capture pass
    pub fn replace_all(&mut self, snapshots: IndexMap<ObjectId, Snapshot>) {
        self.snapshots = snapshots;
        self.captured_at = Some(Utc::now());
    }

    /// Store one object's snapshot, overwriting any earlier entry
    pub fn insert(&mut self, id: ObjectId, snapshot: Snapshot) -> Option<Snapshot> {
        self.snapshots.insert(id, snapshot)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Snapshot> {
        self.snapshots.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.snapshots.contains_key(&id)
    }

    /// Number of objects with a snapshot
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at
    }
}
