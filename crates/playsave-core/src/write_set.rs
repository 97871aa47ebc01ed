//! Batched field writes for one object
//!
//! Restore never writes a field directly. It collects `PendingWrite`s for an
//! object into a `WriteSet` and hands the whole batch to
//! [`Inspectable::apply`](crate::Inspectable::apply), so a half-restored
//! object is never observable from outside the commit.

use crate::{FieldPath, FieldValue};
use serde::{Deserialize, Serialize};

/// A single field assignment, already converted to the field's kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingWrite {
    /// The field to assign
    pub path: FieldPath,
    /// The value to write
    pub value: FieldValue,
}

impl PendingWrite {
    pub fn new(path: impl Into<FieldPath>, value: impl Into<FieldValue>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// An ordered batch of pending writes applied in one commit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteSet {
    writes: Vec<PendingWrite>,
}

impl WriteSet {
    /// Create a new empty WriteSet
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pending write to the set
    pub fn push(&mut self, write: PendingWrite) {
        self.writes.push(write);
    }

    /// Get the number of pending writes
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Check if the WriteSet is empty
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Get an iterator over the pending writes
    pub fn iter(&self) -> impl Iterator<Item = &PendingWrite> {
        self.writes.iter()
    }
}

impl IntoIterator for WriteSet {
    type Item = PendingWrite;
    type IntoIter = std::vec::IntoIter<PendingWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_set_empty() {
        let write_set = WriteSet::new();
        assert!(write_set.is_empty());
        assert_eq!(write_set.len(), 0);
    }

    #[test]
    fn test_write_set_keeps_order() {
        let mut write_set = WriteSet::new();
        write_set.push(PendingWrite::new("pull", 0.2f64));
        write_set.push(PendingWrite::new("spring", 0.6f64));

        let paths: Vec<_> = write_set.iter().map(|w| w.path.as_str().to_string()).collect();
        assert_eq!(paths, vec!["pull", "spring"]);
    }

    #[test]
    fn test_write_set_serialization() {
        let mut write_set = WriteSet::new();
        write_set.push(PendingWrite::new("radius", 0.05f64));
        write_set.push(PendingWrite::new("enabled", true));

        let serialized = ron::to_string(&write_set).expect("serialize");
        let deserialized: WriteSet = ron::from_str(&serialized).expect("deserialize");

        assert_eq!(deserialized, write_set);
    }
}
