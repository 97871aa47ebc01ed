//! Capture and restore passes over a live object graph
//!
//! Neither pass can fail. Anything that cannot be captured or written back
//! (destroyed instances, excluded kinds, composite fields, kind mismatches)
//! is left out, and only shows up in the counts of the returned report.

use crate::{
    ExclusionFilter, ObjectGraph, ObjectId, PendingWrite, SaverConfig, Snapshot, SnapshotStore,
    WriteSet,
};
use indexmap::IndexMap;
use tracing::{debug, info};

/// Counts from one capture pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureReport {
    /// Instances with a snapshot in the store
    pub captured: usize,
    /// Leaf fields recorded across all snapshots
    pub fields: usize,
    /// Instances left out by the exclusion filter or already gone
    pub skipped: usize,
}

/// Counts from one restore pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Snapshots held by the store, whether or not their instance still exists
    pub stored: usize,
    /// Live instances that had a snapshot
    pub matched: usize,
    /// Field writes that landed
    pub fields_written: usize,
    /// Stored values the current field could not take
    pub fields_skipped: usize,
}

/// Walks an [`ObjectGraph`] to capture snapshots and replay them
#[derive(Debug, Clone)]
pub struct SnapshotEngine {
    filter: ExclusionFilter,
    include_inactive: bool,
}

impl SnapshotEngine {
    pub fn new(filter: ExclusionFilter, include_inactive: bool) -> Self {
        Self {
            filter,
            include_inactive,
        }
    }

    pub fn from_config(config: &SaverConfig) -> Self {
        Self::new(ExclusionFilter::from_config(config), config.include_inactive)
    }

    /// Replace the store's contents with a snapshot of every eligible instance
    pub fn capture<G>(&self, graph: &G, store: &mut SnapshotStore) -> CaptureReport
    where
        G: ObjectGraph + ?Sized,
    {
        store.begin_session();

        let mut report = CaptureReport::default();
        let mut snapshots: IndexMap<ObjectId, Snapshot> = IndexMap::new();

        for id in graph.instances(self.include_inactive) {
            let Some(object) = graph.get(id) else {
                report.skipped += 1;
                continue;
            };
            if let Some(reason) = self.filter.capture_skip(object) {
                debug!(object = %id, kind = %object.kind(), ?reason, "skipping capture");
                report.skipped += 1;
                continue;
            }

            let snapshot: Snapshot = object
                .fields()
                .into_iter()
                .filter(|field| field.kind.is_leaf())
                .filter_map(|field| {
                    object
                        .read_field(&field.path)
                        .filter(|value| field.kind.accepts(value))
                        .map(|value| (field.path, value))
                })
                .collect();

            report.fields += snapshot.len();
            snapshots.insert(object.id(), snapshot);
        }

        report.captured = snapshots.len();
        store.replace_all(snapshots);

        info!(
            objects = report.captured,
            fields = report.fields,
            "Saved changes for {} objects",
            report.captured
        );
        report
    }

    /// Write stored values back onto the instances they were captured from
    ///
    /// Each instance gets exactly one [`apply`](crate::Inspectable::apply)
    /// call carrying all of its writes.
    pub fn restore<G>(&self, graph: &mut G, store: &SnapshotStore) -> RestoreReport
    where
        G: ObjectGraph + ?Sized,
    {
        let mut report = RestoreReport {
            stored: store.len(),
            ..RestoreReport::default()
        };
        if let Some(captured_at) = store.captured_at() {
            debug!(%captured_at, snapshots = store.len(), "restoring snapshots");
        }

        for id in graph.instances(self.include_inactive) {
            let Some(object) = graph.get_mut(id) else {
                continue;
            };
            if let Some(reason) = self.filter.restore_skip(&*object) {
                debug!(object = %id, kind = %object.kind(), ?reason, "skipping restore");
                continue;
            }
            let Some(snapshot) = store.get(object.id()) else {
                continue;
            };
            report.matched += 1;

            let mut writes = WriteSet::new();
            for field in object.fields() {
                let Some(stored) = snapshot.get(field.path.as_str()) else {
                    continue;
                };
                match stored.clone().coerce_to(field.kind) {
                    Some(value) => writes.push(PendingWrite {
                        path: field.path,
                        value,
                    }),
                    None => {
                        debug!(object = %id, field = %field.path, expected = %field.kind, got = %stored.kind(), "kind mismatch");
                        report.fields_skipped += 1;
                    }
                }
            }
            report.fields_written += object.apply(writes);
        }

        info!(
            objects = report.stored,
            matched = report.matched,
            fields = report.fields_written,
            "Applied changes for {} objects",
            report.stored
        );
        report
    }
}

impl Default for SnapshotEngine {
    fn default() -> Self {
        Self::from_config(&SaverConfig::default())
    }
}
