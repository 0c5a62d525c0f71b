// Append-only, in-memory sequence of drained snapshots, ordered by capture time.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::models::Snapshot;

#[derive(Default)]
pub struct SnapshotHistory {
    snapshots: RwLock<Vec<Arc<Snapshot>>>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot. Callers append in drain order, so capture times
    /// never go backwards.
    pub fn append(&self, snapshot: Arc<Snapshot>) {
        let mut snapshots = self.snapshots.write().unwrap_or_else(PoisonError::into_inner);
        debug_assert!(
            snapshots
                .last()
                .is_none_or(|last| last.captured_at() <= snapshot.captured_at()),
            "snapshots must be appended in capture order"
        );
        snapshots.push(snapshot);
    }

    /// The history as it exists right now. Later appends are not reflected.
    pub fn list(&self) -> Vec<Arc<Snapshot>> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops snapshots captured before `cutoff`. Returns how many were removed.
    pub fn prune_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut snapshots = self.snapshots.write().unwrap_or_else(PoisonError::into_inner);
        // Sorted by capture time, so the stale ones form a prefix.
        let stale = snapshots.partition_point(|s| s.captured_at() < cutoff);
        snapshots.drain(..stale);
        stale
    }
}
