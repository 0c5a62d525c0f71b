// Drain: move the live counts out of the store into a timestamped snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::counter_store::CounterStore;
use crate::history::SnapshotHistory;
use crate::models::Snapshot;

pub struct Aggregator {
    store: Arc<CounterStore>,
    history: Arc<SnapshotHistory>,
    /// Held for the whole drain so two drains never interleave.
    drain_lock: Mutex<()>,
    snapshots_recorded_total: AtomicU64,
}

impl Aggregator {
    pub fn new(store: Arc<CounterStore>, history: Arc<SnapshotHistory>) -> Self {
        Self {
            store,
            history,
            drain_lock: Mutex::new(()),
            snapshots_recorded_total: AtomicU64::new(0),
        }
    }

    /// Takes and clears the store and appends the result to history.
    /// An all-zero store records nothing and returns `None`.
    #[instrument(skip(self), fields(operation = "drain_and_record"))]
    pub fn drain_and_record(&self) -> Option<Arc<Snapshot>> {
        let _drain = self.drain_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let taken = self.store.take_and_clear();
        if taken.is_empty() {
            debug!("no new clicks to record");
            return None;
        }

        // Wall clock may step backwards; history order must not.
        let now = Utc::now();
        let captured_at = self
            .history
            .latest()
            .map_or(now, |last| last.captured_at().max(now));

        let snapshot = Arc::new(Snapshot::from_counters(captured_at, taken.into_values()));
        self.history.append(snapshot.clone());
        self.snapshots_recorded_total.fetch_add(1, Ordering::Relaxed);

        debug!(
            snapshot_entries = snapshot.len(),
            history_len = self.history.len(),
            "snapshot recorded"
        );
        Some(snapshot)
    }

    pub fn snapshots_recorded_total(&self) -> u64 {
        self.snapshots_recorded_total.load(Ordering::Relaxed)
    }

    pub fn store(&self) -> &Arc<CounterStore> {
        &self.store
    }

    pub fn history(&self) -> &Arc<SnapshotHistory> {
        &self.history
    }
}
