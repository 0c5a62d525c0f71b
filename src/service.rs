// Owns the counter store and history and exposes the click/query API used by the routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::aggregator::Aggregator;
use crate::counter_store::CounterStore;
use crate::error::Result;
use crate::history::SnapshotHistory;
use crate::models::{Counter, Snapshot, StatPoint};
use crate::query::QueryEngine;
use crate::rollover::{self, RolloverConfig};

pub struct ClickStats {
    store: Arc<CounterStore>,
    aggregator: Arc<Aggregator>,
    query: QueryEngine,
}

impl ClickStats {
    pub fn new(max_banners: usize) -> Self {
        let store = Arc::new(CounterStore::new(max_banners));
        let history = Arc::new(SnapshotHistory::new());
        let aggregator = Arc::new(Aggregator::new(store.clone(), history.clone()));
        let query = QueryEngine::new(history, max_banners);
        Self {
            store,
            aggregator,
            query,
        }
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn increment(&self, id: usize) -> Result<()> {
        self.store.increment(id)
    }

    /// One live counter, including zero ones.
    pub fn counter(&self, id: usize) -> Result<Counter> {
        self.store.get(id)
    }

    /// Live counters with a non-zero count.
    pub fn snapshot(&self) -> BTreeMap<usize, Counter> {
        self.store.snapshot()
    }

    pub fn reset_all(&self) {
        self.store.reset();
        info!(operation = "reset_all", "all counters reset");
    }

    /// Drains immediately instead of waiting for the next rollover tick.
    pub fn drain_now(&self) -> Option<Arc<Snapshot>> {
        self.aggregator.drain_and_record()
    }

    /// Starts the periodic rollover. Runs until `cancel` fires.
    pub fn start_rollover(
        &self,
        config: RolloverConfig,
        cancel: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        rollover::spawn(self.aggregator.clone(), config, cancel)
    }

    pub fn query(
        &self,
        banner_id: usize,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<StatPoint>> {
        self.query.query(banner_id, from, to)
    }

    /// Like [`query`](Self::query) with unparsed time bounds.
    pub fn query_str(
        &self,
        banner_id: usize,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<StatPoint>> {
        self.query.query_str(banner_id, from, to)
    }

    pub fn history_len(&self) -> usize {
        self.aggregator.history().len()
    }

    pub fn clicks_total(&self) -> u64 {
        self.store.clicks_total()
    }

    pub fn snapshots_recorded_total(&self) -> u64 {
        self.aggregator.snapshots_recorded_total()
    }
}
