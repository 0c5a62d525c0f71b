// Background rollover: drain the live counters into history every interval.
// A drain runs to completion inside the select arm, so the next tick is only
// awaited after it returns and cancellation is only observed between drains.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::aggregator::Aggregator;
use crate::models::Snapshot;

/// Config for the rollover task.
#[derive(Debug, Clone)]
pub struct RolloverConfig {
    pub interval: Duration,
    /// How often to log totals at INFO level.
    pub stats_log_interval: Duration,
    /// Run one last drain after cancellation so clicks since the last tick are kept.
    pub drain_on_shutdown: bool,
    /// Snapshots older than this are pruned after each drain. `None` keeps everything.
    pub retention: Option<Duration>,
}

impl RolloverConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            stats_log_interval: Duration::from_secs(60),
            drain_on_shutdown: true,
            retention: None,
        }
    }
}

/// Spawns the rollover task. It stops once `cancel` fires.
pub fn spawn(
    aggregator: Arc<Aggregator>,
    config: RolloverConfig,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run(aggregator, config, cancel).await;
    })
}

#[instrument(skip_all, fields(interval_ms = config.interval.as_millis() as u64))]
async fn run(aggregator: Arc<Aggregator>, config: RolloverConfig, cancel: CancellationToken) {
    info!("rollover started");

    let mut drain_tick = interval_at(Instant::now() + config.interval, config.interval);
    drain_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut stats_log_tick = interval(config.stats_log_interval);
    stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("rollover cancelled");
                break;
            }
            _ = drain_tick.tick() => {
                run_one_tick(&aggregator, config.retention);
            }
            _ = stats_log_tick.tick() => {
                info!(
                    clicks_total = aggregator.store().clicks_total(),
                    snapshots_recorded_total = aggregator.snapshots_recorded_total(),
                    history_len = aggregator.history().len(),
                    "app stats"
                );
            }
        }
    }

    if config.drain_on_shutdown && aggregator.drain_and_record().is_some() {
        info!("final snapshot recorded on shutdown");
    }
    info!("rollover stopped");
}

/// One drain plus optional pruning. Used by the loop and callable directly.
pub fn run_one_tick(aggregator: &Aggregator, retention: Option<Duration>) -> Option<Arc<Snapshot>> {
    let recorded = aggregator.drain_and_record();

    if let Some(retention) = retention
        && let Ok(retention) = chrono::Duration::from_std(retention)
        && let Some(cutoff) = Utc::now().checked_sub_signed(retention)
    {
        let pruned = aggregator.history().prune_older_than(cutoff);
        if pruned > 0 {
            debug!(operation = "prune_history", pruned, "old snapshots pruned");
        }
    }

    recorded
}
