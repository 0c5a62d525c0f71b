// Domain models: live counters, immutable snapshots, query results.

mod counter;
mod snapshot;
mod stats;

pub use counter::Counter;
pub use snapshot::{Snapshot, SnapshotEntry};
pub use stats::{BannerStat, StatPoint, StatsRequest, StatsResponse};
