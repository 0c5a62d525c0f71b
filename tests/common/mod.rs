// Shared test helpers

use bannerstats::service::ClickStats;

/// Service with `capacity` slots and `clicks` increments applied to each `(id, clicks)` pair.
pub fn stats_with_clicks(capacity: usize, clicks: &[(usize, u64)]) -> ClickStats {
    let stats = ClickStats::new(capacity);
    for &(id, n) in clicks {
        for _ in 0..n {
            stats.increment(id).unwrap();
        }
    }
    stats
}
