// Time-range queries over snapshot history.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::{Result, StatsError};
use crate::history::SnapshotHistory;
use crate::models::StatPoint;

/// Wire format for time bounds; interpreted in the server's local zone.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct QueryEngine {
    history: Arc<SnapshotHistory>,
    capacity: usize,
}

impl QueryEngine {
    pub fn new(history: Arc<SnapshotHistory>, capacity: usize) -> Self {
        Self { history, capacity }
    }

    /// Count of `banner_id` in every snapshot captured within `[from, to]`.
    /// Missing `from` means the epoch, missing `to` means now.
    /// Snapshots without an entry for the banner are skipped, so a banner
    /// that was never clicked yields an empty list.
    pub fn query(
        &self,
        banner_id: usize,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<StatPoint>> {
        if banner_id >= self.capacity {
            return Err(StatsError::OutOfRange {
                id: banner_id,
                capacity: self.capacity,
            });
        }

        let from = from.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let to = to.unwrap_or_else(Utc::now);
        if from > to {
            return Err(StatsError::InvalidTimeRange(format!(
                "from {} is after to {}",
                from.to_rfc3339(),
                to.to_rfc3339()
            )));
        }

        // Scan a copy of the current prefix; appends after this point are not seen.
        let snapshots = self.history.list();
        let points = snapshots
            .iter()
            .filter(|s| s.captured_at() >= from && s.captured_at() <= to)
            .filter_map(|s| {
                s.entry(banner_id).map(|e| StatPoint {
                    captured_at: s.captured_at(),
                    count: e.count,
                })
            })
            .collect();
        Ok(points)
    }

    /// Same as [`query`](Self::query) with bounds given as strings.
    /// Empty strings count as absent.
    pub fn query_str(
        &self,
        banner_id: usize,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<StatPoint>> {
        let from = parse_optional_bound("from", from)?;
        let to = parse_optional_bound("to", to)?;
        self.query(banner_id, from, to)
    }
}

fn parse_optional_bound(which: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_time(s)
            .map(Some)
            .map_err(|msg| StatsError::InvalidTimeRange(format!("'{}' {}", which, msg))),
    }
}

/// Parses RFC 3339, or `YYYY-MM-DDTHH:MM:SS` in local time, into UTC.
pub fn parse_time_bound(s: &str) -> Result<DateTime<Utc>> {
    parse_time(s).map_err(StatsError::InvalidTimeRange)
}

fn parse_time(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, LOCAL_TIME_FORMAT)
        .map_err(|e| format!("cannot parse time {:?}: {}", s, e))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("{:?} does not exist in local time", s))
}
