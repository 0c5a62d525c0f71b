// Query results and their wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One history point for a banner: the drain time and the count captured then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatPoint {
    pub captured_at: DateTime<Utc>,
    pub count: u64,
}

/// Body of `POST /stats/{banner_id}`. Bounds are optional local-time strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Wire form of a [`StatPoint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerStat {
    pub ts: DateTime<Utc>,
    pub name: String,
    pub v: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub stats: Vec<BannerStat>,
}

impl StatsResponse {
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
