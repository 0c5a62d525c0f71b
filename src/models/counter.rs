use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One live counter slot. Ids are permanent: a slot exists for every id in
/// `[0, capacity)` from store creation onwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub id: usize,
    pub name: String,
    pub count: u64,
    pub last_updated: DateTime<Utc>,
}

impl Counter {
    /// Fresh slot with a zero count, named after its id.
    pub fn seeded(id: usize, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: format!("Banner {}", id),
            count: 0,
            last_updated: now,
        }
    }

    pub fn increment(&mut self, now: DateTime<Utc>) {
        self.count += 1;
        self.last_updated = now;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
