// Immutable capture of the non-zero counters at one drain.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Counter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub count: u64,
    pub last_updated: DateTime<Utc>,
}

/// Entries only hold ids whose count was > 0 when the store was drained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    captured_at: DateTime<Utc>,
    entries: BTreeMap<usize, SnapshotEntry>,
}

impl Snapshot {
    /// Builds a snapshot from drained counters, dropping any zero slots.
    pub fn from_counters(
        captured_at: DateTime<Utc>,
        counters: impl IntoIterator<Item = Counter>,
    ) -> Self {
        let entries = counters
            .into_iter()
            .filter(|c| !c.is_empty())
            .map(|c| {
                (
                    c.id,
                    SnapshotEntry {
                        count: c.count,
                        last_updated: c.last_updated,
                    },
                )
            })
            .collect();
        Self {
            captured_at,
            entries,
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn entries(&self) -> &BTreeMap<usize, SnapshotEntry> {
        &self.entries
    }

    pub fn entry(&self, id: usize) -> Option<&SnapshotEntry> {
        self.entries.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
