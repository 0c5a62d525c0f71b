// Live counter table. Fixed capacity, one slot per id, pre-seeded at creation.
//
// Locking: the table sits behind an RwLock and each slot behind its own Mutex.
// Increments and reads take the table lock shared and then lock one slot, so
// clicks on different ids never contend. take_and_clear and reset take the
// table lock exclusively, which makes read-then-clear indivisible with respect
// to every increment.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::error::{Result, StatsError};
use crate::models::Counter;

pub struct CounterStore {
    slots: RwLock<Box<[Mutex<Counter>]>>,
    capacity: usize,
    clicks_total: AtomicU64,
}

impl CounterStore {
    pub fn new(capacity: usize) -> Self {
        let now = Utc::now();
        let slots = (0..capacity)
            .map(|id| Mutex::new(Counter::seeded(id, now)))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            slots: RwLock::new(slots),
            capacity,
            clicks_total: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clicks accepted since creation. Not affected by drains or resets.
    pub fn clicks_total(&self) -> u64 {
        self.clicks_total.load(Ordering::Relaxed)
    }

    /// Ok if `id` addresses a slot.
    pub fn check_id(&self, id: usize) -> Result<()> {
        if id < self.capacity {
            Ok(())
        } else {
            Err(StatsError::OutOfRange {
                id,
                capacity: self.capacity,
            })
        }
    }

    /// Adds one click to `id` and stamps it with the current time.
    pub fn increment(&self, id: usize) -> Result<()> {
        self.check_id(id)?;
        let table = self.read_table();
        let mut slot = table[id].lock().unwrap_or_else(PoisonError::into_inner);
        slot.increment(Utc::now());
        self.clicks_total.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Copy of one slot, zero or not.
    pub fn get(&self, id: usize) -> Result<Counter> {
        self.check_id(id)?;
        let table = self.read_table();
        let slot = table[id].lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.clone())
    }

    /// Copy of every counter with a non-zero count. Does not mutate.
    pub fn snapshot(&self) -> BTreeMap<usize, Counter> {
        let table = self.read_table();
        table
            .iter()
            .filter_map(|slot| {
                let c = slot.lock().unwrap_or_else(PoisonError::into_inner);
                (!c.is_empty()).then(|| (c.id, c.clone()))
            })
            .collect()
    }

    /// Returns what `snapshot` would and zeroes every slot, under one exclusive lock.
    pub fn take_and_clear(&self) -> BTreeMap<usize, Counter> {
        let mut table = self.write_table();
        let mut taken = BTreeMap::new();
        for slot in table.iter_mut() {
            let c = slot.get_mut().unwrap_or_else(PoisonError::into_inner);
            if !c.is_empty() {
                taken.insert(c.id, c.clone());
                c.count = 0;
            }
        }
        taken
    }

    /// Zeroes all counts unconditionally.
    pub fn reset(&self) {
        let mut table = self.write_table();
        for slot in table.iter_mut() {
            slot.get_mut()
                .unwrap_or_else(PoisonError::into_inner)
                .count = 0;
        }
    }

    fn read_table(&self) -> RwLockReadGuard<'_, Box<[Mutex<Counter>]>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_table(&self) -> RwLockWriteGuard<'_, Box<[Mutex<Counter>]>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}
