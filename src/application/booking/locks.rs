//! Per-date mutual exclusion for the reservation flow

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per booking date.
///
/// Holding the guard for a date serializes read-existing, validate and
/// save for that date while other dates proceed in parallel.
#[derive(Debug, Default)]
pub struct DateLocks {
    locks: DashMap<NaiveDate, Arc<Mutex<()>>>,
}

impl DateLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, date: NaiveDate) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard lock is released before awaiting.
        let lock = self
            .locks
            .entry(date)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop entries nobody holds or waits on.
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
