//! Row-level exclusive locks
//!
//! One lock entry per department row, held by a transaction id until that
//! transaction commits or rolls back. Entries live in a DashMap so waiting
//! on one row never blocks lookups for another.

use dashmap::DashMap;
use docseq_core::DepartmentId;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

#[derive(Debug, Default)]
struct RowLock {
    owner: Mutex<Option<u64>>,
    released: Condvar,
}

/// Exclusive row locks keyed by department
#[derive(Debug, Default)]
pub struct RowLocks {
    rows: DashMap<DepartmentId, Arc<RowLock>>,
}

impl RowLocks {
    /// Create an empty lock table
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock on `row` for transaction `txn`
    ///
    /// Blocks while another transaction holds it. Re-entrant for the holder.
    /// Returns `true` if the lock was newly acquired, `false` if `txn`
    /// already held it.
    pub fn acquire(&self, row: DepartmentId, txn: u64) -> bool {
        // Clone the entry out so the shard guard is not held while waiting
        let lock = Arc::clone(self.rows.entry(row).or_default().value());
        let mut owner = lock.owner.lock();
        loop {
            match *owner {
                None => {
                    *owner = Some(txn);
                    return true;
                }
                Some(holder) if holder == txn => return false,
                Some(_) => lock.released.wait(&mut owner),
            }
        }
    }

    /// Release the lock on `row` if `txn` holds it
    pub fn release(&self, row: DepartmentId, txn: u64) {
        let Some(lock) = self.rows.get(&row).map(|entry| Arc::clone(entry.value())) else {
            return;
        };
        let mut owner = lock.owner.lock();
        if *owner == Some(txn) {
            *owner = None;
            lock.released.notify_one();
        }
    }

    /// Transaction currently holding the lock on `row`
    pub fn holder(&self, row: DepartmentId) -> Option<u64> {
        let lock = self.rows.get(&row).map(|entry| Arc::clone(entry.value()))?;
        let owner = *lock.owner.lock();
        owner
    }
}
