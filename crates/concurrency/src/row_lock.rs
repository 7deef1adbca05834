//! Pessimistic row-locking strategy
//!
//! Same sequence as the baseline, but the read is `SELECT ... FOR UPDATE`.
//! The row lock is held until commit, so operations on one department run
//! one at a time while other departments proceed concurrently. The store
//! does the waiting; no retries are needed.

use crate::increment::increment_and_insert;
use crate::strategy::AppendOutcome;
use docseq_core::{AppendError, DepartmentId, ReadMode, Store};

/// Append a document under the department's row lock
pub fn append<S: Store>(
    store: &S,
    department: DepartmentId,
    content: &str,
) -> Result<AppendOutcome, AppendError> {
    increment_and_insert(store, department, content, ReadMode::ForUpdate)
}
