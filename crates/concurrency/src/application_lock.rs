//! Client-side mutual exclusion strategy
//!
//! Wraps the baseline sequence in one process-wide critical section. The
//! lock is global across departments: it removes the duplicate-reference
//! anomaly but serializes every worker, even those touching unrelated
//! departments. Waiting is unbounded.

use crate::strategy::AppendOutcome;
use crate::uncoordinated;
use docseq_core::{AppendError, DepartmentId, Store};
use parking_lot::Mutex;
use std::sync::Arc;

/// Handle to the shared critical section
///
/// Created once by whoever owns the run and cloned into every worker; all
/// clones guard the same section.
#[derive(Debug, Clone, Default)]
pub struct ApplicationLock {
    section: Arc<Mutex<()>>,
}

impl ApplicationLock {
    /// Create a new, independent lock
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document while holding the section
    pub fn append<S: Store>(
        &self,
        store: &S,
        department: DepartmentId,
        content: &str,
    ) -> Result<AppendOutcome, AppendError> {
        let _section = self.section.lock();
        uncoordinated::append(store, department, content)
    }

    /// Whether some worker is inside the section right now
    pub fn is_held(&self) -> bool {
        self.section.is_locked()
    }

    /// Whether two handles guard the same section
    pub fn same_section(&self, other: &ApplicationLock) -> bool {
        Arc::ptr_eq(&self.section, &other.section)
    }
}
