//! Baseline strategy: no coordination
//!
//! A plain read followed by an unconditional increment. Two workers can read
//! the same `serial_num` before either commits; both then insert a document
//! with the same reference. The counter itself still advances once per
//! operation because the UPDATE re-reads the row under its lock, so the
//! anomaly shows up as duplicate references.
//!
//! Kept as the control that the other strategies are measured against.

use crate::increment::increment_and_insert;
use crate::strategy::AppendOutcome;
use docseq_core::{AppendError, DepartmentId, ReadMode, Store};

/// Append a document without any coordination
pub fn append<S: Store>(
    store: &S,
    department: DepartmentId,
    content: &str,
) -> Result<AppendOutcome, AppendError> {
    increment_and_insert(store, department, content, ReadMode::Plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docseq_core::{current_year, Reference};
    use docseq_storage::MemoryStore;

    #[test]
    fn test_sequential_appends_are_sound() {
        let store = MemoryStore::new();
        let d = DepartmentId(1);
        for expected in 1..=3u64 {
            let outcome = append(&store, d, "doc").unwrap();
            assert_eq!(
                outcome,
                AppendOutcome::Committed(Reference::new("ACC", expected, current_year()))
            );
        }
        assert_eq!(store.department(d).unwrap().serial_num, 4);
        assert_eq!(store.documents().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_department_inserts_nothing() {
        let store = MemoryStore::new();
        let err = append(&store, DepartmentId(9), "doc").unwrap_err();
        assert_eq!(err, AppendError::NotFound(DepartmentId(9)));
        assert!(store.documents().unwrap().is_empty());
    }

    #[test]
    fn test_does_not_touch_version() {
        let store = MemoryStore::new();
        append(&store, DepartmentId(2), "doc").unwrap();
        assert_eq!(store.department(DepartmentId(2)).unwrap().version, 0);
    }
}
