//! Optimistic strategy: version-guarded conditional update
//!
//! Reads `serial_num, code, version` without locking, then issues
//! `UPDATE ... WHERE id = ? AND version = ?`. Zero affected rows means
//! another transaction committed in between: the attempt rolls back without
//! inserting and reports [`AppendOutcome::Conflict`].
//!
//! A conflict is an expected outcome, not an error. Callers must retry the
//! whole operation; [`append_with_retry`](crate::retry::append_with_retry)
//! does that.

use crate::strategy::AppendOutcome;
use docseq_core::{
    AppendError, DepartmentId, Document, ReadMode, Reference, Store, Transaction,
};
use tracing::debug;

/// Make one optimistic append attempt
pub fn append<S: Store>(
    store: &S,
    department: DepartmentId,
    content: &str,
) -> Result<AppendOutcome, AppendError> {
    let mut txn = store.begin()?;

    let Some(row) = txn.select_department(department, ReadMode::Plain)? else {
        txn.rollback()?;
        return Err(AppendError::NotFound(department));
    };

    if txn.increment_serial_if_version(department, row.version)? == 0 {
        let txn_id = txn.id();
        txn.rollback()?;
        debug!(txn_id, %department, version = row.version, "optimistic update lost the race");
        return Ok(AppendOutcome::Conflict);
    }

    let reference = Reference::for_current_year(&row.code, row.serial_num);
    txn.insert_document(Document {
        department_id: department,
        reference: reference.clone(),
        content: content.to_string(),
    })?;

    let txn_id = txn.id();
    txn.commit()?;
    debug!(txn_id, %department, %reference, "document appended");
    Ok(AppendOutcome::Committed(reference))
}
