//! Shared read → increment → insert sequence
//!
//! The uncoordinated, application-lock and row-lock strategies all run this
//! same transaction; they differ only in the read mode and in what happens
//! around it.

use crate::strategy::AppendOutcome;
use docseq_core::{
    AppendError, DepartmentId, Document, ReadMode, Reference, Store, Transaction,
};
use tracing::debug;

/// Run one unconditional increment transaction
///
/// 1. `SELECT serial_num, code FROM department WHERE id = ?` (optionally `FOR UPDATE`)
/// 2. Missing row: roll back, `NotFound`
/// 3. `UPDATE department SET serial_num = serial_num + 1`
/// 4. Insert the document referencing the serial read in step 1
/// 5. Commit
///
/// Any store error drops the transaction, which rolls it back.
pub(crate) fn increment_and_insert<S: Store>(
    store: &S,
    department: DepartmentId,
    content: &str,
    mode: ReadMode,
) -> Result<AppendOutcome, AppendError> {
    let mut txn = store.begin()?;

    let Some(row) = txn.select_department(department, mode)? else {
        txn.rollback()?;
        return Err(AppendError::NotFound(department));
    };

    txn.increment_serial(department)?;

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
