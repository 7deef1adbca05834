//! Store contract
//!
//! Strategies are written against these traits rather than a concrete
//! store. The contract is that of a transactional relational store holding
//! two tables:
//!
//! ```text
//! department(id PK, code, serial_num, version)
//! document(department_id FK, reference, content)
//! ```
//!
//! Required capabilities:
//! - transactions with commit / rollback
//! - a locking read (`SELECT ... FOR UPDATE`)
//! - updates that report the number of affected rows, including a
//!   conditional update guarded by the version column

use crate::error::StoreResult;
use crate::types::{Department, DepartmentId, DepartmentRow, Document, NewDocument};

/// How a department row is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Non-locking read of the last committed state
    Plain,
    /// Locking read; holds the row's exclusive lock until the transaction ends
    ForUpdate,
}

/// A single store transaction
///
/// Dropping a transaction that was neither committed nor rolled back rolls
/// it back.
pub trait Transaction {
    /// Transaction id, for logging
    fn id(&self) -> u64;

    /// `SELECT serial_num, code, version FROM department WHERE id = ?`
    ///
    /// Returns `None` when the row does not exist.
    fn select_department(
        &mut self,
        id: DepartmentId,
        mode: ReadMode,
    ) -> StoreResult<Option<DepartmentRow>>;

    /// `UPDATE department SET serial_num = serial_num + 1 WHERE id = ?`
    ///
    /// Returns the number of affected rows.
    fn increment_serial(&mut self, id: DepartmentId) -> StoreResult<u64>;

    /// `UPDATE department SET serial_num = serial_num + 1, version = version + 1
    ///  WHERE id = ? AND version = ?`
    ///
    /// Returns the number of affected rows; zero means the version token is
    /// stale (or the row is gone).
    fn increment_serial_if_version(
        &mut self,
        id: DepartmentId,
        expected_version: u64,
    ) -> StoreResult<u64>;

    /// `INSERT INTO document(department_id, reference, content) VALUES (...)`
    fn insert_document(&mut self, document: NewDocument) -> StoreResult<()>;

    /// Publish all writes atomically and release row locks
    fn commit(self) -> StoreResult<()>
    where
        Self: Sized;

    /// Discard all writes and release row locks
    fn rollback(self) -> StoreResult<()>
    where
        Self: Sized;
}

/// A shared handle to the store
///
/// Implementations must allow many transactions to be open at once from
/// different threads.
pub trait Store: Send + Sync {
    /// Transaction type handed out by [`Store::begin`]
    type Txn<'a>: Transaction
    where
        Self: 'a;

    /// Begin a new transaction
    fn begin(&self) -> StoreResult<Self::Txn<'_>>;

    /// Committed department rows, ordered by id
    fn departments(&self) -> StoreResult<Vec<Department>>;

    /// Committed documents, in commit order
    fn documents(&self) -> StoreResult<Vec<Document>>;

    /// Truncate documents and reset every department's serial number
    fn reset(&self) -> StoreResult<()>;
}
