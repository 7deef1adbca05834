//! In-process transactional store
//!
//! `MemoryStore` models the department/document schema with the semantics
//! the strategies rely on:
//!
//! - Plain reads see the last committed row plus the transaction's own
//!   writes (read committed). They never block.
//! - `FOR UPDATE` reads and every UPDATE take the row's exclusive lock and
//!   keep it until commit or rollback. An UPDATE evaluates against the
//!   latest committed row once the lock is granted, so a conditional update
//!   whose version token went stale affects zero rows.
//! - Writes are buffered per transaction and published atomically on commit.
//!
//! # Lock ordering
//!
//! Committed tables are guarded by two RwLocks, always taken in the order
//! `departments` → `documents`. Row locks are never acquired while holding
//! either table lock.

use crate::config::StoreConfig;
use crate::locks::RowLocks;
use docseq_core::{
    Department, DepartmentId, DepartmentRow, Document, NewDocument, ReadMode, Store, StoreError,
    StoreResult, Transaction,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// In-memory department/document store
///
/// # Thread Safety
///
/// Share it behind an `Arc` (or a plain reference with scoped threads); any
/// number of transactions may be open concurrently.
#[derive(Debug)]
pub struct MemoryStore {
    config: StoreConfig,
    departments: RwLock<FxHashMap<DepartmentId, Department>>,
    documents: RwLock<Vec<Document>>,
    row_locks: RowLocks,
    next_txn_id: AtomicU64,
    closed: AtomicBool,
}

impl MemoryStore {
    /// Create a store seeded with the default departments
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store from a configuration
    pub fn with_config(config: StoreConfig) -> Self {
        let departments = config
            .departments
            .iter()
            .map(|seed| {
                let row = Department::new(seed.id, seed.code.clone(), config.initial_serial);
                (row.id, row)
            })
            .collect();

        Self {
            config,
            departments: RwLock::new(departments),
            documents: RwLock::new(Vec::new()),
            row_locks: RowLocks::new(),
            next_txn_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        }
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Close the connection
    ///
    /// New transactions and statements on open transactions fail with
    /// [`StoreError::Closed`]. Commit and rollback of already-open
    /// transactions still run so row locks are released.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Reopen a closed connection
    pub fn reopen(&self) {
        self.closed.store(false, Ordering::SeqCst);
    }

    /// Whether the connection is closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Committed state of one department
    pub fn department(&self, id: DepartmentId) -> Option<Department> {
        self.departments.read().get(&id).cloned()
    }

    /// Transaction holding the row lock on a department, if any
    pub fn lock_holder(&self, id: DepartmentId) -> Option<u64> {
        self.row_locks.holder(id)
    }

    fn check_open(&self) -> StoreResult<()> {
        if self.is_closed() {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }

    /// Simulated client/server round trip
    fn round_trip(&self) {
        let latency = self.config.statement_latency();
        if !latency.is_zero() {
            std::thread::sleep(latency);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    type Txn<'a> = MemoryTransaction<'a>;

    fn begin(&self) -> StoreResult<MemoryTransaction<'_>> {
        self.check_open()?;
        let id = self.next_txn_id.fetch_add(1, Ordering::Relaxed);
        debug!(txn_id = id, "begin");
        Ok(MemoryTransaction {
            store: self,
            id,
            writes: FxHashMap::default(),
            inserts: Vec::new(),
            held: Vec::new(),
            finished: false,
        })
    }

    fn departments(&self) -> StoreResult<Vec<Department>> {
        let mut rows: Vec<Department> = self.departments.read().values().cloned().collect();
        rows.sort_by_key(|d| d.id);
        Ok(rows)
    }

    fn documents(&self) -> StoreResult<Vec<Document>> {
        Ok(self.documents.read().clone())
    }

    fn reset(&self) -> StoreResult<()> {
        self.check_open()?;
        let mut departments = self.departments.write();
        let mut documents = self.documents.write();
        let removed = documents.len();
        documents.clear();
        for row in departments.values_mut() {
            row.serial_num = self.config.initial_serial;
        }
        debug!(documents_removed = removed, "store reset");
        Ok(())
    }
}

/// Transaction on a [`MemoryStore`]
///
/// Dropping it without commit rolls back.
pub struct MemoryTransaction<'a> {
    store: &'a MemoryStore,
    id: u64,
    /// Department rows written by this transaction (full row images)
    writes: FxHashMap<DepartmentId, Department>,
    /// Documents inserted by this transaction
    inserts: Vec<Document>,
    /// Row locks held
    held: Vec<DepartmentId>,
    finished: bool,
}

impl<'a> MemoryTransaction<'a> {
    /// Row as visible to this transaction
    fn visible_row(&self, id: DepartmentId) -> Option<Department> {
        self.writes
            .get(&id)
            .cloned()
            .or_else(|| self.store.department(id))
    }

    fn lock_row(&mut self, id: DepartmentId) {
        if self.store.row_locks.acquire(id, self.id) {
            self.held.push(id);
        }
    }

    fn release_locks(&mut self) {
        for row in self.held.drain(..) {
            self.store.row_locks.release(row, self.id);
        }
    }

    fn statement(&self) -> StoreResult<()> {
        self.store.check_open()?;
        self.store.round_trip();
        self.store.check_open()
    }

    fn finish_rollback(&mut self) {
        self.writes.clear();
        self.inserts.clear();
        self.release_locks();
        self.finished = true;
    }
}

impl<'a> Transaction for MemoryTransaction<'a> {
    fn id(&self) -> u64 {
        self.id
    }

    fn select_department(
        &mut self,
        id: DepartmentId,
        mode: ReadMode,
    ) -> StoreResult<Option<DepartmentRow>> {
        self.statement()?;
        if mode == ReadMode::ForUpdate {
            self.lock_row(id);
        }
        Ok(self.visible_row(id).map(|row| DepartmentRow {
            serial_num: row.serial_num,
            code: row.code,
            version: row.version,
        }))
    }

    fn increment_serial(&mut self, id: DepartmentId) -> StoreResult<u64> {
        self.statement()?;
        self.lock_row(id);
        match self.visible_row(id) {
            Some(mut row) => {
                row.serial_num += 1;
                self.writes.insert(id, row);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn increment_serial_if_version(
        &mut self,
        id: DepartmentId,
        expected_version: u64,
    ) -> StoreResult<u64> {
        self.statement()?;
        self.lock_row(id);
        match self.visible_row(id) {
            Some(mut row) if row.version == expected_version => {
                row.serial_num += 1;
                row.version += 1;
                self.writes.insert(id, row);
                Ok(1)
            }
            Some(row) => {
                debug!(
                    txn_id = self.id,
                    department = %id,
                    expected_version,
                    actual_version = row.version,
                    "conditional update matched no rows"
                );
                Ok(0)
            }
            None => Ok(0),
        }
    }

    fn insert_document(&mut self, document: NewDocument) -> StoreResult<()> {
        self.statement()?;
        if self.visible_row(document.department_id).is_none() {
            return Err(StoreError::ForeignKey(document.department_id));
        }
        self.inserts.push(document);
        Ok(())
    }

    fn commit(mut self) -> StoreResult<()> {
        self.store.round_trip();
        {
            let mut departments = self.store.departments.write();
            let mut documents = self.store.documents.write();
            for (id, row) in self.writes.drain() {
                departments.insert(id, row);
            }
            documents.append(&mut self.inserts);
        }
        self.release_locks();
        self.finished = true;
        debug!(txn_id = self.id, "commit");
        Ok(())
    }

    fn rollback(mut self) -> StoreResult<()> {
        self.store.round_trip();
        self.finish_rollback();
        debug!(txn_id = self.id, "rollback");
        Ok(())
    }
}

impl<'a> Drop for MemoryTransaction<'a> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish_rollback();
            debug!(txn_id = self.id, "rolled back on drop");
        }
    }
}
