//! Test-only store that commits a competing write between an attempt's read
//! and its update.

use docseq_core::{
    Department, DepartmentId, DepartmentRow, Document, NewDocument, ReadMode, Store, StoreResult,
    Transaction,
};
use docseq_storage::{MemoryStore, MemoryTransaction};
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) struct InterferingStore {
    inner: MemoryStore,
    remaining: AtomicUsize,
}

impl InterferingStore {
    /// Interfere with the next `times` plain reads
    pub(crate) fn new(times: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            remaining: AtomicUsize::new(times),
        }
    }

    pub(crate) fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn take_turn(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

pub(crate) struct InterferingTxn<'a> {
    store: &'a InterferingStore,
    txn: MemoryTransaction<'a>,
}

impl<'a> Transaction for InterferingTxn<'a> {
    fn id(&self) -> u64 {
        self.txn.id()
    }

    fn select_department(
        &mut self,
        id: DepartmentId,
        mode: ReadMode,
    ) -> StoreResult<Option<DepartmentRow>> {
        let row = self.txn.select_department(id, mode)?;
        if let Some(seen) = &row {
            if mode == ReadMode::Plain && self.store.take_turn() {
                let mut rival = self.store.inner.begin()?;
                rival.increment_serial_if_version(id, seen.version)?;
                rival.commit()?;
            }
        }
        Ok(row)
    }

    fn increment_serial(&mut self, id: DepartmentId) -> StoreResult<u64> {
        self.txn.increment_serial(id)
    }

    fn increment_serial_if_version(
        &mut self,
        id: DepartmentId,
        expected_version: u64,
    ) -> StoreResult<u64> {
        self.txn.increment_serial_if_version(id, expected_version)
    }

    fn insert_document(&mut self, document: NewDocument) -> StoreResult<()> {
        self.txn.insert_document(document)
    }

    fn commit(self) -> StoreResult<()> {
        self.txn.commit()
    }

    fn rollback(self) -> StoreResult<()> {
        self.txn.rollback()
    }
}

impl Store for InterferingStore {
    type Txn<'a> = InterferingTxn<'a>;

    fn begin(&self) -> StoreResult<InterferingTxn<'_>> {
        Ok(InterferingTxn {
            store: self,
            txn: self.inner.begin()?,
        })
    }

    fn departments(&self) -> StoreResult<Vec<Department>> {
        self.inner.departments()
    }

    fn documents(&self) -> StoreResult<Vec<Document>> {
        self.inner.documents()
    }

    fn reset(&self) -> StoreResult<()> {
        self.inner.reset()
    }
}
