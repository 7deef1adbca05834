//! Main entry point for Docseq.
//!
//! This module provides the `Docseq` struct, which owns the store and runs
//! appends and harness experiments against it.

use crate::error::Result;
use docseq_concurrency::{append_with_retry, Committed, RetryConfig, Strategy};
use docseq_core::{Department, DepartmentId, Document, Store};
use docseq_engine::{Harness, HarnessConfig, RunMode, RunReport};
use docseq_storage::{MemoryStore, StoreConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// A document sequencing database.
///
/// Create one with [`Docseq::open`] or [`Docseq::builder`]. Cloning shares
/// the underlying store.
///
/// # Example
///
/// ```ignore
/// use docseq::prelude::*;
///
/// let db = Docseq::open()?;
/// let report = db.run(RunMode::RowLock)?;
/// assert!(report.is_consistent());
/// ```
#[derive(Debug, Clone)]
pub struct Docseq {
    store: Arc<MemoryStore>,
    retry: RetryConfig,
}

impl Docseq {
    /// Open a database with default settings.
    ///
    /// Seeds departments 1..=3 with serial 1 and no statement latency.
    pub fn open() -> Result<Self> {
        Self::builder().open()
    }

    /// Create a builder for database configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Docseq::builder()
    ///     .departments(2)
    ///     .statement_latency(Duration::from_millis(1))
    ///     .open()?;
    /// ```
    pub fn builder() -> DocseqBuilder {
        DocseqBuilder::new()
    }

    /// Append one document using the given strategy.
    ///
    /// Conflicts are retried with the database's retry policy.
    ///
    /// Each [`Strategy::new`] call for `ApplicationLock` creates its own
    /// lock. Build the strategy once and clone it into every thread that
    /// should serialize on the same lock, as [`Harness::run`] does.
    pub fn append(
        &self,
        strategy: &Strategy,
        department: DepartmentId,
        content: &str,
    ) -> Result<Committed> {
        append_with_retry(strategy, &*self.store, department, content, &self.retry)
            .map_err(Into::into)
    }

    /// Reset, then run one of the canned modes.
    pub fn run(&self, mode: RunMode) -> Result<RunReport> {
        info!(mode = %mode, "running mode");
        self.reset()?;
        self.run_with(mode.config().with_retry(self.retry.clone()))
    }

    /// Run an arbitrary harness configuration against the current state.
    ///
    /// Does not reset first.
    pub fn run_with(&self, config: HarnessConfig) -> Result<RunReport> {
        Harness::new(config).run(&*self.store).map_err(Into::into)
    }

    /// Delete every document and restore every serial to its initial value.
    pub fn reset(&self) -> Result<()> {
        self.store.reset().map_err(Into::into)
    }

    /// Current department rows, ordered by id.
    pub fn departments(&self) -> Result<Vec<Department>> {
        self.store.departments().map_err(Into::into)
    }

    /// Every committed document, in commit order.
    pub fn documents(&self) -> Result<Vec<Document>> {
        self.store.documents().map_err(Into::into)
    }

    /// Number of seeded departments.
    pub fn department_count(&self) -> u32 {
        self.store.config().departments.len() as u32
    }

    /// Retry policy applied to optimistic appends.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// The underlying store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}

/// Builder for database configuration.
///
/// # Example
///
/// ```ignore
/// let db = Docseq::builder()
///     .departments(1)
///     .retry(RetryConfig::unbounded())
///     .open()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocseqBuilder {
    store: StoreConfig,
    retry: RetryConfig,
}

impl DocseqBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed departments `1..=count`.
    pub fn departments(mut self, count: u32) -> Self {
        self.store = self.store.with_department_count(count);
        self
    }

    /// Serial number departments start at and return to on reset.
    pub fn initial_serial(mut self, serial: u64) -> Self {
        self.store = self.store.with_initial_serial(serial);
        self
    }

    /// Simulated round-trip latency per store statement.
    pub fn statement_latency(mut self, latency: Duration) -> Self {
        self.store = self.store.with_statement_latency(latency);
        self
    }

    /// Replace the whole store configuration.
    pub fn store_config(mut self, config: StoreConfig) -> Self {
        self.store = config;
        self
    }

    /// Retry policy for optimistic appends.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Open the database.
    pub fn open(self) -> Result<Docseq> {
        info!(
            departments = self.store.departments.len(),
            latency_us = self.store.statement_latency_us,
            "opening store"
        );
        Ok(Docseq {
            store: Arc::new(MemoryStore::with_config(self.store)),
            retry: self.retry,
        })
    }
}
