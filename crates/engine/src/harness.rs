//! Concurrency harness
//!
//! Runs a fixed pool of OS threads, each draining its own
//! [`WorkGenerator`] through the configured strategy against one shared
//! store, then joins them all and reports.
//!
//! # Failure policy
//!
//! - `NotFound`: logged and counted, the worker moves on to its next item
//! - Store error or exhausted retry budget: the worker stops (fail-fast);
//!   other workers keep going
//! - Conflicts never reach the worker: every append goes through
//!   [`append_with_retry`]

use crate::error::{ConfigError, HarnessError};
use crate::report::{RunReport, WorkerReport};
use crate::work::WorkGenerator;
use docseq_concurrency::{append_with_retry, RetryConfig, Strategy, StrategyKind};
use docseq_core::{DepartmentId, Store};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Harness configuration
///
/// # Example
///
/// ```ignore
/// let config = HarnessConfig::new(StrategyKind::RowLock)
///     .with_workers(10)
///     .with_per_worker(5);
/// let report = Harness::new(config).run(&store)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Number of worker threads
    pub workers: usize,
    /// Operations each worker performs
    pub per_worker: usize,
    /// Departments work is routed over (`1..=departments`)
    pub departments: u32,
    /// Strategy every worker uses
    pub strategy: StrategyKind,
    /// Conflict retry policy
    pub retry: RetryConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            per_worker: 5,
            departments: 3,
            strategy: StrategyKind::Uncoordinated,
            retry: RetryConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Default sizing with the given strategy
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set operations per worker
    pub fn with_per_worker(mut self, per_worker: usize) -> Self {
        self.per_worker = per_worker;
        self
    }

    /// Set the department count
    pub fn with_departments(mut self, departments: u32) -> Self {
        self.departments = departments;
        self
    }

    /// Set the strategy
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.departments == 0 {
            return Err(ConfigError::NoDepartments);
        }
        Ok(())
    }

    /// Operations routed to each department across all workers
    pub fn routed(&self) -> FxHashMap<DepartmentId, usize> {
        WorkGenerator::routed_counts(self.per_worker, self.departments)
            .into_iter()
            .map(|(id, n)| (id, n * self.workers))
            .collect()
    }
}

/// Runs one configuration against a store
#[derive(Debug, Clone)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    /// Create a harness
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// The configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run all workers to completion and report
    ///
    /// The strategy (and its lock handle, if any) is built once here and
    /// shared by every worker.
    pub fn run<S: Store>(&self, store: &S) -> Result<RunReport, HarnessError> {
        let config = &self.config;
        config.validate()?;

        let strategy = Strategy::new(config.strategy);
        let before = store.departments()?;
        // Documents are append-only in commit order; rows past this mark are ours
        let existing = store.documents()?.len();

        info!(
            strategy = %config.strategy,
            workers = config.workers,
            per_worker = config.per_worker,
            departments = config.departments,
            "run starting"
        );
        let started = Instant::now();

        let worker_reports = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(config.workers);
            for worker in 0..config.workers {
                let strategy = strategy.clone();
                let handle = thread::Builder::new()
                    .name(format!("worker-{}", worker))
                    .spawn_scoped(scope, move || run_worker(worker, &strategy, store, config))
                    .map_err(|source| HarnessError::Spawn { worker, source })?;
                handles.push(handle);
            }

            handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle
                        .join()
                        .map_err(|_| HarnessError::WorkerPanicked(worker))
                })
                .collect::<Result<Vec<_>, _>>()
        })?;

        let elapsed = started.elapsed();
        let after = store.departments()?;
        let documents = store.documents()?;

        let report = RunReport {
            strategy: config.strategy,
            workers: config.workers,
            per_worker: config.per_worker,
            attempted: worker_reports.iter().map(|w| w.attempted).sum(),
            committed: worker_reports.iter().map(|w| w.committed).sum(),
            not_found: worker_reports.iter().map(|w| w.not_found).sum(),
            conflicts_retried: worker_reports.iter().map(|w| w.conflicts).sum(),
            elapsed_ms: elapsed.as_millis().min(u64::MAX as u128) as u64,
            departments: RunReport::compare_departments(
                &before,
                &after,
                documents.get(existing..).unwrap_or_default(),
                &config.routed(),
            ),
            worker_reports,
        };

        info!(
            strategy = %config.strategy,
            committed = report.committed,
            documents = report.documents(),
            duplicates = report.duplicate_references(),
            consistent = report.is_consistent(),
            elapsed_ms = report.elapsed_ms,
            "run finished"
        );
        Ok(report)
    }
}

fn run_worker<S: Store>(
    worker: usize,
    strategy: &Strategy,
    store: &S,
    config: &HarnessConfig,
) -> WorkerReport {
    let mut report = WorkerReport {
        worker,
        ..Default::default()
    };

    let generator = match WorkGenerator::new(config.per_worker, config.departments) {
        Ok(generator) => generator,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        }
    };

    for item in generator {
        report.attempted += 1;
        match append_with_retry(
            strategy,
            store,
            item.department,
            &item.content,
            &config.retry,
        ) {
            Ok(committed) => {
                report.committed += 1;
                report.conflicts += committed.conflicts();
            }
            Err(e) if e.is_item_local() => {
                warn!(worker, index = item.index, error = %e, "work item skipped");
                report.not_found += 1;
            }
            Err(e) => {
                error!(worker, index = item.index, error = %e, "worker aborting");
                report.error = Some(e.to_string());
                break;
            }
        }
    }

    debug!(
        worker,
        committed = report.committed,
        conflicts = report.conflicts,
        "worker finished"
    );
    report
}
