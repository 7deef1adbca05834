//! Run reports
//!
//! A [`RunReport`] compares what a run should have produced (operations
//! routed to each department) with what the store actually holds afterwards,
//! so the baseline's anomaly shows up as a mismatch.

use docseq_concurrency::StrategyKind;
use docseq_core::{Department, DepartmentId, Document, Reference};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::fmt;

/// Outcome counters of one worker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    /// Worker index
    pub worker: usize,
    /// Work items started
    pub attempted: usize,
    /// Work items committed
    pub committed: usize,
    /// Work items whose department did not exist
    pub not_found: usize,
    /// Conflicts that were retried
    pub conflicts: usize,
    /// Error that stopped the worker early
    pub error: Option<String>,
}

/// Expected vs actual state of one department after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentReport {
    /// Department id
    pub id: DepartmentId,
    /// Reference prefix
    pub code: String,
    /// `serial_num` before the run
    pub initial_serial: u64,
    /// `serial_num` after the run
    pub final_serial: u64,
    /// Operations the generators routed to this department
    pub routed: usize,
    /// Documents the run added for this department
    pub documents: usize,
    /// Added documents whose reference another added document already used
    pub duplicate_references: usize,
}

impl DepartmentReport {
    /// Counter advanced by exactly the routed operations
    pub fn counter_consistent(&self) -> bool {
        self.final_serial == self.initial_serial + self.routed as u64
    }

    /// Counter, document count and reference uniqueness all check out
    pub fn is_consistent(&self) -> bool {
        self.counter_consistent()
            && self.documents == self.routed
            && self.duplicate_references == 0
    }
}

/// Aggregate outcome of a harness run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Strategy used
    pub strategy: StrategyKind,
    /// Worker count
    pub workers: usize,
    /// Operations per worker
    pub per_worker: usize,
    /// Work items started across all workers
    pub attempted: usize,
    /// Work items committed
    pub committed: usize,
    /// Work items that hit a missing department
    pub not_found: usize,
    /// Conflicts retried across all workers
    pub conflicts_retried: usize,
    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
    /// Per-worker counters
    pub worker_reports: Vec<WorkerReport>,
    /// Per-department comparison, ordered by id
    pub departments: Vec<DepartmentReport>,
}

impl RunReport {
    /// Build the department comparison from before/after snapshots
    ///
    /// `documents` holds only the rows committed during the run.
    pub(crate) fn compare_departments(
        before: &[Department],
        after: &[Department],
        documents: &[Document],
        routed: &FxHashMap<DepartmentId, usize>,
    ) -> Vec<DepartmentReport> {
        let mut by_department: FxHashMap<DepartmentId, Vec<&Reference>> = FxHashMap::default();
        for doc in documents {
            by_department
                .entry(doc.department_id)
                .or_default()
                .push(&doc.reference);
        }

        after
            .iter()
            .map(|row| {
                let initial_serial = before
                    .iter()
                    .find(|b| b.id == row.id)
                    .map(|b| b.serial_num)
                    .unwrap_or(row.serial_num);
                let refs = by_department.get(&row.id).map(Vec::as_slice).unwrap_or(&[]);
                let unique: FxHashSet<&Reference> = refs.iter().copied().collect();
                DepartmentReport {
                    id: row.id,
                    code: row.code.clone(),
                    initial_serial,
                    final_serial: row.serial_num,
                    routed: routed.get(&row.id).copied().unwrap_or(0),
                    documents: refs.len(),
                    duplicate_references: refs.len() - unique.len(),
                }
            })
            .collect()
    }

    /// Total operations routed to existing departments
    pub fn expected_documents(&self) -> usize {
        self.departments.iter().map(|d| d.routed).sum()
    }

    /// Documents the run added
    pub fn documents(&self) -> usize {
        self.departments.iter().map(|d| d.documents).sum()
    }

    /// Duplicate references across all departments
    pub fn duplicate_references(&self) -> usize {
        self.departments.iter().map(|d| d.duplicate_references).sum()
    }

    /// Workers that stopped early
    pub fn failed_workers(&self) -> impl Iterator<Item = &WorkerReport> {
        self.worker_reports.iter().filter(|w| w.error.is_some())
    }

    /// Every department matches its expected state
    pub fn is_consistent(&self) -> bool {
        self.departments.iter().all(DepartmentReport::is_consistent)
    }

    /// Look up one department's row
    pub fn department(&self, id: DepartmentId) -> Option<&DepartmentReport> {
        self.departments.iter().find(|d| d.id == id)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "strategy: {}  workers: {}  per worker: {}  elapsed: {}ms",
            self.strategy, self.workers, self.per_worker, self.elapsed_ms
        )?;
        writeln!(
            f,
            "attempted: {}  committed: {}  not found: {}  conflicts retried: {}",
            self.attempted, self.committed, self.not_found, self.conflicts_retried
        )?;
        writeln!(
            f,
            "{:>4}  {:<6} {:>8} {:>8} {:>8} {:>6} {:>5}  {}",
            "id", "code", "initial", "final", "expected", "docs", "dups", "status"
        )?;
        for d in &self.departments {
            writeln!(
                f,
                "{:>4}  {:<6} {:>8} {:>8} {:>8} {:>6} {:>5}  {}",
                d.id,
                d.code,
                d.initial_serial,
                d.final_serial,
                d.initial_serial + d.routed as u64,
                d.documents,
                d.duplicate_references,
                if d.is_consistent() { "ok" } else { "MISMATCH" }
            )?;
        }
        for w in self.failed_workers() {
            writeln!(
                f,
                "worker {} stopped after {} items: {}",
                w.worker,
                w.attempted,
                w.error.as_deref().unwrap_or_default()
            )?;
        }
        write!(
            f,
            "documents: {}/{}  duplicates: {}  => {}",
            self.documents(),
            self.expected_documents(),
            self.duplicate_references(),
            if self.is_consistent() {
                "consistent"
            } else {
                "INCONSISTENT"
            }
        )
    }
}
