//! # Docseq
//!
//! Per-department document serial allocation under concurrent writers.
//!
//! Every department owns a counter. Appending a document reads the counter,
//! derives the reference `"{code}/{serial}/{year}"`, advances the counter and
//! inserts the document, all in one transaction. Docseq runs that operation
//! under four strategies and checks which of them keep references unique:
//!
//! | Strategy | Coordination | Sound |
//! |----------|--------------|-------|
//! | `uncoordinated` | none | no |
//! | `application-lock` | one process-wide mutex | yes |
//! | `row-lock` | `FOR UPDATE` on the department row | yes |
//! | `optimistic` | version compare-and-swap, retried | yes |
//!
//! ## Quick Start
//!
//! ```ignore
//! use docseq::prelude::*;
//!
//! let db = Docseq::open()?;
//!
//! // One append
//! let strategy = Strategy::new(StrategyKind::RowLock);
//! let committed = db.append(&strategy, DepartmentId(1), "Invoice")?;
//! println!("{}", committed.reference);
//!
//! // A whole experiment: 10 workers x 5 appends
//! let report = db.run(RunMode::Optimistic)?;
//! assert!(report.is_consistent());
//! ```

#![warn(missing_docs)]

mod database;
mod error;

pub mod prelude;

pub use database::{Docseq, DocseqBuilder};
pub use error::{Error, Result};

pub use docseq_concurrency::{
    ApplicationLock, AppendOutcome, Committed, RetryConfig, Strategy, StrategyKind,
};
pub use docseq_core::{current_year, Department, DepartmentId, Document, Reference};
pub use docseq_engine::{
    DepartmentReport, Harness, HarnessConfig, RunMode, RunReport, WorkGenerator, WorkItem,
    WorkerReport,
};
pub use docseq_storage::{MemoryStore, StoreConfig};
