//! Shared helpers for docseq integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::time::Duration;

use docseq::prelude::*;
use docseq::{Department, Document};

/// Statement latency used to widen race windows in contention tests
pub const RACE_LATENCY: Duration = Duration::from_millis(1);

/// Database with the default three departments and no latency
pub fn create_db() -> Docseq {
    Docseq::builder()
        .open()
        .expect("Failed to open database")
}

/// Database with `departments` rows and the race latency applied
pub fn create_contended_db(departments: u32) -> Docseq {
    Docseq::builder()
        .departments(departments)
        .statement_latency(RACE_LATENCY)
        .retry(RetryConfig::unbounded())
        .open()
        .expect("Failed to open database")
}

/// Documents belonging to one department
pub fn documents_for(docs: &[Document], department: DepartmentId) -> Vec<&Document> {
    docs.iter()
        .filter(|d| d.department_id == department)
        .collect()
}

/// Count of references that appear more than once
pub fn duplicate_count(docs: &[Document]) -> usize {
    let unique: HashSet<&str> = docs.iter().map(|d| d.reference.as_str()).collect();
    docs.len() - unique.len()
}

/// Serial numbers embedded in the references of `docs`, sorted
pub fn serials(docs: &[&Document]) -> Vec<u64> {
    let mut serials: Vec<u64> = docs
        .iter()
        .map(|d| {
            let mut parts = d.reference.as_str().split('/');
            parts.nth(1).expect("reference has a serial").parse().expect("serial is numeric")
        })
        .collect();
    serials.sort_unstable();
    serials
}

/// Department row by id
pub fn department(db: &Docseq, id: u32) -> Department {
    db.departments()
        .unwrap()
        .into_iter()
        .find(|d| d.id == DepartmentId(id))
        .expect("department exists")
}

/// The three strategies that must keep references unique
pub fn sound_strategies() -> Vec<StrategyKind> {
    StrategyKind::ALL
        .into_iter()
        .filter(StrategyKind::is_sound)
        .collect()
}
