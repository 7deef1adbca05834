//! Optimistic conflicts and retry

use crate::common::*;
use docseq::prelude::*;
use docseq::AppendOutcome;
use docseq_core::{ReadMode, Store, Transaction};

#[test]
fn test_contended_optimistic_run_retries_and_converges() {
    let db = create_contended_db(1);
    let config = HarnessConfig::new(StrategyKind::Optimistic)
        .with_workers(10)
        .with_per_worker(5)
        .with_departments(1)
        .with_retry(RetryConfig::unbounded());
    let report = db.run_with(config).unwrap();

    assert!(report.is_consistent(), "{}", report);
    assert_eq!(report.committed, 50);
    assert!(report.conflicts_retried > 0, "10 writers on one row must collide");

    let row = department(&db, 1);
    assert_eq!(row.serial_num, 51);
    assert_eq!(row.version, 50, "one version bump per committed append");
}

#[test]
fn test_single_attempt_reports_conflict_without_side_effects() {
    let db = create_db();
    let store = db.store();

    // Start an attempt by hand, let a rival commit in between
    let mut txn = store.begin().unwrap();
    let row = txn
        .select_department(DepartmentId(1), ReadMode::Plain)
        .unwrap()
        .unwrap();

    let rival = db
        .append(&Strategy::new(StrategyKind::Optimistic), DepartmentId(1), "rival")
        .unwrap();
    assert_eq!(rival.attempts, 1);

    assert_eq!(
        txn.increment_serial_if_version(DepartmentId(1), row.version).unwrap(),
        0
    );
    txn.rollback().unwrap();

    assert_eq!(db.documents().unwrap().len(), 1);
    assert_eq!(department(&db, 1).serial_num, 2);
}

#[test]
fn test_strategy_attempt_is_single_shot() {
    let db = create_db();
    let outcome = Strategy::new(StrategyKind::Optimistic)
        .append(db.store(), DepartmentId(3), "once")
        .unwrap();
    assert!(matches!(outcome, AppendOutcome::Committed(_)));
    assert!(!outcome.is_conflict());
}

#[test]
fn test_exhausted_budget_fails_the_worker() {
    // No retries and heavy contention: some worker gives up
    let db = create_contended_db(1);
    let config = HarnessConfig::new(StrategyKind::Optimistic)
        .with_workers(10)
        .with_per_worker(5)
        .with_departments(1)
        .with_retry(RetryConfig::no_retry());
    let report = db.run_with(config).unwrap();

    let failed: Vec<_> = report.failed_workers().collect();
    assert!(!failed.is_empty(), "{}", report);
    for worker in &failed {
        assert!(worker.error.as_deref().unwrap().contains("gave up"));
    }
    // Whatever committed is still consistent with itself
    let docs = db.documents().unwrap();
    assert_eq!(duplicate_count(&docs), 0);
    assert_eq!(department(&db, 1).serial_num, 1 + report.committed as u64);
}
