//! Store failures and missing departments

use crate::common::*;
use docseq::prelude::*;

#[test]
fn test_closed_store_stops_every_worker() {
    for strategy in StrategyKind::ALL {
        let db = create_db();
        db.store().close();

        let config = HarnessConfig::new(strategy).with_workers(4).with_per_worker(5);
        let report = db.run_with(config).unwrap();

        assert_eq!(report.committed, 0, "{}", strategy);
        assert_eq!(report.failed_workers().count(), 4, "{}", strategy);
        assert_eq!(report.attempted, 4, "{}: workers stop at their first failure", strategy);
        assert!(db.documents().unwrap().is_empty());
    }
}

#[test]
fn test_closed_store_reset_and_append_fail() {
    let db = create_db();
    db.store().close();

    let err = db.reset().unwrap_err();
    assert!(matches!(err, Error::Storage(_)));

    let err = db
        .append(&Strategy::new(StrategyKind::RowLock), DepartmentId(1), "x")
        .unwrap_err();
    assert!(!err.is_retryable());

    db.store().reopen();
    assert!(db.run(RunMode::RowLock).unwrap().is_consistent());
}

#[test]
fn test_missing_department_is_skipped() {
    for strategy in StrategyKind::ALL {
        let db = Docseq::builder().departments(2).open().unwrap();
        let report = db.run(RunMode::ALL[strategy_mode_index(strategy)]).unwrap();

        // Modes route over 3 departments; a third of the work has no row
        assert!(report.not_found > 0, "{}", strategy);
        assert_eq!(report.committed + report.not_found, report.attempted);
        assert_eq!(report.failed_workers().count(), 0);
        assert!(report.is_consistent(), "{}\n{}", strategy, report);
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let db = create_db();
    let err = db
        .run_with(HarnessConfig::default().with_workers(0))
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

fn strategy_mode_index(strategy: StrategyKind) -> usize {
    match strategy {
        StrategyKind::Uncoordinated => 0,
        StrategyKind::ApplicationLock => 2,
        StrategyKind::RowLock => 3,
        StrategyKind::Optimistic => 4,
    }
}
