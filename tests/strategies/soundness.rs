//! Counter and reference consistency of the sound strategies

use crate::common::*;
use docseq::prelude::*;

#[test]
fn test_sound_strategies_under_contention() {
    for strategy in sound_strategies() {
        let db = create_contended_db(3);
        let config = HarnessConfig::new(strategy)
            .with_workers(10)
            .with_per_worker(5)
            .with_departments(3)
            .with_retry(RetryConfig::unbounded());
        let report = db.run_with(config).unwrap();

        assert!(report.is_consistent(), "{}\n{}", strategy, report);
        assert_eq!(report.committed, 50, "{}", strategy);
        assert_eq!(duplicate_count(&db.documents().unwrap()), 0, "{}", strategy);

        // 5 ops per worker route 2/2/1, times 10 workers
        assert_eq!(department(&db, 1).serial_num, 21, "{}", strategy);
        assert_eq!(department(&db, 2).serial_num, 21, "{}", strategy);
        assert_eq!(department(&db, 3).serial_num, 11, "{}", strategy);
    }
}

#[test]
fn test_sound_strategies_issue_gapless_serials() {
    for strategy in sound_strategies() {
        let db = create_contended_db(1);
        let config = HarnessConfig::new(strategy)
            .with_workers(8)
            .with_per_worker(4)
            .with_departments(1);
        db.run_with(config).unwrap();

        let docs = db.documents().unwrap();
        let dept = documents_for(&docs, DepartmentId(1));
        assert_eq!(serials(&dept), (1..=32).collect::<Vec<_>>(), "{}", strategy);
        assert_eq!(department(&db, 1).serial_num, 33, "{}", strategy);
    }
}

#[test]
fn test_modes_with_sound_strategies_are_consistent() {
    let db = create_db();
    for mode in [RunMode::ApplicationLock, RunMode::RowLock, RunMode::Optimistic] {
        let report = db.run(mode).unwrap();
        assert!(report.is_consistent(), "{}\n{}", mode, report);
        assert_eq!(report.documents(), 50);
    }
}

#[test]
fn test_sequential_baseline_is_consistent() {
    // A single worker has nothing to race with
    let db = create_contended_db(3);
    let report = db.run(RunMode::Sequential).unwrap();
    assert!(report.is_consistent(), "{}", report);
    assert_eq!(department(&db, 1).serial_num, 18);
    assert_eq!(department(&db, 2).serial_num, 18);
    assert_eq!(department(&db, 3).serial_num, 17);
}

mod props {
    use super::*;
    use proptest::prelude::*;
    use proptest::strategy::Strategy as PropStrategy;

    fn any_sound_strategy() -> impl PropStrategy<Value = StrategyKind> {
        prop::sample::select(sound_strategies())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn sound_runs_are_consistent_for_any_sizing(
            strategy in any_sound_strategy(),
            workers in 1usize..6,
            per_worker in 0usize..8,
            departments in 1u32..5,
        ) {
            let db = Docseq::builder().departments(departments).open().unwrap();
            let config = HarnessConfig::new(strategy)
                .with_workers(workers)
                .with_per_worker(per_worker)
                .with_departments(departments)
                .with_retry(RetryConfig::unbounded());
            let report = db.run_with(config).unwrap();

            prop_assert!(report.is_consistent(), "{}", report);
            prop_assert_eq!(report.committed, workers * per_worker);
            prop_assert_eq!(report.expected_documents(), workers * per_worker);
        }
    }
}
