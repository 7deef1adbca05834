//! Row locks are per department

use crate::common::*;
use docseq::prelude::*;
use docseq_core::{ReadMode, Store, Transaction};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_row_lock_blocks_only_its_department() {
    let db = create_db();
    let store = db.store();

    // Hold department 1's row lock in an open transaction
    let mut holder = store.begin().unwrap();
    holder
        .select_department(DepartmentId(1), ReadMode::ForUpdate)
        .unwrap()
        .unwrap();

    thread::scope(|s| {
        // Department 2 proceeds immediately
        let other = s.spawn(|| {
            db.append(&Strategy::new(StrategyKind::RowLock), DepartmentId(2), "free")
                .unwrap()
        });
        let committed = other.join().unwrap();
        assert_eq!(committed.reference, Reference::for_current_year("HR", 1));

        // Department 1 waits for the holder
        let blocked = s.spawn(|| {
            let started = Instant::now();
            db.append(&Strategy::new(StrategyKind::RowLock), DepartmentId(1), "waits")
                .unwrap();
            started.elapsed()
        });
        thread::sleep(Duration::from_millis(100));
        assert!(!blocked.is_finished(), "append on a locked row must wait");

        holder.increment_serial(DepartmentId(1)).unwrap();
        holder.commit().unwrap();

        let waited = blocked.join().unwrap();
        assert!(waited >= Duration::from_millis(100));
    });

    // The waiter saw the holder's committed increment
    let docs = db.documents().unwrap();
    assert_eq!(serials(&documents_for(&docs, DepartmentId(1))), vec![2]);
    assert_eq!(department(&db, 1).serial_num, 3);
}

#[test]
fn test_application_lock_serializes_across_departments() {
    // One handle, shared: appends on different departments still serialize
    let db = create_contended_db(2);
    let strategy = Strategy::new(StrategyKind::ApplicationLock);

    const WORKERS: usize = 4;
    let barrier = Arc::new(Barrier::new(WORKERS));
    thread::scope(|s| {
        for w in 0..WORKERS {
            let strategy = strategy.clone();
            let barrier = Arc::clone(&barrier);
            let db = &db;
            s.spawn(move || {
                barrier.wait();
                let department = DepartmentId(1 + (w % 2) as u32);
                for _ in 0..5 {
                    db.append(&strategy, department, "x").unwrap();
                }
            });
        }
    });

    let docs = db.documents().unwrap();
    assert_eq!(duplicate_count(&docs), 0);
    assert_eq!(serials(&documents_for(&docs, DepartmentId(1))), (1..=10).collect::<Vec<_>>());
    assert_eq!(serials(&documents_for(&docs, DepartmentId(2))), (1..=10).collect::<Vec<_>>());
}
