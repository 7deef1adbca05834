//! Reference format produced by every strategy

use crate::common::*;
use docseq::prelude::*;
use docseq::current_year;

#[test]
fn test_reference_format_per_strategy() {
    for kind in StrategyKind::ALL {
        let db = create_db();
        let strategy = Strategy::new(kind);
        let first = db.append(&strategy, DepartmentId(2), "a").unwrap();
        let second = db.append(&strategy, DepartmentId(2), "b").unwrap();

        let year = current_year();
        assert_eq!(first.reference.as_str(), format!("HR/1/{}", year), "{}", kind);
        assert_eq!(second.reference.as_str(), format!("HR/2/{}", year), "{}", kind);
        assert_eq!(first.attempts, 1);
    }
}

#[test]
fn test_reference_uses_serial_before_increment() {
    let db = Docseq::builder().initial_serial(41).open().unwrap();
    let committed = db
        .append(&Strategy::new(StrategyKind::RowLock), DepartmentId(1), "x")
        .unwrap();
    assert_eq!(committed.reference, Reference::new("ACC", 41, current_year()));
    assert_eq!(department(&db, 1).serial_num, 42);
}

#[test]
fn test_documents_carry_generator_content() {
    let db = create_db();
    db.run(RunMode::Sequential).unwrap();
    let docs = db.documents().unwrap();
    assert_eq!(docs.len(), 50);
    for (i, doc) in docs.iter().enumerate() {
        assert_eq!(doc.content, format!("Document {}", i));
        assert_eq!(doc.department_id, DepartmentId(1 + (i % 3) as u32));
    }
}

#[test]
fn test_reset_restores_serials_and_clears_documents() {
    let db = create_db();
    db.run(RunMode::Optimistic).unwrap();
    let version_before = department(&db, 1).version;
    assert!(version_before > 0);

    db.reset().unwrap();
    assert!(db.documents().unwrap().is_empty());
    for row in db.departments().unwrap() {
        assert_eq!(row.serial_num, 1);
    }
    assert_eq!(department(&db, 1).version, version_before, "version is kept");

    // References start over after reset
    let again = db
        .append(&Strategy::new(StrategyKind::Optimistic), DepartmentId(1), "x")
        .unwrap();
    assert_eq!(again.reference, Reference::new("ACC", 1, current_year()));
}
