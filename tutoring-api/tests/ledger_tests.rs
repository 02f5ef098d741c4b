//! Ledger tests against a file-backed store
//!
//! - Concurrent sessions for one student lose no decrement
//! - A rejected session leaves record counts and balances unchanged
//! - A failed class-record insert rolls back the balance decrement

use std::sync::Arc;

use sqlx::SqlitePool;
use tempfile::TempDir;
use tutoring_api::db::class_records::count_class_records;
use tutoring_api::db::students::{get_student, insert_student};
use tutoring_api::db::teachers::insert_teacher;
use tutoring_api::ledger::record_class;
use tutoring_common::db::{init_database, DbOptions, NewClassRecord, NewStudent, NewTeacher};
use tutoring_common::Error;

async fn setup_store(dir: &TempDir) -> SqlitePool {
    let pool = init_database(&dir.path().join("ledger.db"), DbOptions::default())
        .await
        .expect("Should create database");

    insert_teacher(&pool, &NewTeacher { name: "Alice".into(), mode: "online".into() })
        .await
        .unwrap();
    let charlie = NewStudent {
        name: "Charlie".into(),
        subject: "Math".into(),
        total_hours: 100.0,
        remaining_hours: 80.0,
    };
    insert_student(&pool, &charlie).await.unwrap();

    pool
}

fn session(student_id: i64, hours: f64) -> NewClassRecord {
    NewClassRecord {
        teacher_id: 1,
        student_id,
        subject: "Math".into(),
        date: "2024-07-01".into(),
        hours,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sessions_lose_no_decrement() {
    let dir = TempDir::new().unwrap();
    let pool = Arc::new(setup_store(&dir).await);
    let sessions = 20;

    let handles: Vec<_> = (0..sessions)
        .map(|_| {
            let pool = Arc::clone(&pool);
            tokio::spawn(async move { record_class(&pool, &session(1, 1.5)).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().expect("Every session should be recorded");
    }

    let charlie = get_student(&pool, 1).await.unwrap().unwrap();
    assert_eq!(charlie.remaining_hours, 80.0 - 1.5 * sessions as f64);
    assert_eq!(count_class_records(&pool).await.unwrap(), sessions as i64);
}

#[tokio::test]
async fn test_rejected_session_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let pool = setup_store(&dir).await;
    record_class(&pool, &session(1, 2.0)).await.unwrap();

    let result = record_class(&pool, &session(999, 2.0)).await;

    assert!(matches!(result, Err(Error::NotFound { entity: "Student", id: 999 })));
    assert_eq!(count_class_records(&pool).await.unwrap(), 1);
    assert_eq!(get_student(&pool, 1).await.unwrap().unwrap().remaining_hours, 78.0);
}

#[tokio::test]
async fn test_balance_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let pool = setup_store(&dir).await;
    record_class(&pool, &session(1, 2.0)).await.unwrap();
    record_class(&pool, &session(1, 2.0)).await.unwrap();
    pool.close().await;

    let pool = init_database(&dir.path().join("ledger.db"), DbOptions::default())
        .await
        .unwrap();

    assert_eq!(get_student(&pool, 1).await.unwrap().unwrap().remaining_hours, 76.0);
    assert_eq!(count_class_records(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_failed_insert_rolls_back_decrement() {
    let dir = TempDir::new().unwrap();
    let pool = setup_store(&dir).await;

    // Make the second write of the ledger fail after the balance UPDATE succeeded
    sqlx::query(
        r#"
        CREATE TRIGGER reject_class_records BEFORE INSERT ON class_records
        BEGIN
            SELECT RAISE(ABORT, 'class_records is read-only');
        END
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = record_class(&pool, &session(1, 2.0)).await;

    assert!(matches!(result, Err(Error::Storage(_))), "got {:?}", result);
    assert_eq!(get_student(&pool, 1).await.unwrap().unwrap().remaining_hours, 80.0);
    assert_eq!(count_class_records(&pool).await.unwrap(), 0);
}
