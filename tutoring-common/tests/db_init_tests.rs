//! Tests for file-backed database initialization
//!
//! - Database file and parent directories are created on first run
//! - Reopening an existing database keeps its rows
//! - Per-connection settings (foreign keys, WAL) hold on every pooled connection

use tempfile::TempDir;
use tutoring_common::db::{init_database, DbOptions};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("tutoring.db");

    let result = init_database(&db_path, DbOptions::default()).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_reopen_keeps_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("tutoring.db");

    let pool = init_database(&db_path, DbOptions::default()).await.unwrap();
    sqlx::query("INSERT INTO teachers (name, mode) VALUES ('Alice', 'online')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    // Schema creation runs again on reopen and must not disturb data
    let pool = init_database(&db_path, DbOptions::default()).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_every_connection_enforces_foreign_keys() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("tutoring.db");
    let options = DbOptions {
        max_connections: 4,
        busy_timeout_ms: 1000,
    };
    let pool = init_database(&db_path, options).await.unwrap();

    // Hold several connections at once so the check is not satisfied by a single one
    let mut conns = Vec::new();
    for _ in 0..4 {
        conns.push(pool.acquire().await.unwrap());
    }

    for conn in conns.iter_mut() {
        let fk: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(fk, 1, "foreign_keys must be on for every pooled connection");

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
