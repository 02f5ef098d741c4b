//! Store access for tutoring-api
//!
//! One module per record kind. Inserts take any `SqliteExecutor` so they run
//! equally against the pool or inside a transaction (ledger, legacy import).

pub mod class_records;
pub mod rate_details;
pub mod rates;
pub mod students;
pub mod teachers;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tutoring_common::{Error, Result};

/// Connect to an existing database in read-only mode
///
/// Used for the legacy source database during import, which must never be written.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "Database not found: {}",
            db_path.display()
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tutoring_common::db::{init_database, DbOptions};

    #[tokio::test]
    async fn test_readonly_connection_rejects_writes() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("legacy.db");
        init_database(&db_path, DbOptions::default()).await.unwrap().close().await;

        let pool = connect_readonly(&db_path)
            .await
            .expect("Should connect in read-only mode");

        let result = sqlx::query("INSERT INTO teachers (name, mode) VALUES ('x', 'y')")
            .execute(&pool)
            .await;

        assert!(result.is_err(), "Write operation should fail in read-only mode");
    }

    #[tokio::test]
    async fn test_readonly_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = connect_readonly(&dir.path().join("absent.db")).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
