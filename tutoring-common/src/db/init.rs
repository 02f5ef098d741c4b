//! Database initialization
//!
//! Opens (or creates) the SQLite store and creates the four ledger tables.
//! Schema creation is idempotent and runs on every startup.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Pool tuning for the store
#[derive(Debug, Clone, Copy)]
pub struct DbOptions {
    pub max_connections: u32,
    /// SQLite busy timeout; concurrent writers wait this long for the write lock
    pub busy_timeout_ms: u64,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            max_connections: 8,
            busy_timeout_ms: 5000,
        }
    }
}

/// Initialize database connection and create tables if needed
///
/// Foreign keys, WAL and busy timeout are set through the connect options so that
/// every pooled connection carries them, not just the first one.
pub async fn init_database(db_path: &Path, options: DbOptions) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let connect_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(options.busy_timeout_ms));

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(Duration::from_millis(options.busy_timeout_ms * 2))
        .connect_with(connect_options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    init_schema(&pool).await?;

    info!(
        "Database ready: {} max connections, busy_timeout={}ms",
        options.max_connections, options.busy_timeout_ms
    );

    Ok(pool)
}

/// Open a private in-memory store with the ledger schema
///
/// Limited to one connection: every `sqlite::memory:` connection is its own database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create all ledger tables (idempotent - safe to call multiple times)
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_teachers_table(pool).await?;
    create_teacher_subject_salaries_table(pool).await?;
    create_students_table(pool).await?;
    create_class_records_table(pool).await?;

    debug!("Schema initialized (teachers, teacher_subject_salaries, students, class_records)");
    Ok(())
}

async fn create_teachers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            mode TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_teachers_name ON teachers(name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_teacher_subject_salaries_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teacher_subject_salaries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id INTEGER NOT NULL REFERENCES teachers(id),
            subject TEXT NOT NULL,
            salary_per_hour REAL NOT NULL CHECK (salary_per_hour >= 0),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_salaries_teacher_subject ON teacher_subject_salaries(teacher_id, subject)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_students_table(pool: &SqlitePool) -> Result<()> {
    // No CHECK on remaining_hours: negative balances are allowed
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            subject TEXT NOT NULL,
            total_hours REAL NOT NULL CHECK (total_hours >= 0),
            remaining_hours REAL NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_name ON students(name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_class_records_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS class_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher_id INTEGER NOT NULL REFERENCES teachers(id),
            student_id INTEGER NOT NULL REFERENCES students(id),
            subject TEXT NOT NULL,
            date TEXT NOT NULL,
            hours REAL NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_class_records_teacher_subject ON class_records(teacher_id, subject)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_class_records_student ON class_records(student_id)")
        .execute(pool)
        .await?;

    Ok(())
}
