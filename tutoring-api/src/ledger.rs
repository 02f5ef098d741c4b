//! Class-session ledger
//!
//! Records a class session and decrements the student's remaining hours as a
//! single transaction. Either both writes commit or neither does.
//!
//! **Algorithm:**
//! 1. Validate the request (no store access on failure)
//! 2. Begin transaction; first statement is the guarded balance decrement, so
//!    SQLite grants the write lock before anything is read
//! 3. No row updated → find the missing reference (teacher first), roll back, `NotFound`
//! 4. Insert the class record
//! 5. Commit
//!
//! The decrement is computed inside the UPDATE, and the write lock is held until
//! commit. Concurrent sessions for the same student therefore serialize and
//! no decrement is lost. Any error before commit drops the transaction, which
//! rolls it back.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use tutoring_common::db::{ClassRecord, NewClassRecord};
use tutoring_common::{Error, Result};

use crate::db::class_records::insert_class_record;
use crate::db::teachers::teacher_exists;

/// Create a class record and charge its hours against the student's balance
pub async fn record_class(pool: &SqlitePool, new: &NewClassRecord) -> Result<ClassRecord> {
    new.validate()?;

    let mut tx = pool.begin().await?;

    let remaining: Option<f64> = sqlx::query_scalar(
        r#"
        UPDATE students
        SET remaining_hours = remaining_hours - ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
          AND EXISTS (SELECT 1 FROM teachers WHERE id = ?)
        RETURNING remaining_hours
        "#,
    )
    .bind(new.hours)
    .bind(new.student_id)
    .bind(new.teacher_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(remaining) = remaining else {
        // The write lock is held since the UPDATE, so the rows are exactly as
        // the guard saw them: an existing teacher means the student is missing.
        let missing = if !teacher_exists(&mut *tx, new.teacher_id).await? {
            Error::not_found("Teacher", new.teacher_id)
        } else {
            Error::not_found("Student", new.student_id)
        };
        tx.rollback().await?;
        warn!(
            teacher_id = new.teacher_id,
            student_id = new.student_id,
            "Class record rejected: {}",
            missing
        );
        return Err(missing);
    };

    let record = insert_class_record(&mut *tx, new).await?;

    tx.commit().await?;

    info!(
        class_record_id = record.id,
        teacher_id = record.teacher_id,
        student_id = record.student_id,
        hours = record.hours,
        remaining_hours = remaining,
        "Recorded class session"
    );

    if remaining < 0.0 {
        warn!(
            student_id = record.student_id,
            remaining_hours = remaining,
            "Student balance is negative"
        );
    } else {
        debug!(student_id = record.student_id, remaining_hours = remaining, "Student balance updated");
    }

    Ok(record)
}
