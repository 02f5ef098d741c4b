//! Class record persistence
//!
//! Records are immutable once inserted. Inserting one through the API always
//! goes through the ledger, which pairs it with the balance decrement.

use serde::Deserialize;
use sqlx::{SqliteExecutor, SqlitePool};
use tutoring_common::db::{ClassRecord, NewClassRecord};
use tutoring_common::Result;

use crate::pagination::Page;

/// Optional filters for class record listings
///
/// Both filters may be set at once; they combine with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ClassRecordFilter {
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl ClassRecordFilter {
    pub fn by_teacher(teacher_id: i64) -> Self {
        Self {
            teacher_id: Some(teacher_id),
            student_id: None,
        }
    }

    pub fn by_student(student_id: i64) -> Self {
        Self {
            teacher_id: None,
            student_id: Some(student_id),
        }
    }
}

pub async fn insert_class_record<'e>(
    executor: impl SqliteExecutor<'e>,
    new: &NewClassRecord,
) -> Result<ClassRecord> {
    let record = sqlx::query_as::<_, ClassRecord>(
        r#"
        INSERT INTO class_records (teacher_id, student_id, subject, date, hours)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, teacher_id, student_id, subject, date, hours
        "#,
    )
    .bind(new.teacher_id)
    .bind(new.student_id)
    .bind(&new.subject)
    .bind(&new.date)
    .bind(new.hours)
    .fetch_one(executor)
    .await?;

    Ok(record)
}

pub async fn get_class_record(pool: &SqlitePool, id: i64) -> Result<Option<ClassRecord>> {
    let record = sqlx::query_as::<_, ClassRecord>(
        "SELECT id, teacher_id, student_id, subject, date, hours FROM class_records WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

pub async fn list_class_records(
    pool: &SqlitePool,
    filter: ClassRecordFilter,
    page: Page,
) -> Result<Vec<ClassRecord>> {
    let records = sqlx::query_as::<_, ClassRecord>(
        r#"
        SELECT id, teacher_id, student_id, subject, date, hours
        FROM class_records
        WHERE (? IS NULL OR teacher_id = ?)
          AND (? IS NULL OR student_id = ?)
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(filter.teacher_id)
    .bind(filter.teacher_id)
    .bind(filter.student_id)
    .bind(filter.student_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn count_class_records(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM class_records")
        .fetch_one(pool)
        .await?)
}
