//! Teacher subject rate persistence
//!
//! No uniqueness over (teacher_id, subject): a teacher may carry several rates
//! for the same subject. The teacher reference is checked by the store's foreign
//! key; a violation is reported as `NotFound`.

use sqlx::{SqliteExecutor, SqlitePool};
use tutoring_common::db::{NewTeacherSubjectRate, TeacherSubjectRate};
use tutoring_common::{Error, Result};

use crate::pagination::Page;

pub async fn insert_rate<'e>(
    executor: impl SqliteExecutor<'e>,
    new: &NewTeacherSubjectRate,
) -> Result<TeacherSubjectRate> {
    let rate = sqlx::query_as::<_, TeacherSubjectRate>(
        r#"
        INSERT INTO teacher_subject_salaries (teacher_id, subject, salary_per_hour)
        VALUES (?, ?, ?)
        RETURNING id, teacher_id, subject, salary_per_hour
        "#,
    )
    .bind(new.teacher_id)
    .bind(&new.subject)
    .bind(new.salary_per_hour)
    .fetch_one(executor)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            Error::not_found("Teacher", new.teacher_id)
        }
        other => Error::Storage(other),
    })?;

    Ok(rate)
}

pub async fn list_rates(pool: &SqlitePool, page: Page) -> Result<Vec<TeacherSubjectRate>> {
    let rates = sqlx::query_as::<_, TeacherSubjectRate>(
        r#"
        SELECT id, teacher_id, subject, salary_per_hour
        FROM teacher_subject_salaries
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    Ok(rates)
}

/// Rates belonging to one teacher, by foreign key
pub async fn list_rates_for_teacher(
    pool: &SqlitePool,
    teacher_id: i64,
    page: Page,
) -> Result<Vec<TeacherSubjectRate>> {
    let rates = sqlx::query_as::<_, TeacherSubjectRate>(
        r#"
        SELECT id, teacher_id, subject, salary_per_hour
        FROM teacher_subject_salaries
        WHERE teacher_id = ?
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(teacher_id)
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    Ok(rates)
}

pub async fn count_rates(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM teacher_subject_salaries")
        .fetch_one(pool)
        .await?)
}
