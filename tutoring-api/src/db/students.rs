//! Student persistence
//!
//! `remaining_hours` is written here only at creation; afterwards it changes
//! solely through [`crate::ledger::record_class`].

use sqlx::{SqliteExecutor, SqlitePool};
use tutoring_common::db::{NewStudent, Student};
use tutoring_common::Result;

use crate::pagination::Page;

pub async fn insert_student<'e>(executor: impl SqliteExecutor<'e>, new: &NewStudent) -> Result<Student> {
    let student = sqlx::query_as::<_, Student>(
        r#"
        INSERT INTO students (name, subject, total_hours, remaining_hours)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, subject, total_hours, remaining_hours
        "#,
    )
    .bind(&new.name)
    .bind(&new.subject)
    .bind(new.total_hours)
    .bind(new.remaining_hours)
    .fetch_one(executor)
    .await?;

    Ok(student)
}

pub async fn get_student(pool: &SqlitePool, id: i64) -> Result<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, name, subject, total_hours, remaining_hours FROM students WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

pub async fn list_students(pool: &SqlitePool, page: Page) -> Result<Vec<Student>> {
    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, name, subject, total_hours, remaining_hours
        FROM students
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    Ok(students)
}

pub async fn count_students(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(pool)
        .await?)
}
