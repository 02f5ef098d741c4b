//! Teacher persistence

use sqlx::{SqliteExecutor, SqlitePool};
use tutoring_common::db::{NewTeacher, Teacher};
use tutoring_common::Result;

use crate::pagination::Page;

pub async fn insert_teacher<'e>(executor: impl SqliteExecutor<'e>, new: &NewTeacher) -> Result<Teacher> {
    let teacher = sqlx::query_as::<_, Teacher>(
        "INSERT INTO teachers (name, mode) VALUES (?, ?) RETURNING id, name, mode",
    )
    .bind(&new.name)
    .bind(&new.mode)
    .fetch_one(executor)
    .await?;

    Ok(teacher)
}

pub async fn get_teacher(pool: &SqlitePool, id: i64) -> Result<Option<Teacher>> {
    let teacher = sqlx::query_as::<_, Teacher>("SELECT id, name, mode FROM teachers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(teacher)
}

pub async fn teacher_exists<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = ?)")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}

pub async fn list_teachers(pool: &SqlitePool, page: Page) -> Result<Vec<Teacher>> {
    let teachers = sqlx::query_as::<_, Teacher>(
        "SELECT id, name, mode FROM teachers ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(pool)
    .await?;

    Ok(teachers)
}

pub async fn count_teachers(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM teachers")
        .fetch_one(pool)
        .await?)
}
