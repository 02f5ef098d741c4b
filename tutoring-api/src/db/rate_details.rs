//! Rate-detail view
//!
//! Read-only join of each teacher subject rate with every class record sharing
//! its (teacher_id, subject). Nothing is stored for it.

use sqlx::SqlitePool;
use tutoring_common::db::TeacherRateDetail;
use tutoring_common::Result;

pub async fn list_rate_details(pool: &SqlitePool) -> Result<Vec<TeacherRateDetail>> {
    let details = sqlx::query_as::<_, TeacherRateDetail>(
        r#"
        SELECT t.name AS teacher_name,
               r.subject AS subject,
               s.name AS student_name,
               r.salary_per_hour AS salary_per_hour
        FROM teacher_subject_salaries r
        JOIN teachers t ON t.id = r.teacher_id
        JOIN class_records c ON c.teacher_id = r.teacher_id AND c.subject = r.subject
        JOIN students s ON s.id = c.student_id
        ORDER BY r.id, c.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(details)
}
