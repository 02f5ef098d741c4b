//! Student endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use tracing::{debug, info};
use tutoring_common::db::{ClassRecord, NewStudent, Student};
use tutoring_common::Error;

use crate::db::class_records::{list_class_records, ClassRecordFilter};
use crate::db::students::{get_student, insert_student, list_students};
use crate::pagination::PageQuery;
use crate::{ApiResult, AppState};

pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> ApiResult<Json<Student>> {
    let Json(new) = payload?;
    new.validate()?;

    let student = insert_student(&state.db, &new).await?;
    info!(
        student_id = student.id,
        name = %student.name,
        remaining_hours = student.remaining_hours,
        "Created student"
    );

    Ok(Json(student))
}

pub async fn read_students(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Student>>> {
    let Query(query) = query?;
    let page = query.page()?;

    let students = list_students(&state.db, page).await?;
    debug!(offset = page.offset, limit = page.limit, count = students.len(), "Listed students");

    Ok(Json(students))
}

/// GET /students/:id
///
/// The current `remaining_hours` reflects every class recorded so far.
pub async fn read_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Student>> {
    let Path(id) = id?;
    Ok(Json(require_student(&state, id).await?))
}

pub async fn read_student_class_records(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ClassRecord>>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let page = query.page()?;
    require_student(&state, id).await?;

    let records = list_class_records(&state.db, ClassRecordFilter::by_student(id), page).await?;
    Ok(Json(records))
}

async fn require_student(state: &AppState, id: i64) -> ApiResult<Student> {
    get_student(&state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("Student", id).into())
}

pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(read_students).post(create_student))
        .route("/students/", get(read_students).post(create_student))
        .route("/students/:id", get(read_student))
        .route("/students/:id/class_records", get(read_student_class_records))
}
