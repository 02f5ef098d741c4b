//! Teacher endpoints
//!
//! - POST /teachers/                    create
//! - GET  /teachers/                    list (skip, limit)
//! - GET  /teachers/:id                 fetch one
//! - GET  /teachers/:id/rates           the teacher's subject rates
//! - GET  /teachers/:id/class_records   sessions the teacher taught

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use tracing::{debug, info};
use tutoring_common::db::{ClassRecord, NewTeacher, Teacher, TeacherSubjectRate};
use tutoring_common::Error;

use crate::db::class_records::{list_class_records, ClassRecordFilter};
use crate::db::rates::list_rates_for_teacher;
use crate::db::teachers::{get_teacher, insert_teacher, list_teachers};
use crate::pagination::PageQuery;
use crate::{ApiResult, AppState};

pub async fn create_teacher(
    State(state): State<AppState>,
    payload: Result<Json<NewTeacher>, JsonRejection>,
) -> ApiResult<Json<Teacher>> {
    let Json(new) = payload?;
    new.validate()?;

    let teacher = insert_teacher(&state.db, &new).await?;
    info!(teacher_id = teacher.id, name = %teacher.name, "Created teacher");

    Ok(Json(teacher))
}

pub async fn read_teachers(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Teacher>>> {
    let Query(query) = query?;
    let page = query.page()?;

    let teachers = list_teachers(&state.db, page).await?;
    debug!(offset = page.offset, limit = page.limit, count = teachers.len(), "Listed teachers");

    Ok(Json(teachers))
}

pub async fn read_teacher(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Teacher>> {
    let Path(id) = id?;
    Ok(Json(require_teacher(&state, id).await?))
}

pub async fn read_teacher_rates(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TeacherSubjectRate>>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let page = query.page()?;
    require_teacher(&state, id).await?;

    Ok(Json(list_rates_for_teacher(&state.db, id, page).await?))
}

pub async fn read_teacher_class_records(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ClassRecord>>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let page = query.page()?;
    require_teacher(&state, id).await?;

    let records = list_class_records(&state.db, ClassRecordFilter::by_teacher(id), page).await?;
    Ok(Json(records))
}

async fn require_teacher(state: &AppState, id: i64) -> ApiResult<Teacher> {
    get_teacher(&state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("Teacher", id).into())
}

pub fn teacher_routes() -> Router<AppState> {
    Router::new()
        .route("/teachers", get(read_teachers).post(create_teacher))
        .route("/teachers/", get(read_teachers).post(create_teacher))
        .route("/teachers/:id", get(read_teacher))
        .route("/teachers/:id/rates", get(read_teacher_rates))
        .route("/teachers/:id/class_records", get(read_teacher_class_records))
}
