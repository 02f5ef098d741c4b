//! Class record endpoints
//!
//! Creating a class record runs the ledger: the student's remaining hours are
//! decremented in the same transaction.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;
use tutoring_common::db::{ClassRecord, NewClassRecord};
use tutoring_common::Error;

use crate::db::class_records::{get_class_record, list_class_records, ClassRecordFilter};
use crate::ledger::record_class;
use crate::pagination::Page;
use crate::{ApiResult, AppState};

/// Query parameters for GET /class_records/
///
/// `teacher_id` and `student_id` may be combined; both must match.
#[derive(Debug, Default, Deserialize)]
pub struct ClassRecordQuery {
    #[serde(alias = "offset")]
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
}

impl ClassRecordQuery {
    fn page(&self) -> tutoring_common::Result<Page> {
        Page::new(self.skip, self.limit)
    }

    fn filter(&self) -> ClassRecordFilter {
        ClassRecordFilter {
            teacher_id: self.teacher_id,
            student_id: self.student_id,
        }
    }
}

/// POST /class_records/
///
/// **Errors:**
/// - 400: invalid or missing field
/// - 404: unknown teacher or student (nothing written)
/// - 503: store failure (nothing written; safe to retry)
pub async fn create_class_record(
    State(state): State<AppState>,
    payload: Result<Json<NewClassRecord>, JsonRejection>,
) -> ApiResult<Json<ClassRecord>> {
    let Json(new) = payload?;
    let record = record_class(&state.db, &new).await?;
    Ok(Json(record))
}

pub async fn read_class_records(
    State(state): State<AppState>,
    query: Result<Query<ClassRecordQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ClassRecord>>> {
    let Query(query) = query?;
    let page = query.page()?;
    let filter = query.filter();

    let records = list_class_records(&state.db, filter, page).await?;
    debug!(
        offset = page.offset,
        limit = page.limit,
        teacher_id = ?filter.teacher_id,
        student_id = ?filter.student_id,
        count = records.len(),
        "Listed class records"
    );

    Ok(Json(records))
}

pub async fn read_class_record(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ClassRecord>> {
    let Path(id) = id?;
    let record = get_class_record(&state.db, id)
        .await?
        .ok_or_else(|| Error::not_found("ClassRecord", id))?;
    Ok(Json(record))
}

pub fn class_record_routes() -> Router<AppState> {
    Router::new()
        .route("/class_records", get(read_class_records).post(create_class_record))
        .route("/class_records/", get(read_class_records).post(create_class_record))
        .route("/class_records/:id", get(read_class_record))
}
