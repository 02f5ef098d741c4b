//! Teacher subject rate endpoints and the rate-detail view

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::get,
    Json, Router,
};
use tracing::{debug, info};
use tutoring_common::db::{NewTeacherSubjectRate, TeacherRateDetail, TeacherSubjectRate};

use crate::db::rate_details::list_rate_details;
use crate::db::rates::{insert_rate, list_rates};
use crate::pagination::PageQuery;
use crate::{ApiResult, AppState};

/// POST /teacher_subject_salaries/
///
/// Unknown `teacher_id` → 404 (foreign key checked by the store).
pub async fn create_rate(
    State(state): State<AppState>,
    payload: Result<Json<NewTeacherSubjectRate>, JsonRejection>,
) -> ApiResult<Json<TeacherSubjectRate>> {
    let Json(new) = payload?;
    new.validate()?;

    let rate = insert_rate(&state.db, &new).await?;
    info!(
        rate_id = rate.id,
        teacher_id = rate.teacher_id,
        subject = %rate.subject,
        salary_per_hour = rate.salary_per_hour,
        "Created teacher subject rate"
    );

    Ok(Json(rate))
}

pub async fn read_rates(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TeacherSubjectRate>>> {
    let Query(query) = query?;
    let page = query.page()?;

    let rates = list_rates(&state.db, page).await?;
    debug!(offset = page.offset, limit = page.limit, count = rates.len(), "Listed rates");

    Ok(Json(rates))
}

/// GET /teacher_rate_details/
pub async fn read_rate_details(State(state): State<AppState>) -> ApiResult<Json<Vec<TeacherRateDetail>>> {
    let details = list_rate_details(&state.db).await?;
    debug!(count = details.len(), "Listed rate details");
    Ok(Json(details))
}

pub fn rate_routes() -> Router<AppState> {
    Router::new()
        .route("/teacher_subject_salaries", get(read_rates).post(create_rate))
        .route("/teacher_subject_salaries/", get(read_rates).post(create_rate))
        .route("/teacher_rate_details", get(read_rate_details))
        .route("/teacher_rate_details/", get(read_rate_details))
}
