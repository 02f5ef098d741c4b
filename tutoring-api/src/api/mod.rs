//! HTTP API handlers for tutoring-api
//!
//! Collection paths are routed both with and without a trailing slash.

pub mod buildinfo;
pub mod class_records;
pub mod health;
pub mod rates;
pub mod students;
pub mod teachers;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub use buildinfo::buildinfo_routes;
pub use class_records::class_record_routes;
pub use health::health_routes;
pub use rates::rate_routes;
pub use students::student_routes;
pub use teachers::teacher_routes;

/// GET /
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Teacher Salary Management System" }))
}

pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(welcome))
}
