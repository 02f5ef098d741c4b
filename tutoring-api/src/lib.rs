//! tutoring-api library - teacher, student and class-session ledger service
//!
//! Exposes the router and store operations for the server binary, the seed
//! tool and integration tests.

use axum::http::{HeaderValue, Method};
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

pub mod api;
pub mod db;
pub mod error;
pub mod ledger;
pub mod pagination;
pub mod seed;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; handlers acquire a connection per query
    pub db: SqlitePool,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::root_routes())
        .merge(api::health_routes())
        .merge(api::buildinfo_routes())
        .merge(api::teacher_routes())
        .merge(api::rate_routes())
        .merge(api::student_routes())
        .merge(api::class_record_routes())
        .with_state(state)
}

/// CORS layer allowing the configured front-end origins
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
