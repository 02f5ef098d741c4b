//! Error types for tutoring-api
//!
//! Maps the shared error taxonomy onto HTTP responses:
//! `InvalidInput` → 400, `NotFound` → 404, `Storage` → 503 (retryable).

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use tutoring_common::Error as CommonError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Body missing, not JSON, or a field missing/of the wrong type
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("Invalid path parameter: {0}")]
    Path(#[from] PathRejection),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Common(CommonError::InvalidInput { .. })
            | ApiError::Body(_)
            | ApiError::Query(_)
            | ApiError::Path(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::Common(CommonError::NotFound { .. }) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Common(err) if err.is_transient() => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_ERROR")
            }
            ApiError::Common(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            // body_text() carries serde's message, which names the offending field
            ApiError::Body(rejection) => rejection.body_text(),
            ApiError::Query(rejection) => rejection.body_text(),
            ApiError::Path(rejection) => rejection.body_text(),
            ApiError::Common(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            error!(code, "{}", message);
        } else {
            warn!(code, "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid = ApiError::from(CommonError::invalid("name", "must not be empty"));
        assert_eq!(invalid.status_and_code(), (StatusCode::BAD_REQUEST, "INVALID_INPUT"));

        let missing = ApiError::from(CommonError::not_found("Student", 999));
        assert_eq!(missing.status_and_code(), (StatusCode::NOT_FOUND, "NOT_FOUND"));
        assert_eq!(missing.message(), "Student not found: 999");

        let storage = ApiError::from(CommonError::Storage(sqlx::Error::PoolTimedOut));
        assert_eq!(
            storage.status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_ERROR")
        );

        let busy = ApiError::from(CommonError::Storage(sqlx::Error::PoolClosed));
        assert_eq!(busy.status_and_code().1, "STORAGE_ERROR");

        let io = ApiError::from(CommonError::Io(std::io::Error::other("disk")));
        assert_eq!(io.status_and_code(), (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"));

        let config = ApiError::from(CommonError::Config("bad".into()));
        assert_eq!(config.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
