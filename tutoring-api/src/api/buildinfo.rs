//! Build identification endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    /// Values captured by build.rs when this binary was compiled
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
        }
    }
}

/// GET /buildinfo
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}

pub fn buildinfo_routes() -> Router<AppState> {
    Router::new().route("/buildinfo", get(get_build_info))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_populated() {
        let info = BuildInfo::current();
        assert!(!info.git_hash.is_empty());
        assert!(["debug", "release", "unknown"].contains(&info.build_profile));
        assert!(chrono::DateTime::parse_from_rfc3339(info.build_timestamp).is_ok());
    }
}
