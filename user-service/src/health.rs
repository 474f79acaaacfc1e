//! Health check handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::Result, repository::UserRepository, state::AppState};

/// Greeting returned by the root endpoint
pub const ROOT_MESSAGE: &str = "Hello CI/CD World!";

/// Version reported by `/health`, independent of configuration
pub const API_VERSION: &str = "1.0.0";

/// Root health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    /// Always `healthy`
    pub status: String,
}

/// Detailed health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
    pub version: String,
    /// Number of records currently stored
    pub users_count: usize,
}

/// Liveness check
///
/// Always returns 200 OK while the process is serving.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is up", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
        status: "healthy".to_string(),
    })
}

/// Detailed health check with the current record count
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service status", body = HealthResponse))
)]
pub async fn health<R>(State(state): State<AppState<R>>) -> Result<Json<HealthResponse>>
where
    R: UserRepository,
{
    let users_count = state.users().count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: API_VERSION.to_string(),
        users_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_health_version_ignores_config() {
        let mut config = Config::default();
        config.service.version = "9.9.9".to_string();

        let Json(body) = health(State(AppState::new(config))).await.unwrap();
        assert_eq!(body.version, API_VERSION);
        assert_eq!(body.status, "ok");
        assert_eq!(body.users_count, 0);
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let Json(body) = root().await;
        assert_eq!(body.message, ROOT_MESSAGE);
        assert_eq!(body.status, "healthy");
    }
}
