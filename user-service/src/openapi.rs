//! OpenAPI documentation
//!
//! The document is generated with utoipa from the handler annotations and
//! served as JSON at `/openapi.json`. Title and version come from the
//! service configuration.

use axum::{extract::State, Json};
use utoipa::OpenApi;

use crate::{
    error::{ErrorResponse, ValidationDetail, ValidationErrorResponse},
    handlers::users,
    health::{self, HealthResponse, RootResponse},
    models::{CreateUserRequest, DeleteUserResponse, User},
    repository::UserRepository,
    state::AppState,
};

/// Path of the served document
pub const OPENAPI_PATH: &str = "/openapi.json";

/// OpenAPI description of the HTTP surface
#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        users::create_user,
        users::list_users,
        users::get_user,
        users::delete_user,
    ),
    components(schemas(
        User,
        CreateUserRequest,
        DeleteUserResponse,
        ErrorResponse,
        ValidationDetail,
        ValidationErrorResponse,
        RootResponse,
        HealthResponse,
    )),
    tags(
        (name = "health", description = "Liveness and status"),
        (name = "users", description = "In-memory user records"),
    )
)]
pub struct ApiDoc;

/// Builder for adjusting the generated document's metadata
///
/// # Example
///
/// ```rust
/// use user_service::openapi::{ApiDoc, OpenApiBuilder};
/// use utoipa::OpenApi;
///
/// let doc = OpenApiBuilder::new(ApiDoc::openapi())
///     .title("CI/CD Demo API")
///     .version("1.0.0")
///     .build();
/// assert_eq!(doc.info.version, "1.0.0");
/// ```
pub struct OpenApiBuilder {
    openapi: utoipa::openapi::OpenApi,
}

impl OpenApiBuilder {
    /// Create a new OpenAPI builder from an existing OpenApi instance
    pub fn new(openapi: utoipa::openapi::OpenApi) -> Self {
        Self { openapi }
    }

    /// Set the API title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.openapi.info.title = title.into();
        self
    }

    /// Set the API version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.openapi.info.version = version.into();
        self
    }

    /// Set the API description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.openapi.info.description = Some(description.into());
        self
    }

    /// Build the final OpenAPI specification
    pub fn build(self) -> utoipa::openapi::OpenApi {
        self.openapi
    }
}

/// Serve the OpenAPI document
pub async fn openapi_json<R>(State(state): State<AppState<R>>) -> Json<utoipa::openapi::OpenApi>
where
    R: UserRepository,
{
    let service = &state.config().service;
    Json(
        OpenApiBuilder::new(ApiDoc::openapi())
            .title(service.title.clone())
            .version(service.version.clone())
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/users"));
        assert!(paths.iter().any(|p| p.as_str() == "/users/{user_id}"));
    }

    #[test]
    fn test_builder_overrides_metadata() {
        let doc = OpenApiBuilder::new(ApiDoc::openapi())
            .title("Users")
            .version("9.9.9")
            .description("test")
            .build();
        assert_eq!(doc.info.title, "Users");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("test"));
    }
}
