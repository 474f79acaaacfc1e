//! Error types and HTTP response conversion
//!
//! Every error a handler returns becomes the response directly. Client errors
//! carry a `{"detail": ...}` body; validation errors list every offending field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::repository::{RepositoryError, RepositoryErrorKind};

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration loaded but holds an unusable value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error (binding, serving)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed, missing or mistyped input (422)
    #[error("Validation error: {} problem(s)", .0.len())]
    Validation(Vec<ValidationDetail>),

    /// Business rule violation (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Route exists but not for this method (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Request rejected before reaching a handler (e.g. body too large)
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Body of every non-validation error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub detail: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// One field-level validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationDetail {
    /// Location of the offending value, e.g. `["body", "email"]`
    pub loc: Vec<String>,
    /// Human-readable message
    pub msg: String,
    /// Machine-readable error type, e.g. `missing`
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationDetail {
    /// Create a validation detail for a location
    pub fn new<I, S>(loc: I, kind: impl Into<String>, msg: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// A problem with a request body field
    pub fn body_field(field: &str, kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(["body", field], kind, msg)
    }
}

/// Body of a validation error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Every validation problem found in the request
    pub detail: Vec<ValidationDetail>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(detail) => {
                tracing::debug!(problems = detail.len(), "Request failed validation");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationErrorResponse { detail }),
                )
                    .into_response()
            }

            Error::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }

            Error::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
            }

            Error::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorResponse::new("Method Not Allowed")),
            )
                .into_response(),

            Error::Rejected { status, message } => {
                (status, Json(ErrorResponse::new(message))).into_response()
            }

            Error::Config(_) | Error::InvalidConfig(_) | Error::Io(_) | Error::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal Server Error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err.kind {
            RepositoryErrorKind::NotFound => Error::NotFound(err.message),
            RepositoryErrorKind::AlreadyExists => Error::BadRequest(err.message),
        }
    }
}
