//! # user-service
//!
//! A small HTTP service that keeps user records in memory.
//!
//! ## Endpoints
//!
//! - `GET /`: liveness greeting
//! - `GET /health`: status, version and current record count
//! - `POST /users`: validate and store a record, assigning its id
//! - `GET /users`: every record in insertion order
//! - `GET /users/{user_id}`: one record, or 404
//! - `DELETE /users/{user_id}`: remove every record with that id, or 404
//! - `GET /openapi.json`: generated OpenAPI document
//!
//! Errors are returned as `{"detail": ...}` bodies. Records live only as long
//! as the process.
//!
//! ## Example
//!
//! ```rust,no_run
//! use user_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     // Build application state and router
//!     let router = build_router(AppState::new(config.clone()));
//!
//!     // Run server with the middleware stack applied
//!     Server::new(config).serve(router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, IdStrategy, MiddlewareConfig, ServiceConfig, StoreConfig};
    pub use crate::error::{Error, ErrorResponse, Result, ValidationDetail};
    pub use crate::health::{health, root};
    pub use crate::middleware::{
        request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
        MakeTypedRequestId, SENSITIVE_HEADERS,
    };
    pub use crate::models::{DeleteUserResponse, NewUser, User};
    pub use crate::observability::init_tracing;
    pub use crate::openapi::{ApiDoc, OpenApiBuilder};
    pub use crate::repository::{
        InMemoryUserRepository, RepositoryError, RepositoryErrorKind, RepositoryOperation,
        RepositoryResult, UserRepository,
    };
    pub use crate::server::{app, apply_middleware, build_router, Server};
    pub use crate::state::{AppState, AppStateBuilder};

    pub use axum::{
        extract::{Path, State},
        routing::{delete, get, post},
        Json, Router,
    };
}
