//! HTTP handlers
//!
//! - [`users`]: create, list, get and delete over the user store
//! - [`not_found`] / [`method_not_allowed`]: router fallbacks with the
//!   service's `{"detail": ...}` error body

pub mod users;

use crate::error::Error;

pub use users::{create_user, delete_user, get_user, list_users};

/// Fallback for paths no route matches
pub async fn not_found() -> Error {
    Error::NotFound("Not Found".to_string())
}

/// Fallback for known paths requested with an unsupported method
pub async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
