//! Repository trait definitions
//!
//! Async methods use RPITIT (return position `impl Trait` in traits), so
//! implementations are plain `async fn`s and no `async_trait` is needed.

use std::future::Future;

use super::error::RepositoryError;
use crate::models::{NewUser, User};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Storage for user records
///
/// Implementations keep records in insertion order and must make
/// [`create`](UserRepository::create) atomic: the email uniqueness check,
/// the id assignment and the append happen as one step.
pub trait UserRepository: Clone + Send + Sync + 'static {
    /// Store a validated record, assigning its id
    ///
    /// Fails with `AlreadyExists` if any stored record has the same email.
    fn create(&self, new_user: NewUser) -> impl Future<Output = RepositoryResult<User>> + Send;

    /// All records in insertion order
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<User>>> + Send;

    /// The first record with the given id, if any
    fn find_by_id(&self, id: i64) -> impl Future<Output = RepositoryResult<Option<User>>> + Send;

    /// Remove every record with the given id, returning how many were removed
    fn delete(&self, id: i64) -> impl Future<Output = RepositoryResult<usize>> + Send;

    /// Number of stored records
    fn count(&self) -> impl Future<Output = RepositoryResult<usize>> + Send;

    /// Remove all records and reset id assignment
    fn clear(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}
