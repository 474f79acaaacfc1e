//! User record storage
//!
//! - [`UserRepository`]: async storage trait handlers are written against
//! - [`InMemoryUserRepository`]: the process-wide in-memory store
//! - [`RepositoryError`]: structured errors carrying client-facing messages
//!
//! # Example
//!
//! ```rust
//! use user_service::models::NewUser;
//! use user_service::repository::{InMemoryUserRepository, UserRepository};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! rt.block_on(async {
//!     let repo = InMemoryUserRepository::new();
//!     let user = repo
//!         .create(NewUser { name: "A".into(), email: "a@x.com".into(), age: 30 })
//!         .await
//!         .unwrap();
//!     assert_eq!(user.id, 1);
//! });
//! ```

mod error;
mod memory;
mod traits;

pub use error::{
    RepositoryError, RepositoryErrorKind, RepositoryOperation, EMAIL_TAKEN, USER_NOT_FOUND,
};
pub use memory::InMemoryUserRepository;
pub use traits::{RepositoryResult, UserRepository};
