//! In-memory user store

use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{RepositoryResult, UserRepository};
use crate::config::IdStrategy;
use crate::models::{NewUser, User};

#[derive(Debug, Default)]
struct Records {
    users: Vec<User>,
    /// Highest id ever assigned since the last clear
    last_id: i64,
}

/// Process-wide ordered collection of user records
///
/// Cloning is cheap and every clone shares the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    records: Arc<RwLock<Records>>,
    id_strategy: IdStrategy,
}

impl InMemoryUserRepository {
    /// Create an empty store using `id = count + 1` assignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given id strategy
    pub fn with_id_strategy(id_strategy: IdStrategy) -> Self {
        Self {
            records: Arc::default(),
            id_strategy,
        }
    }

    /// The id strategy in use
    pub fn id_strategy(&self) -> IdStrategy {
        self.id_strategy
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> RepositoryResult<User> {
        let mut records = self.records.write().await;

        if records.users.iter().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::email_taken(&new_user.email));
        }

        let id = match self.id_strategy {
            IdStrategy::Length => records.users.len() as i64 + 1,
            IdStrategy::Monotonic => records.last_id + 1,
        };
        records.last_id = records.last_id.max(id);

        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            age: new_user.age,
        };
        records.users.push(user.clone());

        Ok(user)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.records.read().await.users.clone())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let records = self.records.read().await;
        Ok(records.users.iter().find(|u| u.id == id).cloned())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let mut records = self.records.write().await;
        let before = records.users.len();
        records.users.retain(|u| u.id != id);
        let removed = before - records.users.len();

        if removed == 0 {
            return Err(RepositoryError::not_found(RepositoryOperation::Delete, id));
        }
        Ok(removed)
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.records.read().await.users.len())
    }

    async fn clear(&self) -> RepositoryResult<()> {
        let mut records = self.records.write().await;
        records.users.clear();
        records.last_id = 0;
        Ok(())
    }
}
