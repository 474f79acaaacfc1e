//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::repository::{InMemoryUserRepository, UserRepository};

/// Application state shared across handlers
///
/// Generic over the store so tests and alternative backends can inject
/// their own [`UserRepository`]. Cloning shares the same store.
#[derive(Clone)]
pub struct AppState<R = InMemoryUserRepository>
where
    R: UserRepository,
{
    config: Arc<Config>,
    users: R,
}

impl Default for AppState<InMemoryUserRepository> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState<InMemoryUserRepository> {
    /// Create state with an empty in-memory store configured from `config`
    pub fn new(config: Config) -> Self {
        let users = InMemoryUserRepository::with_id_strategy(config.store.id_strategy);
        Self::with_repository(config, users)
    }

    /// Create a new builder for AppState
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }
}

impl<R> AppState<R>
where
    R: UserRepository,
{
    /// Create state around an existing store
    pub fn with_repository(config: Config, users: R) -> Self {
        Self {
            config: Arc::new(config),
            users,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the user store
    pub fn users(&self) -> &R {
        &self.users
    }
}

/// Builder for AppState backed by the in-memory store
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<Config>,
    users: Option<InMemoryUserRepository>,
}

impl AppStateBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing store instead of creating a fresh one
    pub fn repository(mut self, users: InMemoryUserRepository) -> Self {
        self.users = Some(users);
        self
    }

    /// Build the state, creating an empty store if none was given
    pub fn build(self) -> AppState {
        let config = self.config.unwrap_or_default();
        let users = self
            .users
            .unwrap_or_else(|| InMemoryUserRepository::with_id_strategy(config.store.id_strategy));
        AppState::with_repository(config, users)
    }
}
