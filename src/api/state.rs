//! Application state - Dependency injection container.
//!
//! Provides centralized access to the application services.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{FileStorage, JsonUserRepository, MemoryStorage};
use crate::services::{AuthService, Authenticator, UserManager, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Create application state over the configured data file.
    pub fn from_config(config: Config) -> Self {
        let repo = Arc::new(JsonUserRepository::new(FileStorage::new(&config.data_file)));
        let user_service: Arc<dyn UserService> = Arc::new(UserManager::new(repo));
        let auth_service: Arc<dyn AuthService> =
            Arc::new(Authenticator::new(user_service.clone(), config));

        Self {
            auth_service,
            user_service,
        }
    }

    /// State over a seeded in-memory document. Used by tests and
    /// ephemeral runs that should not touch the filesystem.
    pub fn in_memory(config: Config) -> AppResult<Self> {
        let repo = Arc::new(JsonUserRepository::new(MemoryStorage::seeded()?));
        let user_service: Arc<dyn UserService> = Arc::new(UserManager::new(repo));
        let auth_service: Arc<dyn AuthService> =
            Arc::new(Authenticator::new(user_service.clone(), config));

        Ok(Self {
            auth_service,
            user_service,
        })
    }
}
