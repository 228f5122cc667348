//! User Service
//!
//! A user management REST API:
//! - Create users with unique email and username
//! - Look users up by id, email or username
//! - Replace, list and delete users
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AppState, UserServiceTrait};
use config::StorageBackend;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let user_service: Arc<dyn UserServiceTrait> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage for users");
            Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())))
        }
        StorageBackend::Postgres => {
            let database_url = config.storage.resolve_database_url().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL environment variable is required for postgres storage")
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let repository = PostgresUserRepository::new(pool);
            repository.ensure_schema().await?;

            Arc::new(UserService::new(Arc::new(repository)))
        }
    };

    Ok(AppState::new(user_service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    #[tokio::test]
    async fn test_default_state_uses_in_memory_storage() {
        let state = create_app_state().await.unwrap();

        let created = state
            .user_service
            .create(User::new("testuser", "test@example.com", "password"))
            .await
            .unwrap();

        assert!(created.id().is_some());
        assert_eq!(state.user_service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_postgres_without_url_fails() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Postgres;

        if std::env::var("DATABASE_URL").is_ok() {
            return;
        }

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
