//! User service enforcing email and username uniqueness

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// Request for replacing a user's mutable fields
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User service for user management
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user
    ///
    /// The email is checked before the username; a taken email fails without
    /// looking at the username. Nothing is written unless both are free.
    pub async fn create(&self, candidate: User) -> Result<User, DomainError> {
        if self
            .repository
            .find_by_email(candidate.email())
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "User with email {} already exists",
                candidate.email()
            )));
        }

        if self
            .repository
            .find_by_username(candidate.username())
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "User with username {} already exists",
                candidate.username()
            )));
        }

        let user = self.repository.save(candidate).await?;

        if let Some(id) = user.id() {
            info!(user_id = %id, username = %user.username(), "User created");
        }

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.find_by_id(id).await
    }

    /// Get a user by email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.find_by_email(email).await
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.repository.find_by_username(username).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.find_all().await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    /// Replace a user's username, email and password
    ///
    /// Returns `None` when no user has the given id. Collisions with another
    /// user's email or username are reported by the repository as conflicts.
    pub async fn update(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> Result<Option<User>, DomainError> {
        let Some(mut user) = self.repository.find_by_id(id).await? else {
            debug!(user_id = %id, "Update requested for unknown user");
            return Ok(None);
        };

        user.set_username(request.username);
        user.set_email(request.email);
        user.set_password(request.password);

        let updated = self.repository.save(user).await?;
        info!(user_id = %id, "User updated");

        Ok(Some(updated))
    }

    /// Delete a user
    pub async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let deleted = self.repository.delete_by_id(id).await?;

        if deleted {
            info!(user_id = %id, "User deleted");
        }

        Ok(deleted)
    }
}
