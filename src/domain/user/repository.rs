//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Implementations must reject a save that would give two users the same
/// email or username with `DomainError::Conflict`, independently of any
/// check the caller performed beforehand.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by their username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Persist a user
    ///
    /// A user without an id is inserted and receives a fresh id. A user with
    /// an id replaces the stored record, failing with `NotFound` if there is
    /// none.
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// List all users ordered by id
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Delete a user, returning whether one was removed
    async fn delete_by_id(&self, id: UserId) -> Result<bool, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a user ID exists
    async fn exists_by_id(&self, id: UserId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// A repository call observed by the mock
    #[derive(Debug, Clone, PartialEq)]
    pub enum RepositoryCall {
        FindById(UserId),
        FindByEmail(String),
        FindByUsername(String),
        Save { username: String, email: String },
        FindAll,
        DeleteById(UserId),
        Count,
    }

    /// Mock user repository that records every call
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<BTreeMap<UserId, User>>>,
        calls: Arc<RwLock<Vec<RepositoryCall>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository pre-populated with persisted users
        pub fn with_users(users: Vec<User>) -> Self {
            let map = users
                .into_iter()
                .filter_map(|u| u.id().map(|id| (id, u)))
                .collect();

            Self {
                users: Arc::new(RwLock::new(map)),
                ..Self::default()
            }
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Calls recorded so far, in order
        pub async fn calls(&self) -> Vec<RepositoryCall> {
            self.calls.read().await.clone()
        }

        /// Number of users currently stored
        pub async fn len(&self) -> usize {
            self.users.read().await.len()
        }

        async fn record(&self, call: RepositoryCall) -> Result<(), DomainError> {
            self.calls.write().await.push(call);

            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
            self.record(RepositoryCall::FindById(id)).await?;
            Ok(self.users.read().await.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            self.record(RepositoryCall::FindByEmail(email.to_string())).await?;
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.email() == email).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            self.record(RepositoryCall::FindByUsername(username.to_string()))
                .await?;
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.username() == username).cloned())
        }

        async fn save(&self, user: User) -> Result<User, DomainError> {
            self.record(RepositoryCall::Save {
                username: user.username().to_string(),
                email: user.email().to_string(),
            })
            .await?;

            let mut users = self.users.write().await;

            let taken = users.values().any(|u| {
                u.id() != user.id() && (u.email() == user.email() || u.username() == user.username())
            });

            if taken {
                return Err(DomainError::conflict("Mock unique constraint violated"));
            }

            let id = match user.id() {
                Some(id) if users.contains_key(&id) => id,
                Some(id) => {
                    return Err(DomainError::not_found(format!("User '{}' not found", id)));
                }
                None => UserId::new(users.keys().last().map_or(1, |id| id.value() + 1)),
            };

            let saved = user.with_id(id);
            users.insert(id, saved.clone());
            Ok(saved)
        }

        async fn find_all(&self) -> Result<Vec<User>, DomainError> {
            self.record(RepositoryCall::FindAll).await?;
            Ok(self.users.read().await.values().cloned().collect())
        }

        async fn delete_by_id(&self, id: UserId) -> Result<bool, DomainError> {
            self.record(RepositoryCall::DeleteById(id)).await?;
            Ok(self.users.write().await.remove(&id).is_some())
        }

        async fn count(&self) -> Result<usize, DomainError> {
            self.record(RepositoryCall::Count).await?;
            Ok(self.users.read().await.len())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_save_assigns_sequential_ids() {
            let repo = MockUserRepository::new();

            let first = repo
                .save(User::new("user1", "user1@example.com", "pw"))
                .await
                .unwrap();
            let second = repo
                .save(User::new("user2", "user2@example.com", "pw"))
                .await
                .unwrap();

            assert_eq!(first.id(), Some(UserId::new(1)));
            assert_eq!(second.id(), Some(UserId::new(2)));
        }

        #[tokio::test]
        async fn test_records_calls_in_order() {
            let repo = MockUserRepository::new();

            repo.find_by_email("a@example.com").await.unwrap();
            repo.find_by_username("a").await.unwrap();
            repo.count().await.unwrap();

            assert_eq!(
                repo.calls().await,
                vec![
                    RepositoryCall::FindByEmail("a@example.com".to_string()),
                    RepositoryCall::FindByUsername("a".to_string()),
                    RepositoryCall::Count,
                ]
            );
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.find_by_id(UserId::new(1)).await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }

        #[tokio::test]
        async fn test_exists_by_id_default_method() {
            let user = User::new("testuser", "test@example.com", "pw").with_id(UserId::new(3));
            let repo = MockUserRepository::with_users(vec![user]);

            assert!(repo.exists_by_id(UserId::new(3)).await.unwrap());
            assert!(!repo.exists_by_id(UserId::new(4)).await.unwrap());
        }
    }
}
