//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug)]
struct UserStore {
    users: BTreeMap<UserId, User>,
    /// Index for email -> user ID lookup
    email_index: HashMap<String, UserId>,
    /// Index for username -> user ID lookup
    username_index: HashMap<String, UserId>,
    next_id: i64,
}

impl UserStore {
    fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            email_index: HashMap::new(),
            username_index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Fail if `email` or `username` belongs to a user other than `owner`
    fn check_unique(
        &self,
        owner: Option<UserId>,
        email: &str,
        username: &str,
    ) -> Result<(), DomainError> {
        if let Some(id) = self.email_index.get(email) {
            if Some(*id) != owner {
                return Err(DomainError::conflict(format!(
                    "User with email {} already exists",
                    email
                )));
            }
        }

        if let Some(id) = self.username_index.get(username) {
            if Some(*id) != owner {
                return Err(DomainError::conflict(format!(
                    "User with username {} already exists",
                    username
                )));
            }
        }

        Ok(())
    }

    fn insert(&mut self, user: User) -> User {
        let id = UserId::new(self.next_id);
        self.next_id += 1;

        let user = user.with_id(id);
        self.index(id, &user);
        self.users.insert(id, user.clone());

        user
    }

    fn replace(&mut self, id: UserId, user: User) -> Result<User, DomainError> {
        let Some(old) = self.users.remove(&id) else {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        };

        self.email_index.remove(old.email());
        self.username_index.remove(old.username());
        self.index(id, &user);
        self.users.insert(id, user.clone());

        Ok(user)
    }

    fn index(&mut self, id: UserId, user: &User) {
        self.email_index.insert(user.email().to_string(), id);
        self.username_index.insert(user.username().to_string(), id);
    }
}

/// In-memory implementation of UserRepository
///
/// Uniqueness checks and writes happen under one write lock, so concurrent
/// saves of the same email or username cannot both succeed.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<UserStore>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(UserStore::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .email_index
            .get(email)
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;

        Ok(store
            .username_index
            .get(username)
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        store.check_unique(user.id(), user.email(), user.username())?;

        match user.id() {
            Some(id) => store.replace(id, user),
            None => Ok(store.insert(user)),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;

        if let Some(user) = store.users.remove(&id) {
            store.email_index.remove(user.email());
            store.username_index.remove(user.username());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let store = self.store.read().await;
        Ok(store.users.len())
    }
}
