//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier assigned by the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity
///
/// A user is created transiently without an id; the repository assigns one
/// on the first save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, absent until persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<UserId>,
    /// Unique login name
    username: String,
    /// Unique email address
    email: String,
    /// Password as supplied by the caller - never exposed in serialization
    #[serde(skip_serializing)]
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not yet persisted user
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password: password.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a persisted user from stored fields
    pub fn restore(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            username: username.into(),
            email: email.into(),
            password: password.into(),
            created_at,
            updated_at,
        }
    }

    /// Return a copy of this user carrying the given id
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    // Getters

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the user has been assigned an id by the repository
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    // Mutators

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.touch();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new("testuser", "test@example.com", "password")
    }

    #[test]
    fn test_user_id_value() {
        let id = UserId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn test_new_user_is_transient() {
        let user = create_test_user();

        assert!(user.id().is_none());
        assert!(!user.is_persisted());
        assert_eq!(user.username(), "testuser");
        assert_eq!(user.email(), "test@example.com");
        assert_eq!(user.password(), "password");
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_with_id() {
        let user = create_test_user().with_id(UserId::new(1));

        assert_eq!(user.id(), Some(UserId::new(1)));
        assert!(user.is_persisted());
    }

    #[test]
    fn test_restore_keeps_timestamps() {
        let created = Utc::now() - chrono::Duration::days(1);
        let updated = Utc::now();
        let user = User::restore(UserId::new(9), "bob", "bob@example.com", "pw", created, updated);

        assert_eq!(user.id(), Some(UserId::new(9)));
        assert_eq!(user.created_at(), created);
        assert_eq!(user.updated_at(), updated);
    }

    #[test]
    fn test_set_email_touches_updated_at() {
        let mut user = create_test_user();
        let original_updated = user.updated_at();

        // Small delay to ensure timestamp differs
        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_email("new@example.com");
        assert_eq!(user.email(), "new@example.com");
        assert!(user.updated_at() > original_updated);
        assert_eq!(user.created_at(), original_updated);
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user().with_id(UserId::new(1));

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"username\":\"testuser\""));
        assert!(!json.contains("\"password\""));
    }

    #[test]
    fn test_transient_user_serialization_omits_id() {
        let json = serde_json::to_string(&create_test_user()).unwrap();
        assert!(!json.contains("\"id\""));
    }
}
