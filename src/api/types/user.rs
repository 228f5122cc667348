//! User request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::infrastructure::user::UpdateUserRequest;

/// Request body for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateUserApiRequest {
    /// Build the transient user this request describes
    pub fn into_user(self) -> User {
        User::new(self.username, self.email, self.password)
    }
}

/// Request body for replacing a user
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserApiRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<UpdateUserApiRequest> for UpdateUserRequest {
    fn from(request: UpdateUserApiRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// User as returned by the API; the password is never included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().map(|id| id.value()),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "username": "testuser",
            "email": "test@example.com",
            "password": "password"
        }"#;

        let request: CreateUserApiRequest = serde_json::from_str(json).unwrap();
        let user = request.into_user();

        assert!(user.id().is_none());
        assert_eq!(user.username(), "testuser");
        assert_eq!(user.email(), "test@example.com");
        assert_eq!(user.password(), "password");
    }

    #[test]
    fn test_create_request_requires_password() {
        let json = r#"{ "username": "testuser", "email": "test@example.com" }"#;

        let result: Result<CreateUserApiRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_conversion() {
        let json = r#"{ "username": "renamed", "email": "r@example.com", "password": "pw" }"#;

        let request: UpdateUserApiRequest = serde_json::from_str(json).unwrap();
        let update = UpdateUserRequest::from(request);

        assert_eq!(update.username, "renamed");
        assert_eq!(update.email, "r@example.com");
        assert_eq!(update.password, "pw");
    }

    #[test]
    fn test_user_response_from() {
        let user = User::new("testuser", "test@example.com", "secret").with_id(UserId::new(1));

        let response = UserResponse::from(&user);

        assert_eq!(response.id, Some(1));
        assert_eq!(response.username, "testuser");
        assert_eq!(response.email, "test@example.com");
    }

    #[test]
    fn test_user_response_serialization_has_no_password() {
        let user = User::new("testuser", "test@example.com", "secret").with_id(UserId::new(1));

        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();

        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"username\":\"testuser\""));
        assert!(json.contains("\"created_at\":"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
