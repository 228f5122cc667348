//! User endpoints
//!
//! Thin translation layer between HTTP and the user service. Conflicts and
//! missing users are answered with a bare status code.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateUserApiRequest, Json, Path, UpdateUserApiRequest, UserResponse,
};
use crate::domain::{DomainError, UserId};

/// Create the user router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}", put(update_user))
        .route("/users/{user_id}", delete(delete_user))
        .route("/users/email/{email}", get(get_user_by_email))
        .route("/users/username/{username}", get(get_user_by_username))
}

fn log_failure(operation: &str, err: DomainError) -> ApiError {
    if err.is_conflict() {
        warn!(operation, error = %err, "User request rejected");
    }
    ApiError::from(err)
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!(username = %request.username, email = %request.email, "Creating user");

    let user = state
        .user_service
        .create(request.into_user())
        .await
        .map_err(|e| log_failure("create", e))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id, "Getting user");

    let user = state
        .user_service
        .get(UserId::new(user_id))
        .await
        .map_err(|e| log_failure("get", e))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("Listing users");

    let users = state
        .user_service
        .list()
        .await
        .map_err(|e| log_failure("list", e))?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// PUT /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id, "Updating user");

    let user = state
        .user_service
        .update(UserId::new(user_id), request.into())
        .await
        .map_err(|e| log_failure("update", e))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id, "Deleting user");

    let deleted = state
        .user_service
        .delete(UserId::new(user_id))
        .await
        .map_err(|e| log_failure("delete", e))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found())
    }
}

/// GET /users/email/{email}
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(email = %email, "Getting user by email");

    let user = state
        .user_service
        .get_by_email(&email)
        .await
        .map_err(|e| log_failure("get_by_email", e))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /users/username/{username}
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(username = %username, "Getting user by username");

    let user = state
        .user_service
        .get_by_username(&username)
        .await
        .map_err(|e| log_failure("get_by_username", e))?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(UserResponse::from(&user)))
}
