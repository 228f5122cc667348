//! API error types and the mapping from domain errors to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
///
/// Conflicts and missing resources carry no body; malformed requests and
/// server failures are rendered as an `ApiErrorResponse`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: Option<ApiErrorResponse>,
}

impl ApiError {
    /// Create a new API error with a JSON body
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: Some(ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            }),
        }
    }

    /// Create an API error that renders as a bare status code
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            response: None,
        }
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        if let Some(response) = self.response.as_mut() {
            response.error.code = Some(code.into());
        }
        self
    }

    /// Not found, empty body
    pub fn not_found() -> Self {
        Self::empty(StatusCode::NOT_FOUND)
    }

    /// Conflict, empty body
    pub fn conflict() -> Self {
        Self::empty(StatusCode::CONFLICT)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.response {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Conflict { .. } => Self::conflict(),
            DomainError::NotFound { .. } => Self::not_found(),
            DomainError::Storage { message } => {
                error!(error = %message, "Storage failure");
                Self::internal("Internal server error").with_code("storage_error")
            }
            DomainError::Internal { message } => {
                error!(error = %message, "Internal failure");
                Self::internal("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.response {
            Some(body) => write!(f, "{}: {}", body.error.error_type, body.error.message),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}
