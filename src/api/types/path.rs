//! Path extractor that returns errors as JSON

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorType};

/// Wraps `axum::extract::Path` so a malformed segment such as `/users/abc`
/// is answered with an `ApiErrorResponse` body.
#[derive(Debug, Clone, Copy)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => Err(ApiError::new(
                rejection.status(),
                ApiErrorType::InvalidRequestError,
                format!("Invalid path parameter: {}", rejection.body_text()),
            )
            .with_code("invalid_path_parameter")),
        }
    }
}
