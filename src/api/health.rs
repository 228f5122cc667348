//! Liveness and readiness endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;

use super::state::AppState;
use crate::api::types::Json;

/// Body returned by `/health` and `/ready`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_storage: Option<StorageCheck>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of querying the user repository
#[derive(Debug, Serialize)]
pub struct StorageCheck {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: u64,
}

impl HealthResponse {
    fn new(status: HealthStatus, user_storage: Option<StorageCheck>) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            user_storage,
        }
    }
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::new(HealthStatus::Healthy, None)))
}

/// GET /ready
///
/// 503 when user storage cannot be queried.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let check = check_user_storage(&state).await;
    let status = check.status;

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(HealthResponse::new(status, Some(check))))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_user_storage(state: &AppState) -> StorageCheck {
    let start = Instant::now();
    let result = state.user_service.count().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(users) => StorageCheck {
            status: HealthStatus::Healthy,
            users: Some(users),
            error: None,
            latency_ms,
        },
        Err(e) => {
            warn!(error = %e, "User storage readiness check failed");
            StorageCheck {
                status: HealthStatus::Unhealthy,
                users: None,
                error: Some(e.to_string()),
                latency_ms,
            }
        }
    }
}
