//! Health probe endpoints
//!
//! The event store lives in process, so there is no connection pool to
//! probe; readiness still exercises the store lock so a wedged store is
//! caught before traffic is admitted. The usual Kubernetes split applies:
//! - /health - reachability check with the running version
//! - /health/ready - readiness probe (503 until the store answers)
//! - /health/live - liveness probe (OK whenever the process runs)

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Probe response body
#[derive(Serialize)]
pub struct ProbeResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreCheck>,
}

/// Outcome of the event-store check, only present on readiness
#[derive(Serialize)]
pub struct StoreCheck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResponse {
    fn bare(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store: None,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<ProbeResponse> {
    Json(ProbeResponse::bare("healthy"))
}

/// Readiness probe - checks if the service is ready to accept traffic
/// Returns 503 while the event store is unavailable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<ProbeResponse>, (StatusCode, Json<ProbeResponse>)> {
    match state.store().health_check().await {
        Ok(()) => {
            let mut response = ProbeResponse::bare("ready");
            response.store = Some(StoreCheck {
                status: "healthy",
                error: None,
            });
            Ok(Json(response))
        }
        Err(e) => {
            let mut response = ProbeResponse::bare("not_ready");
            response.store = Some(StoreCheck {
                status: "unhealthy",
                error: Some(e.to_string()),
            });
            Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
        }
    }
}

/// Liveness probe - checks if the service is alive
/// Always returns OK if the server is running
pub async fn liveness_check() -> Json<ProbeResponse> {
    Json(ProbeResponse::bare("alive"))
}
