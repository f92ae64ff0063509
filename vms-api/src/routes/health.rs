/// Health check endpoint
///
/// ```text
/// GET /health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "memory",
///   "store_status": "connected"
/// }
/// ```
///
/// Always answers 200; a failing store shows up as `"status": "degraded"`.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,

    /// Store backend name
    pub store: String,
    pub store_status: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, store_status) = match state.store.health_check().await {
        Ok(()) => ("healthy", "connected"),
        Err(e) => {
            warn!(error = %e, "Store health check failed");
            ("degraded", "disconnected")
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store.backend_name().to_string(),
        store_status: store_status.to_string(),
    })
}
