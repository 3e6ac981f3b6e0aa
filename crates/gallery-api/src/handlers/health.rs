//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use gallery_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health, GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.config().app.name.clone()))
}

/// Readiness check with a database probe
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = gallery_db::ping(state.pool()).await;

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
