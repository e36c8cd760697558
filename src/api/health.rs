//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub simulator_running: bool,
    pub total_requests: u64,
}

/// GET /health - Return server health.
///
/// `degraded` when the simulator is configured but not running.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let simulator_running = state.simulator_running();
    let status = if state.config.simulator.enabled && !simulator_running {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        simulator_running,
        total_requests: state.session.stats().total_requests,
    })
}
