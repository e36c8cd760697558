//! Read-only traffic endpoints backing the dashboard views.

use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;
use crate::config::TargetConfig;
use crate::dashboard::types::DashboardOverview;
use crate::traffic::{RunningStats, TrafficEvent};

/// GET /api/overview
pub async fn overview(State(state): State<Arc<AppState>>) -> Json<DashboardOverview> {
    Json(state.session.overview())
}

/// GET /api/logs - buffered events, newest first
pub async fn list_logs(State(state): State<Arc<AppState>>) -> Json<Vec<TrafficEvent>> {
    Json(state.session.logs())
}

/// GET /api/logs/:id
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TrafficEvent>, ApiError> {
    state
        .session
        .get_event(&id)
        .map(Json)
        .ok_or_else(|| ApiError::log_not_found(&id))
}

/// GET /api/stats
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<RunningStats> {
    Json(state.session.stats())
}

/// GET /api/settings
pub async fn settings(State(state): State<Arc<AppState>>) -> Json<TargetConfig> {
    Json(state.config.target.clone())
}
