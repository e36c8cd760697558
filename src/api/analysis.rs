//! Analysis endpoints.
//!
//! `POST /api/logs/:id/analyze` answers immediately with the pending view and
//! runs the remote call in a background task. The result reaches clients
//! through `GET /api/analysis` and the WebSocket stream.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;
use crate::analysis::AnalysisView;

/// POST /api/logs/:id/analyze
pub async fn request_analysis(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<AnalysisView>), ApiError> {
    let (event, ticket) = state
        .session
        .begin_analysis(&id)
        .ok_or_else(|| ApiError::log_not_found(&id))?;

    let pending = AnalysisView::Pending {
        event_id: ticket.event_id.clone(),
        request_id: ticket.request_id.clone(),
    };

    let task_state = Arc::clone(&state);
    tokio::spawn(async move {
        let result = task_state.analyzer.analyze(&event).await;
        let applied = task_state.session.complete_analysis(&ticket, result);
        tracing::info!(
            event_id = %ticket.event_id,
            request_id = %ticket.request_id,
            applied,
            "Analysis finished"
        );
    });

    Ok((StatusCode::ACCEPTED, Json(pending)))
}

/// GET /api/analysis
pub async fn current_analysis(State(state): State<Arc<AppState>>) -> Json<AnalysisView> {
    Json(state.session.analysis_view())
}
