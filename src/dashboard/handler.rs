//! HTTP handlers for dashboard routes

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::RustEmbed;
use std::sync::Arc;

use crate::api::AppState;
use crate::dashboard::types::InitialData;

const INITIAL_DATA_PLACEHOLDER: &str =
    r#"<script id="initial-data" type="application/json">{}</script>"#;

/// Embedded dashboard assets from dashboard/ directory
#[derive(RustEmbed)]
#[folder = "dashboard/"]
struct DashboardAssets;

/// Collect the data rendered on first paint
pub fn initial_data(state: &AppState) -> InitialData {
    InitialData {
        overview: state.session.overview(),
        analysis: state.session.analysis_view(),
        settings: state.config.target.clone(),
        simulator_running: state.simulator_running(),
    }
}

/// Render `html` with `data` injected into the initial-data script tag.
///
/// `</` is escaped so payload strings cannot close the script element.
pub fn inject_initial_data(html: &str, data: &InitialData) -> String {
    let json = serde_json::to_string(data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    html.replace(
        INITIAL_DATA_PLACEHOLDER,
        &format!(
            r#"<script id="initial-data" type="application/json">{}</script>"#,
            json
        ),
    )
}

/// Serves the main dashboard HTML page with injected initial data
pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Response {
    let Some(content) = DashboardAssets::get("index.html") else {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Dashboard HTML not found").into_response();
    };

    let html = match std::str::from_utf8(&content.data) {
        Ok(html) => html,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Invalid HTML encoding").into_response()
        }
    };

    Html(inject_initial_data(html, &initial_data(&state))).into_response()
}

/// Serves static assets (CSS, JS, etc.)
pub async fn assets_handler(Path(path): Path<String>) -> Response {
    match DashboardAssets::get(&path) {
        Some(content) => {
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime_type.as_ref())], content.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}
