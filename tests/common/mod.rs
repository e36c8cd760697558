//! Shared test utilities for Higgs integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use higgs::analysis::{AnalysisAdapter, GeminiAnalyzer};
use higgs::api::AppState;
use higgs::config::HiggsConfig;
use higgs::traffic::{ConnectionStep, HttpMethod, Tick, TrafficEvent};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Model name used by every mocked analysis endpoint
pub const TEST_MODEL: &str = "gemini-test";

/// API key used by every mocked analysis endpoint
pub const TEST_API_KEY: &str = "integration-key";

/// Path the analyzer posts to for [`TEST_MODEL`]
pub fn generate_content_path() -> String {
    format!("/v1beta/models/{}:generateContent", TEST_MODEL)
}

/// Build a traffic event with fixed display fields.
pub fn make_event(id: &str, status: u16, latency_ms: u64) -> TrafficEvent {
    TrafficEvent {
        id: id.to_string(),
        timestamp: "12:34:56".to_string(),
        method: HttpMethod::Post,
        endpoint: "/data/handleMsg.do".to_string(),
        status,
        payload: json!({"userId": 4242, "msgType": 3}),
        response: json!({"success": true, "timestamp": 1_700_000_000_000u64}),
        latency_ms,
    }
}

pub fn make_tick(id: &str, status: u16, latency_ms: u64, step: ConnectionStep) -> Tick {
    Tick {
        event: make_event(id, status, latency_ms),
        connection_step: step,
    }
}

/// Default config with the simulator disabled (tests drive ticks by hand).
pub fn quiet_config() -> HiggsConfig {
    let mut config = HiggsConfig::default();
    config.simulator.enabled = false;
    config
}

/// App state whose analysis path always degrades to the fallback.
pub fn offline_state() -> Arc<AppState> {
    Arc::new(
        AppState::new(Arc::new(quiet_config())).with_analyzer(AnalysisAdapter::unavailable(
            higgs::analysis::AnalysisError::Disabled,
        )),
    )
}

/// Adapter talking to a mock server at `base_url`.
pub fn mock_adapter(base_url: &str, timeout: Duration) -> AnalysisAdapter {
    let analyzer = GeminiAnalyzer::new(
        base_url.to_string(),
        TEST_MODEL.to_string(),
        TEST_API_KEY.to_string(),
        reqwest::Client::new(),
    )
    .with_timeout(timeout);
    AnalysisAdapter::new(Arc::new(analyzer)).with_timeout(timeout)
}

/// App state analyzing through a mock server at `base_url`.
pub fn mocked_state(base_url: &str) -> Arc<AppState> {
    Arc::new(
        AppState::new(Arc::new(quiet_config()))
            .with_analyzer(mock_adapter(base_url, Duration::from_secs(5))),
    )
}

/// A `generateContent` response whose candidate text is `text`.
pub fn candidate_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Poll `/api/analysis`-equivalent state until it leaves `pending`.
pub async fn wait_for_ready(state: &AppState) -> higgs::analysis::AnalysisView {
    for _ in 0..200 {
        let view = state.session.analysis_view();
        if view.result().is_some() {
            return view;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("analysis never became ready");
}
