//! WebSocket handler for real-time dashboard updates

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::analysis::AnalysisView;
use crate::api::AppState;
use crate::dashboard::types::{UpdateType, WebSocketUpdate};
use crate::traffic::{RunningStats, TrafficEvent};

/// Largest serialized traffic tick forwarded to a client
const MAX_MESSAGE_BYTES: usize = 10 * 1024;

/// Handles WebSocket upgrade requests for dashboard real-time updates
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.session.subscribe();

    tracing::debug!("Dashboard client connected");

    let session = Arc::clone(&state.session);
    let send_task = tokio::spawn(async move {
        loop {
            let update = match rx.recv().await {
                Ok(update) => update,
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Dashboard client lagging, dropped updates");
                    // A dropped analysis update would leave the panel pending
                    create_analysis_update(&session.analysis_view())
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            };

            let Some(json) = encode_update(&update) else {
                continue;
            };
            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    tracing::debug!("Dashboard client disconnected");
}

/// Serialize an update for the socket.
///
/// Traffic ticks over [`MAX_MESSAGE_BYTES`] are dropped; the next tick carries
/// fresh stats. Analysis updates are always sent, since the client has no
/// other trigger to leave the pending state.
pub fn encode_update(update: &WebSocketUpdate) -> Option<String> {
    let json = match serde_json::to_string(update) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize WebSocket update: {}", e);
            return None;
        }
    };

    if update.update_type == UpdateType::TrafficTick && json.len() > MAX_MESSAGE_BYTES {
        tracing::warn!(
            size = json.len(),
            "Traffic tick exceeds 10KB limit, skipping"
        );
        return None;
    }

    Some(json)
}

/// Create the update sent after each recorded event
pub fn create_traffic_tick_update(event: &TrafficEvent, stats: &RunningStats) -> WebSocketUpdate {
    WebSocketUpdate {
        update_type: UpdateType::TrafficTick,
        data: serde_json::json!({
            "event": event,
            "stats": stats,
        }),
    }
}

/// Create the update sent when the analysis panel changes
pub fn create_analysis_update(view: &AnalysisView) -> WebSocketUpdate {
    WebSocketUpdate {
        update_type: UpdateType::AnalysisUpdate,
        data: serde_json::to_value(view).unwrap_or(serde_json::Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, RiskLevel};
    use crate::traffic::HttpMethod;

    #[test]
    fn test_traffic_tick_update_carries_event_and_stats() {
        let event = TrafficEvent {
            id: "abcdefghi".to_string(),
            timestamp: "10:00:00".to_string(),
            method: HttpMethod::Post,
            endpoint: "/data/handleMsg.do".to_string(),
            status: 500,
            payload: serde_json::json!({"userId": 1, "msgType": 2}),
            response: serde_json::json!({"success": true}),
            latency_ms: 99,
        };
        let stats = RunningStats::default().apply(&event, crate::traffic::ConnectionStep::Up);

        let update = create_traffic_tick_update(&event, &stats);
        assert_eq!(update.update_type, UpdateType::TrafficTick);
        assert_eq!(update.data["event"]["id"], "abcdefghi");
        assert_eq!(update.data["event"]["method"], "POST");
        assert_eq!(update.data["stats"]["total_requests"], 1);
        assert_eq!(update.data["stats"]["active_connections"], 13);
    }

    #[test]
    fn test_analysis_update_tags_state() {
        let view = AnalysisView::Ready {
            event_id: "e1".to_string(),
            request_id: "r1".to_string(),
            result: AnalysisResult {
                summary: "fine".to_string(),
                risk_level: RiskLevel::Low,
                recommendations: vec![],
            },
        };
        let update = create_analysis_update(&view);
        assert_eq!(update.update_type, UpdateType::AnalysisUpdate);
        assert_eq!(update.data["state"], "ready");
        assert_eq!(update.data["result"]["riskLevel"], "Low");
    }

    #[test]
    fn test_large_analysis_update_is_still_sent() {
        let view = AnalysisView::Ready {
            event_id: "e1".to_string(),
            request_id: "r1".to_string(),
            result: AnalysisResult {
                summary: "x".repeat(MAX_MESSAGE_BYTES * 2),
                risk_level: RiskLevel::High,
                recommendations: vec!["Review".to_string()],
            },
        };
        let json = encode_update(&create_analysis_update(&view)).unwrap();
        assert!(json.len() > MAX_MESSAGE_BYTES);
        assert!(json.contains("\"ready\""));
    }

    #[test]
    fn test_oversized_traffic_tick_is_skipped() {
        let update = WebSocketUpdate {
            update_type: UpdateType::TrafficTick,
            data: serde_json::json!({ "padding": "x".repeat(MAX_MESSAGE_BYTES) }),
        };
        assert!(encode_update(&update).is_none());

        let small = WebSocketUpdate {
            update_type: UpdateType::TrafficTick,
            data: serde_json::json!({}),
        };
        assert!(encode_update(&small).is_some());
    }

    #[test]
    fn test_idle_analysis_update() {
        let update = create_analysis_update(&AnalysisView::Idle);
        assert_eq!(update.data["state"], "idle");
    }
}
