//! Type definitions for synthesized traffic

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method recorded on a traffic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// One simulated request/response pair.
///
/// Events are immutable once generated; the buffer drops them on eviction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficEvent {
    /// Opaque random identifier (9 base-36 characters when generated)
    pub id: String,
    /// Display timestamp (local wall clock, `HH:MM:SS`)
    pub timestamp: String,
    pub method: HttpMethod,
    pub endpoint: String,
    /// HTTP status code
    pub status: u16,
    /// Request payload as seen by the endpoint
    pub payload: serde_json::Value,
    /// Response body returned by the endpoint
    pub response: serde_json::Value,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

impl TrafficEvent {
    /// Only 200 counts as a success for the running success rate.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Direction of the per-tick connection random walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStep {
    Up,
    Down,
}

impl ConnectionStep {
    pub fn delta(self) -> i64 {
        match self {
            ConnectionStep::Up => 1,
            ConnectionStep::Down => -1,
        }
    }
}

/// Everything produced by one generator tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub event: TrafficEvent,
    pub connection_step: ConnectionStep,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(status: u16) -> TrafficEvent {
        TrafficEvent {
            id: "abc123xyz".to_string(),
            timestamp: "12:00:00".to_string(),
            method: HttpMethod::Post,
            endpoint: "/data/handleMsg.do".to_string(),
            status,
            payload: json!({"userId": 42, "msgType": 3}),
            response: json!({"success": true, "timestamp": 1_700_000_000_000u64}),
            latency_ms: 88,
        }
    }

    #[test]
    fn test_only_200_is_success() {
        assert!(event(200).is_success());
        assert!(!event(500).is_success());
        assert!(!event(201).is_success());
    }

    #[test]
    fn test_method_serializes_uppercase() {
        let value = serde_json::to_value(event(200)).unwrap();
        assert_eq!(value["method"], "POST");
        assert_eq!(value["latency_ms"], 88);
        assert_eq!(value["payload"]["msgType"], 3);
    }

    #[test]
    fn test_event_parses_from_json() {
        let raw = r#"{
            "id": "e1",
            "timestamp": "09:15:00",
            "method": "GET",
            "endpoint": "/data/handleMsg.do",
            "status": 500,
            "payload": {},
            "response": {"success": false},
            "latency_ms": 140
        }"#;
        let parsed: TrafficEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.method, HttpMethod::Get);
        assert_eq!(parsed.status, 500);
        assert_eq!(HttpMethod::Get.to_string(), "GET");
    }

    #[test]
    fn test_connection_step_delta() {
        assert_eq!(ConnectionStep::Up.delta(), 1);
        assert_eq!(ConnectionStep::Down.delta(), -1);
    }
}
