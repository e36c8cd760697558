//! Monitored target settings shown on the settings view

use serde::{Deserialize, Serialize};

/// Transport shown for the monitored endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Https,
    Http,
    Wss,
}

/// Read-only description of the monitored endpoint and analysis presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub endpoint: String,
    pub protocol: Protocol,
    pub port: u16,
    /// Flag packets with unusual msgType signatures
    pub anomaly_detection: bool,
    /// Latency above which an event is considered slow
    pub latency_threshold_ms: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            endpoint: "/data/handleMsg.do".to_string(),
            protocol: Protocol::Https,
            port: 443,
            anomaly_detection: true,
            latency_threshold_ms: 200,
        }
    }
}
