//! Traffic simulator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the synthetic traffic generator and the session it feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Start the periodic simulator with the server
    pub enabled: bool,
    /// Milliseconds between generated events
    pub interval_ms: u64,
    /// Endpoint path stamped on every generated event
    pub endpoint: String,
    /// Probability that a generated event has status 200 (otherwise 500)
    pub success_probability: f64,
    /// Inclusive lower bound of synthetic latency
    pub latency_min_ms: u64,
    /// Inclusive upper bound of synthetic latency
    pub latency_max_ms: u64,
    /// Starting value of the active connection random walk
    pub initial_connections: i64,
    /// Maximum number of events retained by the log buffer
    pub buffer_capacity: usize,
    /// Floor the connection walk at zero instead of letting it drift negative
    pub clamp_connections: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 3000,
            endpoint: "/data/handleMsg.do".to_string(),
            success_probability: 0.95,
            latency_min_ms: 20,
            latency_max_ms: 169,
            initial_connections: 12,
            buffer_capacity: 50,
            clamp_connections: false,
        }
    }
}

impl SimulatorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
