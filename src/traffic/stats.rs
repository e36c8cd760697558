//! Rolling statistics over the traffic stream.
//!
//! Each event updates the aggregate in O(1). Alongside the display values the
//! aggregate keeps the exact success count and latency sum, so the average and
//! rate never accumulate rounding drift from previously rounded values.

use serde::{Deserialize, Serialize};

use super::types::{ConnectionStep, TrafficEvent};

/// Starting point of the active connection random walk.
pub const INITIAL_CONNECTIONS: i64 = 12;

/// Incrementally maintained aggregate metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningStats {
    pub total_requests: u64,
    /// Mean latency, truncated toward zero
    pub avg_latency_ms: u64,
    /// Percentage of status 200 events, rounded half up
    pub success_rate: u8,
    /// Random walk, ±1 per event; unbounded unless floored by the caller
    pub active_connections: i64,
    #[serde(skip)]
    successes: u64,
    #[serde(skip)]
    latency_sum_ms: u64,
}

impl RunningStats {
    pub fn new(initial_connections: i64) -> Self {
        Self {
            total_requests: 0,
            avg_latency_ms: 0,
            success_rate: 0,
            active_connections: initial_connections,
            successes: 0,
            latency_sum_ms: 0,
        }
    }

    /// Fold one event into the aggregate.
    pub fn apply(&self, event: &TrafficEvent, step: ConnectionStep) -> Self {
        let total_requests = self.total_requests + 1;
        let successes = self.successes + u64::from(event.is_success());
        let latency_sum_ms = self.latency_sum_ms.saturating_add(event.latency_ms);

        Self {
            total_requests,
            avg_latency_ms: latency_sum_ms / total_requests,
            success_rate: rounded_percentage(successes, total_requests),
            active_connections: self.active_connections + step.delta(),
            successes,
            latency_sum_ms,
        }
    }

    /// Raise the connection count to at least `floor`.
    pub fn with_connection_floor(mut self, floor: i64) -> Self {
        self.active_connections = self.active_connections.max(floor);
        self
    }

    /// Number of non-200 events seen so far
    pub fn failures(&self) -> u64 {
        self.total_requests - self.successes
    }
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new(INITIAL_CONNECTIONS)
    }
}

/// `round(100 * part / whole)` with halves rounded up, in integer arithmetic.
fn rounded_percentage(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    let pct = (200 * part + whole) / (2 * whole);
    pct.min(100) as u8
}
