//! Type definitions for dashboard data structures

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisView;
use crate::config::TargetConfig;
use crate::traffic::{RunningStats, TrafficEvent};

/// Number of failed events shown in the "Recent Exceptions" panel
pub const RECENT_EXCEPTIONS_LIMIT: usize = 5;

/// Data backing the overview view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub stats: RunningStats,
    /// Buffered events, newest first
    pub logs: Vec<TrafficEvent>,
    /// Newest failed events, at most [`RECENT_EXCEPTIONS_LIMIT`]
    pub recent_exceptions: Vec<TrafficEvent>,
}

/// Everything the page needs on first paint, injected into the HTML.
#[derive(Debug, Clone, Serialize)]
pub struct InitialData {
    pub overview: DashboardOverview,
    pub analysis: AnalysisView,
    pub settings: TargetConfig,
    pub simulator_running: bool,
}

/// WebSocket update message sent to dashboard clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketUpdate {
    /// Type of update
    pub update_type: UpdateType,
    /// JSON payload for the update
    pub data: serde_json::Value,
}

/// Type of WebSocket update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum UpdateType {
    /// A simulated event was recorded; carries the event and the new stats
    TrafficTick,
    /// The analysis panel state changed
    AnalysisUpdate,
}
