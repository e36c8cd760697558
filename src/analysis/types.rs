//! Analysis result and display-state types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary returned whenever the remote analysis cannot be used.
pub const FALLBACK_SUMMARY: &str = "Failed to perform AI analysis due to service interruption.";

/// Recommendations returned alongside [`FALLBACK_SUMMARY`].
pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = ["Manually review logs", "Check API connectivity"];

/// Risk verdict for one log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized output of one analysis.
///
/// Field names follow the JSON schema the model is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// The fixed result substituted for any failed analysis.
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            risk_level: RiskLevel::Low,
            recommendations: FALLBACK_RECOMMENDATIONS
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

/// What the analysis panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisView {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request for `event_id` is in flight
    Pending { event_id: String, request_id: String },
    /// The latest requested analysis has landed
    Ready {
        event_id: String,
        request_id: String,
        result: AnalysisResult,
    },
}

impl AnalysisView {
    pub fn event_id(&self) -> Option<&str> {
        match self {
            AnalysisView::Idle => None,
            AnalysisView::Pending { event_id, .. } | AnalysisView::Ready { event_id, .. } => {
                Some(event_id)
            }
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisView::Ready { result, .. } => Some(result),
            _ => None,
        }
    }
}
