//! Last-requested-wins bookkeeping for in-flight analyses.
//!
//! Every request takes a ticket carrying a monotonically increasing token.
//! A finished analysis is applied only if its token is still the latest one
//! issued; anything older has been superseded and is dropped.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::types::{AnalysisResult, AnalysisView};

/// Handle for one requested analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    token: u64,
    pub event_id: String,
    pub request_id: String,
}

impl AnalysisTicket {
    pub fn token(&self) -> u64 {
        self.token
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    latest_token: u64,
    view: AnalysisView,
}

/// Tracks which analysis the panel should show.
#[derive(Debug, Default)]
pub struct AnalysisTracker {
    state: Mutex<TrackerState>,
}

impl AnalysisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new analysis for `event_id`, superseding any in-flight one.
    ///
    /// The view moves to `Pending` immediately, clearing any previous result.
    pub fn begin(&self, event_id: &str, request_id: &str) -> AnalysisTicket {
        let mut state = self.lock();
        state.latest_token += 1;
        state.view = AnalysisView::Pending {
            event_id: event_id.to_string(),
            request_id: request_id.to_string(),
        };
        AnalysisTicket {
            token: state.latest_token,
            event_id: event_id.to_string(),
            request_id: request_id.to_string(),
        }
    }

    /// Apply a finished analysis.
    ///
    /// Returns `false` and leaves the view untouched when a newer request
    /// has been issued since `ticket` was taken.
    pub fn complete(&self, ticket: &AnalysisTicket, result: AnalysisResult) -> bool {
        let mut state = self.lock();
        if state.latest_token != ticket.token {
            metrics::counter!("higgs_analysis_superseded_total").increment(1);
            tracing::debug!(
                event_id = %ticket.event_id,
                request_id = %ticket.request_id,
                "Discarding superseded analysis result"
            );
            return false;
        }
        state.view = AnalysisView::Ready {
            event_id: ticket.event_id.clone(),
            request_id: ticket.request_id.clone(),
            result,
        };
        true
    }

    /// Current display state
    pub fn view(&self) -> AnalysisView {
        self.lock().view.clone()
    }
}
