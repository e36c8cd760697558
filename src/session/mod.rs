//! # Dashboard Session
//!
//! The single owner of mutable dashboard state: the log buffer, the running
//! statistics, the analysis tracker and the broadcast channel feeding
//! WebSocket clients.
//!
//! Buffer and stats sit behind one lock. [`DashboardSession::record`] applies
//! the buffer push and the stats update under the same write guard, so a
//! reader never observes one without the other.

pub mod simulator;

pub use simulator::{SimulatorHandle, TrafficSimulator};

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::analysis::{AnalysisResult, AnalysisTicket, AnalysisTracker, AnalysisView};
use crate::config::SimulatorConfig;
use crate::dashboard::types::{DashboardOverview, WebSocketUpdate, RECENT_EXCEPTIONS_LIMIT};
use crate::dashboard::websocket::{create_analysis_update, create_traffic_tick_update};
use crate::logging::generate_request_id;
use crate::traffic::{LogBuffer, RunningStats, Tick, TrafficEvent};

/// Capacity of the WebSocket broadcast channel
const BROADCAST_CAPACITY: usize = 256;

struct SessionState {
    buffer: LogBuffer,
    stats: RunningStats,
}

/// Consistent copy of buffer and stats taken under one read guard
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub stats: RunningStats,
    /// Newest first
    pub logs: Vec<TrafficEvent>,
}

/// Explicit session context for one dashboard.
pub struct DashboardSession {
    state: RwLock<SessionState>,
    clamp_connections: bool,
    tracker: AnalysisTracker,
    updates: broadcast::Sender<WebSocketUpdate>,
    cancel_token: CancellationToken,
}

impl DashboardSession {
    /// Create a session sized and seeded from the simulator settings.
    pub fn new(config: &SimulatorConfig) -> Self {
        let (updates, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            state: RwLock::new(SessionState {
                buffer: LogBuffer::new(config.buffer_capacity),
                stats: RunningStats::new(config.initial_connections),
            }),
            clamp_connections: config.clamp_connections,
            tracker: AnalysisTracker::new(),
            updates,
            cancel_token: CancellationToken::new(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one simulated tick.
    ///
    /// Returns the stats after the update.
    pub fn record(&self, tick: Tick) -> RunningStats {
        let Tick {
            event,
            connection_step,
        } = tick;

        let (stats, buffered) = {
            let mut state = self.write();
            let mut next = state.stats.apply(&event, connection_step);
            if self.clamp_connections {
                next = next.with_connection_floor(0);
            }
            state.stats = next;
            state.buffer.push(event.clone());
            (next, state.buffer.len())
        };

        let status = event.status.to_string();
        metrics::counter!("higgs_traffic_events_total", "status" => status).increment(1);
        metrics::histogram!("higgs_traffic_latency_seconds")
            .record(event.latency_ms as f64 / 1000.0);
        metrics::gauge!("higgs_active_connections").set(stats.active_connections as f64);
        metrics::gauge!("higgs_buffer_entries").set(buffered as f64);

        tracing::trace!(
            event_id = %event.id,
            status = event.status,
            latency_ms = event.latency_ms,
            total_requests = stats.total_requests,
            "Recorded traffic event"
        );

        self.broadcast(create_traffic_tick_update(&event, &stats));
        stats
    }

    pub fn stats(&self) -> RunningStats {
        self.read().stats
    }

    /// Buffered events, newest first
    pub fn logs(&self) -> Vec<TrafficEvent> {
        self.read().buffer.all()
    }

    pub fn get_event(&self, id: &str) -> Option<TrafficEvent> {
        self.read().buffer.get(id).cloned()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read();
        SessionSnapshot {
            stats: state.stats,
            logs: state.buffer.all(),
        }
    }

    /// Stats, logs and the recent exceptions panel in one consistent read
    pub fn overview(&self) -> DashboardOverview {
        let state = self.read();
        DashboardOverview {
            stats: state.stats,
            logs: state.buffer.all(),
            recent_exceptions: state.buffer.recent_failures(RECENT_EXCEPTIONS_LIMIT),
        }
    }

    /// Start an analysis of a buffered event.
    ///
    /// Returns the event and its ticket, or `None` when the event is no longer
    /// buffered. Any in-flight analysis is superseded.
    pub fn begin_analysis(&self, event_id: &str) -> Option<(TrafficEvent, AnalysisTicket)> {
        let event = self.get_event(event_id)?;
        let ticket = self.tracker.begin(event_id, &generate_request_id());
        tracing::info!(
            event_id = %ticket.event_id,
            request_id = %ticket.request_id,
            "Analysis requested"
        );
        self.broadcast(create_analysis_update(&self.tracker.view()));
        Some((event, ticket))
    }

    /// Apply a finished analysis if it is still the latest request.
    pub fn complete_analysis(&self, ticket: &AnalysisTicket, result: AnalysisResult) -> bool {
        let applied = self.tracker.complete(ticket, result);
        if applied {
            self.broadcast(create_analysis_update(&self.tracker.view()));
        }
        applied
    }

    pub fn analysis_view(&self) -> AnalysisView {
        self.tracker.view()
    }

    /// Receive every update broadcast from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<WebSocketUpdate> {
        self.updates.subscribe()
    }

    /// Token cancelled when the session shuts down
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Stop every task bound to this session.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    fn broadcast(&self, update: WebSocketUpdate) {
        // No subscribers is normal; updates are not queued.
        let _ = self.updates.send(update);
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(&SimulatorConfig::default())
    }
}
