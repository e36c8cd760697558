//! # HTTP API
//!
//! The dashboard page, its JSON API, the WebSocket update stream and the
//! operational endpoints, all served from one axum router.
//!
//! ## Endpoints
//!
//! - `GET /` - Dashboard page with injected initial data
//! - `GET /assets/*path` - Embedded static assets
//! - `GET /ws` - WebSocket stream of traffic ticks and analysis updates
//! - `GET /api/overview` - Stats, buffered logs and recent exceptions
//! - `GET /api/logs` - Buffered logs, newest first
//! - `GET /api/logs/:id` - One buffered log entry
//! - `GET /api/stats` - Running statistics
//! - `POST /api/logs/:id/analyze` - Request an AI analysis (202)
//! - `GET /api/analysis` - Current analysis panel state
//! - `GET /api/settings` - Target settings
//! - `GET|POST /data/handleMsg.do` - Mock of the monitored endpoint
//! - `GET /health` - Server health
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use higgs::api::{create_router, AppState};
//! use higgs::config::HiggsConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = Arc::new(AppState::new(Arc::new(HiggsConfig::default())));
//! state.start_simulator();
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! API errors share one envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Log entry 'k3j9x0a1b' not found",
//!     "type": "not_found_error",
//!     "code": "not_found"
//!   }
//! }
//! ```

mod analysis;
pub mod error;
mod health;
pub mod mock;
mod traffic;

pub use error::{ApiError, ApiErrorBody, ApiErrorEnvelope};
pub use health::HealthResponse;

use crate::analysis::AnalysisAdapter;
use crate::config::HiggsConfig;
use crate::metrics::MetricsCollector;
use crate::session::{DashboardSession, SimulatorHandle, TrafficSimulator};
use crate::traffic::TrafficGenerator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64 KB); no endpoint accepts a large body.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<HiggsConfig>,
    pub session: Arc<DashboardSession>,
    pub analyzer: Arc<AnalysisAdapter>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics_collector: Arc<MetricsCollector>,
    simulator: Mutex<Option<SimulatorHandle>>,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// The simulator is not started; see [`AppState::start_simulator`].
    pub fn new(config: Arc<HiggsConfig>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_seconds))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        let start_time = Instant::now();
        let prometheus_handle = crate::metrics::setup_or_detached_handle();
        let metrics_collector = Arc::new(MetricsCollector::new(start_time, prometheus_handle));

        let session = Arc::new(DashboardSession::new(&config.simulator));
        let analyzer = Arc::new(AnalysisAdapter::from_config(&config.analysis, http_client));

        Self {
            config,
            session,
            analyzer,
            start_time,
            metrics_collector,
            simulator: Mutex::new(None),
        }
    }

    /// Replace the analysis adapter.
    pub fn with_analyzer(mut self, analyzer: AnalysisAdapter) -> Self {
        self.analyzer = Arc::new(analyzer);
        self
    }

    fn simulator_slot(&self) -> MutexGuard<'_, Option<SimulatorHandle>> {
        self.simulator.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the traffic simulator if it is not already running.
    ///
    /// Returns `false` when a simulator was already running.
    pub fn start_simulator(&self) -> bool {
        let mut slot = self.simulator_slot();
        if slot.as_ref().is_some_and(SimulatorHandle::is_running) {
            return false;
        }

        let generator = TrafficGenerator::from_config(&self.config.simulator);
        let handle = TrafficSimulator::new(
            Arc::clone(&self.session),
            generator,
            self.config.simulator.interval(),
        )
        .start();
        *slot = Some(handle);
        true
    }

    pub fn simulator_running(&self) -> bool {
        self.simulator_slot()
            .as_ref()
            .is_some_and(SimulatorHandle::is_running)
    }

    /// Stop the simulator and wait for its task to finish.
    pub async fn stop_simulator(&self) {
        let handle = self.simulator_slot().take();
        if let Some(handle) = handle {
            handle.shutdown().await;
        }
    }
}

/// Create the main router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/", get(crate::dashboard::dashboard_handler))
        .route("/assets/*path", get(crate::dashboard::assets_handler))
        .route("/ws", get(crate::dashboard::websocket_handler))
        .route("/api/overview", get(traffic::overview))
        .route("/api/logs", get(traffic::list_logs))
        .route("/api/logs/:id", get(traffic::get_log))
        .route("/api/logs/:id/analyze", post(analysis::request_analysis))
        .route("/api/stats", get(traffic::stats))
        .route("/api/analysis", get(analysis::current_analysis))
        .route("/api/settings", get(traffic::settings))
        .route(
            "/data/handleMsg.do",
            get(mock::handle_msg).post(mock::handle_msg),
        )
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(timeout))
        .layer(crate::logging::http_trace_layer())
        .with_state(state)
}
