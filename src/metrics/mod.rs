//! # Metrics Collection Module
//!
//! Prometheus export for the simulator and the analysis path, rendered at
//! `GET /metrics`.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `higgs_traffic_events_total{status}` - Simulated events by HTTP status
//! - `higgs_analysis_requests_total{outcome}` - Analyses by `success` / `fallback`
//! - `higgs_analysis_superseded_total` - Results discarded for a newer request
//!
//! **Histograms:**
//! - `higgs_traffic_latency_seconds` - Simulated event latency
//! - `higgs_analysis_duration_seconds` - Remote analysis duration
//!
//! **Gauges:**
//! - `higgs_active_connections` - Current value of the connection walk
//! - `higgs_buffer_entries` - Events held by the log buffer
//! - `higgs_uptime_seconds` - Seconds since server start

pub mod handler;

pub use metrics_exporter_prometheus::PrometheusBuilder;

use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Instant;

/// Owns the Prometheus handle and the server start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Get uptime in seconds since server startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Refresh gauges that are derived rather than event-driven.
    pub fn update_gauges(&self) {
        metrics::gauge!("higgs_uptime_seconds").set(self.uptime_seconds() as f64);
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Initialize the Prometheus recorder with custom histogram buckets.
///
/// Traffic latency buckets cover the simulated 20-169 ms range; analysis
/// buckets cover a remote model call up to its 30 s timeout.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let latency_buckets = &[0.025, 0.05, 0.075, 0.1, 0.125, 0.15, 0.175, 0.2, 0.5];
    let analysis_buckets = &[0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("higgs_traffic_latency_seconds".to_string()),
            latency_buckets,
        )?
        .set_buckets_for_metric(
            Matcher::Full("higgs_analysis_duration_seconds".to_string()),
            analysis_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Install the global recorder, or build a detached handle when one is
/// already installed (tests create many servers per process).
pub fn setup_or_detached_handle() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}
