//! AI-assisted risk analysis of individual log entries.
//!
//! [`LogAnalyzer`] abstracts the remote text-generation service;
//! [`GeminiAnalyzer`] is the production implementation. Callers never talk to
//! an analyzer directly: [`AnalysisAdapter`] wraps it and turns every failure
//! (missing key, network, timeout, malformed output) into the fixed fallback
//! result, so an analysis always resolves.
//!
//! [`AnalysisTracker`] decides which of several overlapping requests the
//! dashboard displays.

pub mod error;
pub mod gemini;
pub mod prompt;
pub mod tracker;
pub mod types;

pub use error::AnalysisError;
pub use gemini::GeminiAnalyzer;
pub use tracker::{AnalysisTicket, AnalysisTracker};
pub use types::{AnalysisResult, AnalysisView, RiskLevel, FALLBACK_SUMMARY};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AnalysisConfig;
use crate::traffic::TrafficEvent;

/// A remote service able to judge one log entry.
///
/// Object-safe; used as `Arc<dyn LogAnalyzer>`. Dropping the returned future
/// aborts the in-flight request.
#[async_trait]
pub trait LogAnalyzer: Send + Sync + 'static {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Analyze one event.
    ///
    /// # Returns
    ///
    /// - `Ok(AnalysisResult)` when the service answered with a valid document
    /// - `Err(AnalysisError::Network | Timeout)` when it could not be reached
    /// - `Err(AnalysisError::Upstream)` on a non-2xx response
    /// - `Err(AnalysisError::InvalidResponse)` when the output does not match the schema
    async fn analyze(&self, event: &TrafficEvent) -> Result<AnalysisResult, AnalysisError>;
}

enum Backend {
    Remote(Arc<dyn LogAnalyzer>),
    Unavailable(AnalysisError),
}

/// Never-failing front for a [`LogAnalyzer`].
pub struct AnalysisAdapter {
    backend: Backend,
    timeout: Duration,
}

impl AnalysisAdapter {
    pub fn new(analyzer: Arc<dyn LogAnalyzer>) -> Self {
        Self {
            backend: Backend::Remote(analyzer),
            timeout: Duration::from_secs(30),
        }
    }

    /// Adapter that answers every request with the fallback result.
    pub fn unavailable(reason: AnalysisError) -> Self {
        Self {
            backend: Backend::Unavailable(reason),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build the adapter described by `config`.
    ///
    /// A disabled section or a missing credential yields an adapter that
    /// degrades to the fallback path instead of an error.
    pub fn from_config(config: &AnalysisConfig, client: reqwest::Client) -> Self {
        if !config.enabled {
            tracing::info!("Log analysis disabled");
            return Self::unavailable(AnalysisError::Disabled);
        }

        match GeminiAnalyzer::from_config(config, client) {
            Ok(analyzer) => {
                tracing::info!(model = %config.model, "Log analysis enabled");
                Self::new(Arc::new(analyzer)).with_timeout(config.timeout())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Log analysis unavailable, using fallback results");
                Self::unavailable(e)
            }
        }
    }

    /// Outer deadline applied around the analyzer call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a remote analyzer is configured
    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// Analyze `event`. Always resolves; failures become the fallback result.
    pub async fn analyze(&self, event: &TrafficEvent) -> AnalysisResult {
        let start = Instant::now();

        let outcome = match &self.backend {
            Backend::Remote(analyzer) => {
                match tokio::time::timeout(self.timeout, analyzer.analyze(event)).await {
                    Ok(result) => result,
                    Err(_) => Err(AnalysisError::Timeout(self.timeout.as_millis() as u64)),
                }
            }
            Backend::Unavailable(reason) => Err(reason.clone()),
        };

        metrics::histogram!("higgs_analysis_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        match outcome {
            Ok(result) => {
                metrics::counter!("higgs_analysis_requests_total", "outcome" => "success")
                    .increment(1);
                result
            }
            Err(e) => {
                metrics::counter!("higgs_analysis_requests_total", "outcome" => "fallback")
                    .increment(1);
                tracing::warn!(
                    event_id = %event.id,
                    error_kind = e.kind(),
                    error = %e,
                    "AI analysis failed, returning fallback result"
                );
                AnalysisResult::fallback()
            }
        }
    }
}
