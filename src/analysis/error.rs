//! Error types for remote analysis.

use thiserror::Error;

/// Errors that can occur while obtaining an analysis.
///
/// None of these reach callers of [`super::AnalysisAdapter`]; they are logged
/// and replaced by the fallback result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Analysis switched off in configuration.
    #[error("Analysis is disabled")]
    Disabled,

    /// No API key in the configured environment variable.
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Service returned an error response (4xx, 5xx).
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body or model output doesn't match the expected schema.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Disabled => "disabled",
            AnalysisError::MissingCredential(_) => "missing_credential",
            AnalysisError::Network(_) => "network",
            AnalysisError::Timeout(_) => "timeout",
            AnalysisError::Upstream { .. } => "upstream",
            AnalysisError::InvalidResponse(_) => "invalid_response",
        }
    }
}
