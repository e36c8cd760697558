//! Configuration module for Higgs
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`HIGGS_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use higgs::config::HiggsConfig;
//!
//! let config = HiggsConfig::default();
//! assert_eq!(config.server.port, 8000);
//! assert_eq!(config.simulator.interval_ms, 3000);
//!
//! let toml = r#"
//! [simulator]
//! interval_ms = 1000
//! "#;
//! let config: HiggsConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.simulator.interval_ms, 1000);
//! ```

pub mod analysis;
pub mod error;
pub mod logging;
pub mod server;
pub mod simulator;
pub mod target;

pub use analysis::AnalysisConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use simulator::SimulatorConfig;
pub use target::{Protocol, TargetConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard server and CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HiggsConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Synthetic traffic generation
    pub simulator: SimulatorConfig,
    /// Remote log analysis
    pub analysis: AnalysisConfig,
    /// Monitored target shown on the settings view
    pub target: TargetConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl HiggsConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable values are ignored and the current value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("HIGGS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("HIGGS_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("HIGGS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HIGGS_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(interval) = std::env::var("HIGGS_SIMULATOR_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.simulator.interval_ms = ms;
            }
        }
        if let Ok(model) = std::env::var("HIGGS_ANALYSIS_MODEL") {
            if !model.is_empty() {
                self.analysis.model = model;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "port must be non-zero"));
        }

        let sim = &self.simulator;
        if sim.interval_ms == 0 {
            return Err(ConfigError::invalid(
                "simulator.interval_ms",
                "interval must be non-zero",
            ));
        }
        if sim.latency_min_ms > sim.latency_max_ms {
            return Err(ConfigError::invalid(
                "simulator.latency_min_ms",
                format!(
                    "minimum latency {} exceeds maximum {}",
                    sim.latency_min_ms, sim.latency_max_ms
                ),
            ));
        }
        if !(0.0..=1.0).contains(&sim.success_probability) {
            return Err(ConfigError::invalid(
                "simulator.success_probability",
                "probability must be within [0, 1]",
            ));
        }
        if sim.buffer_capacity == 0 {
            return Err(ConfigError::invalid(
                "simulator.buffer_capacity",
                "buffer must hold at least one event",
            ));
        }
        if !sim.endpoint.starts_with('/') {
            return Err(ConfigError::invalid(
                "simulator.endpoint",
                "endpoint path must start with '/'",
            ));
        }

        if self.analysis.enabled && self.analysis.base_url.is_empty() {
            return Err(ConfigError::invalid(
                "analysis.base_url",
                "URL cannot be empty",
            ));
        }

        Ok(())
    }
}
