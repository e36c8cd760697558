//! CLI module for Higgs
//!
//! # Commands
//!
//! - `serve` - Start the dashboard server with the traffic simulator
//! - `simulate` - Run the simulator headlessly and print the outcome
//! - `analyze` - Analyze one log entry and print the verdict
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start the dashboard on the default port
//! higgs serve
//!
//! # Reproducible 20-tick run as JSON
//! higgs simulate --ticks 20 --seed 42 --json
//!
//! # Generate shell completions
//! higgs completions bash > ~/.bash_completion.d/higgs
//! ```

pub mod analyze;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;
pub mod simulate;

pub use analyze::handle_analyze;
pub use completions::handle_completions;
pub use config::handle_config_init;
pub use simulate::handle_simulate;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Higgs - admin monitor for simulated endpoint traffic
#[derive(Parser, Debug)]
#[command(
    name = "higgs",
    version,
    about = "Admin dashboard for simulated endpoint traffic with AI log analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the dashboard server
    Serve(ServeArgs),
    /// Run the traffic simulator without a server
    Simulate(SimulateArgs),
    /// Analyze a single log entry
    Analyze(AnalyzeArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "higgs.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "HIGGS_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "HIGGS_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HIGGS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override the simulator tick interval in milliseconds
    #[arg(long, env = "HIGGS_SIMULATOR_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Serve the dashboard without generating traffic
    #[arg(long)]
    pub no_simulator: bool,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of events to generate
    #[arg(short = 'n', long, default_value = "10")]
    pub ticks: u64,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "higgs.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON file holding one log entry; a fresh event is generated if omitted
    #[arg(short, long)]
    pub event: Option<PathBuf>,

    /// Seed for the generated event
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "higgs.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "higgs.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load a config file if present, otherwise defaults, then apply env overrides.
pub fn load_config(
    path: &std::path::Path,
) -> Result<crate::config::HiggsConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        crate::config::HiggsConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        crate::config::HiggsConfig::default()
    };
    Ok(config.with_env_overrides())
}
