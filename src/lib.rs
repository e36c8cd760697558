//! Higgs - admin monitor for simulated endpoint traffic
//!
//! Synthesizes traffic against a single message-handler endpoint, keeps a
//! bounded newest-first log and incrementally updated statistics, and asks a
//! hosted language model for a risk summary of any buffered entry. Everything
//! is served as an embedded web dashboard with live WebSocket updates.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod metrics;
pub mod session;
pub mod traffic;
