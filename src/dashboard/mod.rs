//! Web dashboard for the simulated traffic
//!
//! Serves an embedded single-page dashboard at `/` with three views:
//! - Overview: the four running stats, a latency chart and recent exceptions
//! - Traffic logs: the buffered events with an Analyze action and the
//!   analysis panel
//! - Settings: the monitored target, read-only
//!
//! Initial state is injected into the page; live changes arrive over `/ws`.

pub mod handler;
pub mod types;
pub mod websocket;

pub use handler::{assets_handler, dashboard_handler};
pub use websocket::websocket_handler;
