//! Synthetic traffic: event types, the generator, the bounded log buffer and
//! the rolling statistics aggregator.

pub mod buffer;
pub mod generator;
pub mod stats;
pub mod types;

pub use buffer::{LogBuffer, DEFAULT_BUFFER_CAPACITY};
pub use generator::TrafficGenerator;
pub use stats::{RunningStats, INITIAL_CONNECTIONS};
pub use types::{ConnectionStep, HttpMethod, Tick, TrafficEvent};
