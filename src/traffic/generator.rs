//! Synthetic traffic generation.

use super::types::{ConnectionStep, HttpMethod, Tick, TrafficEvent};
use crate::config::SimulatorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;
const USER_ID_SPACE: u64 = 100_000;
const MSG_TYPE_SPACE: u64 = 5;

/// Produces one [`Tick`] per call with randomized event fields.
///
/// Generic over the RNG so tests can drive it from a seeded source.
pub struct TrafficGenerator<R = StdRng> {
    rng: R,
    endpoint: String,
    success_probability: f64,
    latency_min_ms: u64,
    latency_max_ms: u64,
}

impl TrafficGenerator<StdRng> {
    /// Generator seeded from OS entropy.
    pub fn from_config(config: &SimulatorConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible runs.
    pub fn seeded(config: &SimulatorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TrafficGenerator<R> {
    pub fn with_rng(config: &SimulatorConfig, rng: R) -> Self {
        let (latency_min_ms, latency_max_ms) = if config.latency_min_ms <= config.latency_max_ms {
            (config.latency_min_ms, config.latency_max_ms)
        } else {
            (config.latency_max_ms, config.latency_min_ms)
        };

        Self {
            rng,
            endpoint: config.endpoint.clone(),
            success_probability: config.success_probability.clamp(0.0, 1.0),
            latency_min_ms,
            latency_max_ms,
        }
    }

    /// Synthesize the next event together with the connection walk step.
    pub fn next_tick(&mut self) -> Tick {
        let event = self.next_event();
        let connection_step = if self.rng.gen_bool(0.5) {
            ConnectionStep::Up
        } else {
            ConnectionStep::Down
        };
        Tick {
            event,
            connection_step,
        }
    }

    /// Synthesize a single event.
    pub fn next_event(&mut self) -> TrafficEvent {
        let status = if self.rng.gen_bool(self.success_probability) {
            200
        } else {
            500
        };
        let latency_ms = self
            .rng
            .gen_range(self.latency_min_ms..=self.latency_max_ms);
        let user_id = self.rng.gen_range(0..USER_ID_SPACE);
        let msg_type = self.rng.gen_range(0..MSG_TYPE_SPACE);

        TrafficEvent {
            id: self.next_id(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            method: HttpMethod::Post,
            endpoint: self.endpoint.clone(),
            status,
            payload: json!({ "userId": user_id, "msgType": msg_type }),
            response: json!({
                "success": true,
                "timestamp": chrono::Utc::now().timestamp_millis(),
            }),
            latency_ms,
        }
    }

    fn next_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ID_ALPHABET[self.rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}
