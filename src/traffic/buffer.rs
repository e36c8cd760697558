//! Bounded, newest-first log buffer
//!
//! Holds the most recent traffic events for display. Pushing past capacity
//! evicts the oldest entry; there is no other removal path.

use std::collections::VecDeque;

use crate::traffic::types::TrafficEvent;

/// Default number of events retained by the dashboard.
pub const DEFAULT_BUFFER_CAPACITY: usize = 50;

/// Ring buffer of traffic events, newest at the front
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: VecDeque<TrafficEvent>,
    capacity: usize,
}

impl LogBuffer {
    /// Creates a buffer holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends an event, evicting the oldest if at capacity
    pub fn push(&mut self, event: TrafficEvent) {
        self.entries.push_front(event);
        self.entries.truncate(self.capacity);
    }

    /// Iterates newest first without cloning
    pub fn iter(&self) -> impl Iterator<Item = &TrafficEvent> {
        self.entries.iter()
    }

    /// Returns all entries newest first
    pub fn all(&self) -> Vec<TrafficEvent> {
        self.iter().cloned().collect()
    }

    /// Looks up an event still held by the buffer
    pub fn get(&self, id: &str) -> Option<&TrafficEvent> {
        self.iter().find(|e| e.id == id)
    }

    /// Newest `limit` non-200 events, newest first
    pub fn recent_failures(&self, limit: usize) -> Vec<TrafficEvent> {
        self.iter()
            .filter(|e| !e.is_success())
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}
