//! Prompt construction for log analysis.

use crate::traffic::TrafficEvent;

/// Build the natural-language prompt describing one log entry.
pub fn build_prompt(event: &TrafficEvent) -> String {
    format!(
        "Analyze the following backend log entry for a Higgs Domino Island message handler ({endpoint}).\n\
         Identify potential anomalies, security risks, or optimization opportunities.\n\
         \n\
         Log Data:\n\
         Timestamp: {timestamp}\n\
         Endpoint: {endpoint}\n\
         Payload: {payload}\n\
         Response: {response}\n\
         Latency: {latency}ms\n",
        endpoint = event.endpoint,
        timestamp = event.timestamp,
        payload = event.payload,
        response = event.response,
        latency = event.latency_ms,
    )
}
