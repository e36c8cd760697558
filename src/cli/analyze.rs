//! Analyze command implementation

use crate::analysis::AnalysisAdapter;
use crate::cli::output;
use crate::cli::AnalyzeArgs;
use crate::config::HiggsConfig;
use crate::traffic::{TrafficEvent, TrafficGenerator};
use std::path::Path;

/// Read one log entry from a JSON file
pub fn load_event(path: &Path) -> Result<TrafficEvent, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read event file {}: {}", path.display(), e))?;
    let event = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid event file {}: {}", path.display(), e))?;
    Ok(event)
}

/// Handle `higgs analyze`
///
/// Analysis failures do not fail the command; they yield the fallback result.
pub async fn handle_analyze(
    args: &AnalyzeArgs,
    config: &HiggsConfig,
    adapter: &AnalysisAdapter,
) -> Result<String, Box<dyn std::error::Error>> {
    let event = match &args.event {
        Some(path) => load_event(path)?,
        None => {
            let mut generator = match args.seed {
                Some(seed) => TrafficGenerator::seeded(&config.simulator, seed),
                None => TrafficGenerator::from_config(&config.simulator),
            };
            generator.next_event()
        }
    };

    let result = adapter.analyze(&event).await;

    if args.json {
        Ok(output::format_analysis_json(&event, &result))
    } else {
        Ok(output::format_analysis(&event, &result))
    }
}
