//! Output formatting helpers for CLI commands

use crate::analysis::{AnalysisResult, RiskLevel};
use crate::traffic::{RunningStats, TrafficEvent};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format the running stats as a two-column table
pub fn format_stats_table(stats: &RunningStats) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);

    table.add_row(vec![
        Cell::new("Total Requests"),
        Cell::new(stats.total_requests),
    ]);
    table.add_row(vec![
        Cell::new("Avg Latency"),
        Cell::new(format!("{}ms", stats.avg_latency_ms)),
    ]);
    table.add_row(vec![
        Cell::new("Success Rate"),
        Cell::new(format!("{}%", stats.success_rate)),
    ]);
    table.add_row(vec![
        Cell::new("Failed Requests"),
        Cell::new(stats.failures()),
    ]);
    table.add_row(vec![
        Cell::new("Active Streams"),
        Cell::new(stats.active_connections),
    ]);

    table.to_string()
}

/// Format buffered events, newest first
pub fn format_logs_table(logs: &[TrafficEvent]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Time", "Method", "Status", "Latency", "Payload"]);

    for event in logs {
        table.add_row(vec![
            Cell::new(&event.id),
            Cell::new(&event.timestamp),
            Cell::new(event.method),
            Cell::new(status_label(event.status)),
            Cell::new(format!("{}ms", event.latency_ms)),
            Cell::new(event.payload.to_string()),
        ]);
    }

    table.to_string()
}

/// Format one analysis verdict for a terminal
pub fn format_analysis(event: &TrafficEvent, result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} ({} {}, {}ms)\n",
        "Log".bold(),
        event.id,
        event.method,
        status_label(event.status),
        event.latency_ms
    ));
    out.push_str(&format!(
        "{} {}\n",
        "Risk:".bold(),
        risk_label(result.risk_level)
    ));
    out.push_str(&format!("{} {}\n", "Summary:".bold(), result.summary));
    out.push_str(&format!("{}\n", "Recommendations:".bold()));
    for rec in &result.recommendations {
        out.push_str(&format!("  - {}\n", rec));
    }
    out
}

/// Format a simulation run as JSON
pub fn format_simulation_json(stats: &RunningStats, logs: &[TrafficEvent]) -> String {
    serde_json::to_string_pretty(&json!({
        "stats": stats,
        "logs": logs,
    }))
    .unwrap_or_else(|_| "{}".to_string())
}

/// Format an analysis as JSON
pub fn format_analysis_json(event: &TrafficEvent, result: &AnalysisResult) -> String {
    serde_json::to_string_pretty(&json!({
        "event": event,
        "analysis": result,
    }))
    .unwrap_or_else(|_| "{}".to_string())
}

fn status_label(status: u16) -> String {
    if status == 200 {
        status.to_string().green().to_string()
    } else {
        status.to_string().red().to_string()
    }
}

/// Colored risk level label
pub fn risk_label(level: RiskLevel) -> String {
    match level {
        RiskLevel::Low => "Low".green().to_string(),
        RiskLevel::Medium => "Medium".yellow().to_string(),
        RiskLevel::High => "High".red().to_string(),
    }
}
