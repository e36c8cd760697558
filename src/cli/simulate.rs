//! Simulate command implementation
//!
//! Runs the generator through a session without timers or a server, so a
//! seeded run is fully reproducible.

use crate::cli::output;
use crate::cli::SimulateArgs;
use crate::config::HiggsConfig;
use crate::session::DashboardSession;
use crate::traffic::TrafficGenerator;

/// Handle `higgs simulate`
pub fn handle_simulate(
    args: &SimulateArgs,
    config: &HiggsConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    config.validate()?;

    let session = DashboardSession::new(&config.simulator);
    let mut generator = match args.seed {
        Some(seed) => TrafficGenerator::seeded(&config.simulator, seed),
        None => TrafficGenerator::from_config(&config.simulator),
    };

    for _ in 0..args.ticks {
        session.record(generator.next_tick());
    }

    let snapshot = session.snapshot();
    if args.json {
        return Ok(output::format_simulation_json(
            &snapshot.stats,
            &snapshot.logs,
        ));
    }

    Ok(format!(
        "{}\n{}",
        output::format_stats_table(&snapshot.stats),
        output::format_logs_table(&snapshot.logs)
    ))
}
