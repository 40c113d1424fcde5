//! itcsim - interval tree clock scenario runner.
//!
//! Reads a TOML scenario describing replicas and the fork, event, join and
//! messaging steps between them, runs it against real stamps, checks the
//! expectations it states and prints the final clocks.

mod config;
mod error;
mod report;
mod scenario;
mod telemetry;

use anyhow::Context;
use tracing::{error, info};

use crate::config::Config;
use crate::report::Report;
use crate::scenario::Scenario;

fn main() -> anyhow::Result<()> {
    // Load scenario
    let scenario_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scenario.toml".to_string());

    let config = Config::load(&scenario_path)
        .with_context(|| format!("failed to load scenario {scenario_path}"))?;

    // Initialize tracing
    telemetry::init(&config.log).context("invalid [log] filter")?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(path = %scenario_path, error = %e, "Invalid scenario");
        }
        anyhow::bail!(
            "scenario {scenario_path} has {} validation error(s): {}",
            errors.len(),
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        );
    }

    let span = telemetry::spans::scenario(&scenario_path, config.replicas.len(), config.steps.len());
    let _enter = span.enter();
    info!("Running scenario");

    let mut scenario = Scenario::from_config(&config)?;
    scenario.run(&config.steps).map_err(|e| {
        error!(code = e.error_code(), error = %e, "Scenario failed");
        e
    })?;

    let report = Report::build(&scenario, &config.output);
    println!("{}", report.render(config.output.format)?.trim_end());
    Ok(())
}
