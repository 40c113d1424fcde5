//! Scenario runner harness.
//!
//! Spawns the `itcsim` binary on scenario files and captures what it prints.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// What one `itcsim` invocation produced.
pub struct RunOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Writes `scenario` to a temporary file and runs `itcsim` on it.
pub fn run_scenario(scenario: &str) -> anyhow::Result<RunOutput> {
    let dir = TempDir::new()?;
    let path = dir.path().join("scenario.toml");
    std::fs::write(&path, scenario)?;
    run_scenario_file(&path)
}

/// Runs `itcsim` on an existing scenario file.
pub fn run_scenario_file(path: &Path) -> anyhow::Result<RunOutput> {
    let output = Command::new(env!("CARGO_BIN_EXE_itcsim"))
        .arg(path)
        // Keep the configured filter in charge of what reaches stderr.
        .env_remove("RUST_LOG")
        .output()?;

    Ok(RunOutput {
        success: output.status.success(),
        stdout: String::from_utf8(output.stdout)?,
        stderr: String::from_utf8(output.stderr)?,
    })
}
