//! Integration test common infrastructure.
//!
//! Provides utilities for writing scenario files and running the `itcsim`
//! binary against them.

pub mod runner;

#[allow(unused_imports)]
pub use runner::{RunOutput, run_scenario, run_scenario_file};
