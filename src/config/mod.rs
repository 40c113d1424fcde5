//! Scenario configuration loading and validation.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions (Config, LogConfig, OutputConfig, ReplicaConfig, Step)
//! - [`defaults`]: Default value functions for serde
//! - [`validation`]: Checks run before a scenario executes

mod defaults;
mod types;
mod validation;

pub use types::{
    Config, InitialStampError, LogConfig, OutputConfig, OutputFormat, Relation, Step,
};
pub use validation::validate;
