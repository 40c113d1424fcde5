//! Scenario validation.
//!
//! Validates a scenario before it runs, so that a script referring to a
//! replica that does not exist at that point is reported up front together
//! with every other problem, rather than failing halfway through.

use std::collections::HashSet;

use itc_core::{ParseError, Stamp};
use thiserror::Error;

use super::types::{InitialStampError, Step};
use super::Config;

/// Validation errors for a scenario.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("at least one [[replica]] is required")]
    NoReplicas,
    #[error("replica #{0} has an empty name")]
    EmptyName(usize),
    #[error("replica '{0}' is defined more than once")]
    DuplicateReplica(String),
    #[error("replica '{replica}': {source}")]
    InvalidInitialStamp {
        replica: String,
        #[source]
        source: InitialStampError,
    },
    #[error("step {step} ({op}): no live replica named '{replica}'")]
    UnknownReplica {
        step: usize,
        op: &'static str,
        replica: String,
    },
    #[error("step {step} (fork): replica '{name}' already exists")]
    ForkTargetExists { step: usize, name: String },
    #[error("step {step} ({op}): replica '{replica}' cannot be paired with itself")]
    SelfReference {
        step: usize,
        op: &'static str,
        replica: String,
    },
    #[error("step {step} (expect): invalid stamp '{stamp}': {source}")]
    InvalidExpectedStamp {
        step: usize,
        stamp: String,
        #[source]
        source: ParseError,
    },
}

/// Validate a scenario, returning all errors found.
///
/// Steps are numbered from 1. Replica liveness is tracked in order: a fork
/// creates its target and a join retires its source.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.replicas.is_empty() {
        errors.push(ValidationError::NoReplicas);
    }

    let mut live: HashSet<&str> = HashSet::new();
    for (index, replica) in config.replicas.iter().enumerate() {
        if replica.name.is_empty() {
            errors.push(ValidationError::EmptyName(index + 1));
            continue;
        }
        if !live.insert(replica.name.as_str()) {
            errors.push(ValidationError::DuplicateReplica(replica.name.clone()));
        }
        if let Err(source) = replica.initial_stamp() {
            errors.push(ValidationError::InvalidInitialStamp {
                replica: replica.name.clone(),
                source,
            });
        }
    }

    for (index, step) in config.steps.iter().enumerate() {
        let number = index + 1;
        let names = step.replicas();

        for name in &names {
            if !live.contains(name) {
                errors.push(ValidationError::UnknownReplica {
                    step: number,
                    op: step.op(),
                    replica: name.to_string(),
                });
            }
        }
        if let [first, second] = names[..]
            && first == second
        {
            errors.push(ValidationError::SelfReference {
                step: number,
                op: step.op(),
                replica: first.to_string(),
            });
        }

        match step {
            Step::Fork { into, .. } => {
                if !live.insert(into.as_str()) {
                    errors.push(ValidationError::ForkTargetExists {
                        step: number,
                        name: into.clone(),
                    });
                }
            }
            Step::Join { from, replica } if from != replica => {
                live.remove(from.as_str());
            }
            Step::Expect { stamp, .. } => {
                if let Err(source) = stamp.parse::<Stamp>() {
                    errors.push(ValidationError::InvalidExpectedStamp {
                        step: number,
                        stamp: stamp.clone(),
                        source,
                    });
                }
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
