//! Errors raised while a scenario runs.
//!
//! Problems visible in the scenario file itself are caught earlier by
//! [`crate::config::validate`]; these are the failures that only show up
//! when the stamps are actually computed.

use itc_core::DecodeError;
use thiserror::Error;

use crate::config::{InitialStampError, Relation};

/// Errors that stop a running scenario.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("replica '{replica}': {source}")]
    InitialStamp {
        replica: String,
        #[source]
        source: InitialStampError,
    },

    #[error("step {step}: no live replica named '{replica}'")]
    UnknownReplica { step: usize, replica: String },

    #[error("step {step}: expected {replica} = {expected}, got {actual}")]
    ExpectationFailed {
        step: usize,
        replica: String,
        expected: String,
        actual: String,
    },

    #[error("step {step}: expected {left} {expected} {right}, found {left} {actual} {right}")]
    RelationMismatch {
        step: usize,
        left: String,
        right: String,
        expected: Relation,
        actual: Relation,
    },

    #[error("step {step}: message from '{from}' failed to decode: {source}")]
    Decode {
        step: usize,
        from: String,
        #[source]
        source: DecodeError,
    },
}

impl SimError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InitialStamp { .. } => "initial_stamp",
            Self::UnknownReplica { .. } => "unknown_replica",
            Self::ExpectationFailed { .. } => "expectation_failed",
            Self::RelationMismatch { .. } => "relation_mismatch",
            Self::Decode { .. } => "decode",
        }
    }
}
