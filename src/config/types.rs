//! Core configuration types and loading.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use itc_core::{DecodeError, ParseError, Stamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::{default_log_filter, default_true};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A scenario: replicas to start with and the steps to run against them.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
    /// Report configuration.
    #[serde(default)]
    pub output: OutputConfig,
    /// Replicas that exist before the first step.
    #[serde(default, rename = "replica")]
    pub replicas: Vec<ReplicaConfig>,
    /// Steps, executed in order.
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Config {
    /// Load a scenario from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Include the wire encoding of each final stamp.
    #[serde(default = "default_true")]
    pub encoding: bool,
    /// Include the causal relation between every pair of final stamps.
    #[serde(default = "default_true")]
    pub relations: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            encoding: true,
            relations: true,
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A replica present at the start of the scenario.
///
/// Without `stamp` or `bytes` the replica starts as the seed stamp.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplicaConfig {
    /// Replica name, used by steps to refer to it.
    pub name: String,
    /// Initial stamp in printed notation, e.g. `((1, 0), 0)`.
    pub stamp: Option<String>,
    /// Initial stamp as hex-encoded wire bytes, e.g. `8c 00 00 00`.
    pub bytes: Option<String>,
}

/// Why an initial stamp could not be built.
#[derive(Debug, Error)]
pub enum InitialStampError {
    #[error("both stamp and bytes are set")]
    Ambiguous,
    #[error("invalid stamp notation: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid stamp encoding: {0}")]
    Decode(#[from] DecodeError),
}

impl ReplicaConfig {
    /// Builds the stamp this replica starts with.
    pub fn initial_stamp(&self) -> Result<Stamp, InitialStampError> {
        match (&self.stamp, &self.bytes) {
            (Some(_), Some(_)) => Err(InitialStampError::Ambiguous),
            (Some(text), None) => Ok(text.parse()?),
            (None, Some(bytes)) => {
                let compact: String = bytes.split_whitespace().collect();
                Ok(Stamp::unmarshal(&hex::decode(compact)?)?)
            }
            (None, None) => Ok(Stamp::seed()),
        }
    }
}

/// One scenario step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase", deny_unknown_fields)]
pub enum Step {
    /// Fork `replica`, naming the new replica `into`.
    Fork { replica: String, into: String },
    /// Record an event on `replica`.
    Event { replica: String },
    /// Join `from` into `replica`; `from` no longer exists afterwards.
    Join { replica: String, from: String },
    /// Send a message from `from` to `to` through the wire encoding.
    Send { from: String, to: String },
    /// Synchronize two replicas.
    Sync { replica: String, with: String },
    /// Require `replica` to print as `stamp`.
    Expect { replica: String, stamp: String },
    /// Require the causal relation between two replicas.
    Check {
        left: String,
        right: String,
        relation: Relation,
    },
}

impl Step {
    /// The operation name, as written in the scenario.
    pub fn op(&self) -> &'static str {
        match self {
            Step::Fork { .. } => "fork",
            Step::Event { .. } => "event",
            Step::Join { .. } => "join",
            Step::Send { .. } => "send",
            Step::Sync { .. } => "sync",
            Step::Expect { .. } => "expect",
            Step::Check { .. } => "check",
        }
    }

    /// Replicas the step reads or modifies, in the order written.
    pub fn replicas(&self) -> Vec<&str> {
        match self {
            Step::Fork { replica, .. } | Step::Event { replica } | Step::Expect { replica, .. } => {
                vec![replica.as_str()]
            }
            Step::Join { replica, from } => vec![replica.as_str(), from.as_str()],
            Step::Send { from, to } => vec![from.as_str(), to.as_str()],
            Step::Sync { replica, with } => vec![replica.as_str(), with.as_str()],
            Step::Check { left, right, .. } => vec![left.as_str(), right.as_str()],
        }
    }
}

/// Causal relation of one stamp to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Before,
    After,
    Equal,
    Concurrent,
}

impl Relation {
    /// Relation of `left` to `right`.
    pub fn between(left: &Stamp, right: &Stamp) -> Self {
        match left.compare(right) {
            Some(Ordering::Less) => Relation::Before,
            Some(Ordering::Greater) => Relation::After,
            Some(Ordering::Equal) => Relation::Equal,
            None => Relation::Concurrent,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Before => "before",
            Relation::After => "after",
            Relation::Equal => "equal",
            Relation::Concurrent => "concurrent",
        })
    }
}
