//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::LogConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Logs go to
/// stderr so that stdout carries only the report.
pub fn init(log: &LogConfig) -> Result<(), ParseError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&log.filter)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

/// Standardized span constructors for scenario runs.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for a whole scenario file.
    pub fn scenario(path: &str, replicas: usize, steps: usize) -> Span {
        info_span!("scenario", path = %path, replicas, steps)
    }

    /// Create a span for a single step.
    pub fn step(number: usize, op: &str) -> Span {
        info_span!("step", number, op = %op)
    }
}
