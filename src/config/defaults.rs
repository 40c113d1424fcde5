//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    "info".to_string()
}
