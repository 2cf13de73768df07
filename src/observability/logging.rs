//! # Logging
//!
//! Tracing subscriber setup for the CLI.
//!
//! Log events are written to stderr so that stdout only carries the
//! operation report. `RUST_LOG` takes precedence; otherwise the level from
//! [`CliConfig`] applies to this crate.

use crate::config::{CliConfig, LogFormat};
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Build the env filter for the given configuration
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter()))
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(config: &CliConfig) -> Result<()> {
    let filter = env_filter(config);

    let result = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(config.log_enable_color)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| anyhow!("Failed to initialize tracing subscriber: {e}"))
}
