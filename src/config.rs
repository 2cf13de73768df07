//! # CLI Configuration
//!
//! Process-level settings loaded from environment variables.

use crate::constants::{DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, one line per event
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Parse a format name, falling back to [`LogFormat::Text`] for anything unknown
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// CLI configuration
///
/// All settings have defaults and can be overridden via environment variables.
/// `RUST_LOG` still takes precedence over `log_level` when it is set.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Default log level for this crate (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: LogFormat,
    /// Enable ANSI color in text format logs
    pub log_enable_color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::parse(DEFAULT_LOG_FORMAT),
            log_enable_color: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: LogFormat::parse(
                &lookup("LOG_FORMAT").unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string()),
            ),
            log_enable_color: lookup("LOG_ENABLE_COLOR").is_some_and(|v| parse_bool(&v)),
        }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> String {
        format!("aws_secret_manager={}", self.log_level.to_lowercase())
    }
}

fn parse_bool(value: &str) -> bool {
    let v_lower = value.to_lowercase();
    v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
}
