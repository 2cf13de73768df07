//! # Constants
//!
//! Shared constants used throughout the CLI.

/// Description attached to every secret created by this tool
pub const DEFAULT_SECRET_DESCRIPTION: &str = "My application secret";

/// Values ending with this suffix are read from disk as JSON payloads
pub const JSON_FILE_SUFFIX: &str = ".json";

/// Service attempts per operation (no retries)
pub const MAX_ATTEMPTS: u32 = 1;

/// Exit status for local input failures (missing or unreadable payload file)
pub const EXIT_INPUT_ERROR: u8 = 1;

/// Default log level when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "WARN";

/// Default log format (`text` or `json`)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Deletes always bypass the service's recovery window
pub const FORCE_DELETE_WITHOUT_RECOVERY: bool = true;
