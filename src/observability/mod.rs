//! # Observability
//!
//! - `logging`: tracing subscriber setup (text or JSON, always on stderr)

pub mod logging;

pub use logging::init_tracing;
