//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, limits, timeouts)
//! - The library run configuration and its validation
//! - CLI option parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::Opt;
pub use constants::*;
pub use types::{normalize_tlds, LogFormat, LogLevel, MatchPolicy, RunConfig, ScanMode};
