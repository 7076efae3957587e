//! Error handling and processing statistics.
//!
//! This module provides:
//! - Fatal error types (configuration and initialization)
//! - Classification of per-query failures
//! - Processing statistics tracking
//!
//! Configuration errors stop the program before the pool exists. Query
//! failures are contained in the worker that saw them and only show up in
//! [`ProcessingStats`] and the event stream.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ConfigError, InitializationError, QueryErrorKind};
