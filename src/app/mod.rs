//! Main application modules.
//!
//! This module provides progress logging, shutdown handling, statistics
//! printing and result output (the results file and JSON lines) used by the
//! run controller and the binary.

pub mod logging;
pub mod output;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::{log_progress, render_progress_line};
pub use output::{append_results, json_line, MatchLine};
pub use shutdown::shutdown_gracefully;
pub use statistics::print_error_statistics;
