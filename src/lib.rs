//! txt_checker library: concurrent DNS TXT record scanning
//!
//! This library generates candidate domain names (from a word list or at
//! random), queries their TXT records against one chosen resolver with a pool
//! of concurrent workers, and reports every domain whose TXT data carries a
//! target value.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use txt_checker::{run_scan, RunConfig, ScanMode};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = RunConfig {
//!     resolver_address: "8.8.8.8".to_string(),
//!     target_txt_value: "include:_custspf.one.com".to_string(),
//!     mode: ScanMode::Auto { duration: Some(Duration::from_secs(10)) },
//!     worker_count: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!("Checked {} domains: {} matched",
//!          report.snapshot.processed_count, report.matches.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod app;
mod candidates;
pub mod config;
mod dns;
mod error_handling;
pub mod initialization;
pub mod mail;
mod matching;
mod progress;
mod run;
pub mod spf;

// Re-export public API
pub use candidates::{load_words, Candidate, CandidateSource, RandomSource, WordListSource};
pub use config::{LogFormat, LogLevel, MatchPolicy, Opt, RunConfig, ScanMode};
pub use dns::{query, HickoryTxtClient, QueryOutcome, ResolverFailure, TxtLookup};
pub use error_handling::{ConfigError, InitializationError, ProcessingStats, QueryErrorKind};
pub use matching::{evaluate, evaluate_with_policy, ClassifiedResult, ErrorReason, MatchResult};
pub use progress::{ProgressAggregator, ProgressSnapshot};
pub use run::{
    init_lookup, init_source, run_scan, ActiveWorkers, RunController, RunEvent, RunReport,
    RunState, TerminationReason,
};
