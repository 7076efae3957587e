//! Configuration types.
//!
//! This module defines the library-level run configuration and the enums it
//! is built from. None of it depends on the CLI; see [`super::cli`] for the
//! `clap` front end.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_QUERY_TIMEOUT_MS, DEFAULT_TLDS, DEFAULT_WORKER_COUNT, PROGRESS_INTERVAL,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How a TXT string is compared against the target value.
///
/// Both policies are case-sensitive: DNS preserves the case of TXT data, and
/// values such as SPF includes are matched byte for byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchPolicy {
    /// The target appears anywhere inside the TXT string
    #[default]
    Contains,
    /// The TXT string, with surrounding whitespace trimmed, equals the target
    Exact,
}

/// Where candidates come from and what ends the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMode {
    /// Random labels combined with the TLD set.
    ///
    /// The run stops when `duration` has elapsed, or only on cancellation when
    /// `duration` is `None`.
    Auto {
        /// Time budget for the run
        duration: Option<Duration>,
    },
    /// Every word joined with every TLD, exactly once. The run stops when the
    /// list is exhausted.
    WordList {
        /// Words in the order they are expanded
        words: Vec<String>,
    },
}

/// Run configuration.
///
/// Constructed once before the worker pool starts and shared read-only by all
/// workers afterwards.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use txt_checker::{RunConfig, ScanMode};
///
/// let config = RunConfig {
///     resolver_address: "8.8.8.8".to_string(),
///     target_txt_value: "v=spf1 include:_custspf.one.com ~all".to_string(),
///     mode: ScanMode::Auto { duration: Some(Duration::from_secs(10)) },
///     worker_count: 50,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// DNS server to query: `IP`, `IP:port`, `[v6]:port` or a hostname
    pub resolver_address: String,

    /// TXT value to look for
    pub target_txt_value: String,

    /// TLDs appended to every label
    pub tlds: Vec<String>,

    /// Number of concurrent workers
    pub worker_count: usize,

    /// Candidate generation mode
    pub mode: ScanMode,

    /// Upper bound for a single TXT query
    pub query_timeout: Duration,

    /// Comparison used by the match evaluator
    pub match_policy: MatchPolicy,

    /// Add digits to the random label alphabet (auto mode only)
    pub include_digits: bool,

    /// Fixed RNG seed for reproducible auto-mode candidates
    pub seed: Option<u64>,

    /// How often a fresh progress snapshot is published
    pub progress_interval: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            resolver_address: String::new(),
            target_txt_value: String::new(),
            tlds: DEFAULT_TLDS.iter().map(|t| t.to_string()).collect(),
            worker_count: DEFAULT_WORKER_COUNT,
            mode: ScanMode::Auto { duration: None },
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            match_policy: MatchPolicy::Contains,
            include_digits: false,
            seed: None,
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

impl RunConfig {
    /// Checks the configuration and normalizes the TLD list in place.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found. Nothing has been started at
    /// this point, so the error is meant to be fatal.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.resolver_address.trim().is_empty() {
            return Err(ConfigError::MissingResolver);
        }
        if self.target_txt_value.is_empty() {
            return Err(ConfigError::MissingTarget);
        }
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.query_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.progress_interval.is_zero() {
            return Err(ConfigError::ZeroProgressInterval);
        }

        self.tlds = normalize_tlds(&self.tlds);
        if self.tlds.is_empty() {
            return Err(ConfigError::EmptyTldList);
        }

        match &self.mode {
            ScanMode::Auto {
                duration: Some(duration),
            } if duration.is_zero() => Err(ConfigError::ZeroDuration),
            ScanMode::WordList { words } if words.is_empty() => Err(ConfigError::EmptyWordList),
            _ => Ok(()),
        }
    }
}

/// Normalizes a TLD list.
///
/// Entries are trimmed and given a leading dot, blanks are dropped, and
/// duplicates are removed keeping the first occurrence.
pub fn normalize_tlds<S: AsRef<str>>(tlds: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tlds.len());
    for tld in tlds {
        let trimmed = tld.as_ref().trim();
        if trimmed.is_empty() || trimmed == "." {
            continue;
        }
        let tld = if trimmed.starts_with('.') {
            trimmed.to_string()
        } else {
            format!(".{trimmed}")
        };
        if !normalized.contains(&tld) {
            normalized.push(tld);
        }
    }
    normalized
}
