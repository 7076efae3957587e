//! Error type definitions.
//!
//! This module defines the fatal error types (configuration, initialization)
//! and the classification of per-query failures.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Configuration errors, raised before any worker is started.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No resolver address was given.
    #[error("A resolver address is required")]
    MissingResolver,

    /// No target TXT value was given.
    #[error("A target TXT value is required")]
    MissingTarget,

    /// The worker pool would be empty.
    #[error("Worker count must be at least 1")]
    ZeroWorkers,

    /// Queries would time out immediately.
    #[error("Query timeout must be greater than zero")]
    ZeroTimeout,

    /// The progress reporter would never sleep.
    #[error("Progress interval must be greater than zero")]
    ZeroProgressInterval,

    /// No usable TLD remained after normalization.
    #[error("The TLD list is empty")]
    EmptyTldList,

    /// Auto mode was given a zero time budget.
    #[error("Auto mode duration must be greater than zero")]
    ZeroDuration,

    /// List mode was given no words.
    #[error("The word list contains no words")]
    EmptyWordList,

    /// The resolver address could not be turned into a socket address.
    #[error("Invalid resolver address '{address}': {reason}")]
    InvalidResolverAddress {
        /// Address as given
        address: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Kinds of per-query failure.
///
/// These never leave the worker that observed them; they are counted and
/// reported as `Errored` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum QueryErrorKind {
    /// The query did not complete within its timeout
    Timeout,
    /// Network or connection failure talking to the resolver
    Transport,
    /// The resolver answered with something unusable (SERVFAIL, malformed
    /// message, invalid name)
    Protocol,
    /// The candidate was pulled but the run was cancelled before it was queried
    Cancelled,
}

impl std::fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl QueryErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryErrorKind::Timeout => "DNS query timeout",
            QueryErrorKind::Transport => "DNS transport error",
            QueryErrorKind::Protocol => "DNS protocol error",
            QueryErrorKind::Cancelled => "Query cancelled",
        }
    }
}
