//! Query outcomes.

use crate::error_handling::QueryErrorKind;

/// Why the resolver could not produce an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverFailure {
    /// Network or connection failure talking to the resolver
    Transport(String),
    /// Malformed or unusable response, or a name that cannot be queried
    Protocol(String),
}

impl ResolverFailure {
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            ResolverFailure::Transport(_) => QueryErrorKind::Transport,
            ResolverFailure::Protocol(_) => QueryErrorKind::Protocol,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ResolverFailure::Transport(msg) | ResolverFailure::Protocol(msg) => msg,
        }
    }
}

/// Result of a single TXT lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// One entry per TXT character-string, in answer order, not concatenated
    Success(Vec<String>),
    /// NXDOMAIN, NODATA, or an answer without TXT data
    NotFound,
    /// The lookup exceeded its timeout
    Timeout,
    /// Transport or protocol failure
    ResolverError(ResolverFailure),
    /// The run was cancelled before the lookup started
    Cancelled,
}

impl QueryOutcome {
    /// Builds an outcome from the strings of an answer; an empty answer is
    /// `NotFound`.
    pub fn from_records(records: Vec<String>) -> Self {
        if records.is_empty() {
            QueryOutcome::NotFound
        } else {
            QueryOutcome::Success(records)
        }
    }

    /// Failure kind, or `None` for outcomes that carry an answer.
    pub fn error_kind(&self) -> Option<QueryErrorKind> {
        match self {
            QueryOutcome::Success(_) | QueryOutcome::NotFound => None,
            QueryOutcome::Timeout => Some(QueryErrorKind::Timeout),
            QueryOutcome::ResolverError(failure) => Some(failure.kind()),
            QueryOutcome::Cancelled => Some(QueryErrorKind::Cancelled),
        }
    }
}
