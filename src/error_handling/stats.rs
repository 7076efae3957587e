//! Processing statistics tracking.
//!
//! Thread-safe counters for query failures and non-matching outcomes,
//! updated concurrently by all workers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::QueryErrorKind;

/// Thread-safe processing statistics tracker.
///
/// Every [`QueryErrorKind`] is initialized to zero on creation, so lookups
/// never miss. Share it across tasks with `Arc`.
#[derive(Debug)]
pub struct ProcessingStats {
    errors: HashMap<QueryErrorKind, AtomicUsize>,
    not_found: AtomicUsize,
    no_match: AtomicUsize,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in QueryErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }

        ProcessingStats {
            errors,
            not_found: AtomicUsize::new(0),
            no_match: AtomicUsize::new(0),
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, kind: QueryErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Counts a domain that had no TXT records at all.
    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a domain whose TXT records did not contain the target.
    pub fn increment_no_match(&self) {
        self.no_match.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for an error kind.
    pub fn get_error_count(&self, kind: QueryErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn not_found_count(&self) -> usize {
        self.not_found.load(Ordering::SeqCst)
    }

    pub fn no_match_count(&self) -> usize {
        self.no_match.load(Ordering::SeqCst)
    }

    /// Get total error count across all error kinds.
    pub fn total_errors(&self) -> usize {
        QueryErrorKind::iter()
            .map(|k| self.get_error_count(k))
            .sum()
    }
}
