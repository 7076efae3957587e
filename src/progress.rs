//! Live progress accounting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::Serialize;

/// Point-in-time copy of the run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub processed_count: u64,
    pub elapsed_seconds: f64,
    pub match_count: u64,
}

impl ProgressSnapshot {
    /// Domains per second since the run started.
    pub fn rate(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.processed_count as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// Counters shared by all workers.
///
/// Updates are single atomic increments, so workers never wait on the
/// reporter. A match is always recorded after the processed increment for
/// the same candidate, and [`snapshot`](Self::snapshot) reads in the opposite
/// order, which keeps `match_count <= processed_count` in every snapshot.
#[derive(Debug)]
pub struct ProgressAggregator {
    start: Instant,
    processed: AtomicU64,
    matches: AtomicU64,
}

impl Default for ProgressAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressAggregator {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            processed: AtomicU64::new(0),
            matches: AtomicU64::new(0),
        }
    }

    pub fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_match(&self) {
        self.matches.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let match_count = self.matches.load(Ordering::SeqCst);
        let processed_count = self.processed.load(Ordering::SeqCst);
        ProgressSnapshot {
            processed_count,
            elapsed_seconds: self.start.elapsed().as_secs_f64(),
            match_count,
        }
    }
}
