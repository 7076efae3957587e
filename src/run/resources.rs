//! Shared run state.
//!
//! Everything a worker needs, bundled so that spawning a worker is a single
//! clone. Only the candidate source, the counters, the statistics and the
//! match list are mutable, and each guards itself.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::candidates::CandidateSource;
use crate::config::RunConfig;
use crate::dns::TxtLookup;
use crate::error_handling::ProcessingStats;
use crate::matching::MatchResult;
use crate::progress::ProgressAggregator;

use super::RunEvent;

/// Per-worker view of the run. Cloned once per spawned worker.
#[derive(Clone)]
pub struct WorkerContext {
    /// Worker number, for logging
    pub id: usize,
    /// Read-only configuration
    pub config: Arc<RunConfig>,
    /// Candidate producer shared by the pool
    pub source: Arc<dyn CandidateSource>,
    /// DNS query capability
    pub lookup: Arc<dyn TxtLookup>,
    /// Drain signal; child of the controller's cancellation token
    pub stop: CancellationToken,
    /// Progress counters
    pub progress: Arc<ProgressAggregator>,
    /// Failure and non-match statistics
    pub stats: Arc<ProcessingStats>,
    /// Matches in the order they were found
    pub matches: Arc<Mutex<Vec<MatchResult>>>,
    /// Optional event sink
    pub events: Option<UnboundedSender<RunEvent>>,
}

impl WorkerContext {
    /// Appends a match. The lock is held only for the push.
    pub fn push_match(&self, result: MatchResult) {
        self.matches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(result);
    }

    /// Sends an event if anyone is listening. A dropped receiver is ignored.
    pub fn emit(&self, event: RunEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

/// Live count of workers that have been spawned and not yet exited.
///
/// Obtained from [`RunController::active_workers`](super::RunController::active_workers)
/// before the run starts; reads zero again once the run has drained.
#[derive(Debug, Clone, Default)]
pub struct ActiveWorkers(Arc<AtomicUsize>);

impl ActiveWorkers {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Counts one more worker until the returned guard is dropped.
    pub(super) fn enter(&self) -> ActiveWorkerGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        ActiveWorkerGuard(Arc::clone(&self.0))
    }
}

/// Keeps the active worker count accurate even if a worker panics.
pub struct ActiveWorkerGuard(Arc<AtomicUsize>);

impl Drop for ActiveWorkerGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
