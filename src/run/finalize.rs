//! Run finalization.
//!
//! Runs once every worker has exited: stops the reporter, takes the final
//! snapshot, logs statistics and builds the [`RunReport`].

use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, print_error_statistics, shutdown_gracefully};
use crate::error_handling::ProcessingStats;
use crate::matching::MatchResult;
use crate::progress::ProgressAggregator;

use super::{RunReport, TerminationReason};

/// Everything the drained run hands over for finalization.
pub(super) struct RunOutcome {
    pub start: Instant,
    pub termination: TerminationReason,
    pub progress: Arc<ProgressAggregator>,
    pub stats: Arc<ProcessingStats>,
    pub matches: Arc<Mutex<Vec<MatchResult>>>,
    pub reporter_cancel: CancellationToken,
    pub reporter: JoinHandle<()>,
}

pub(super) async fn finalize_run(outcome: RunOutcome) -> RunReport {
    let RunOutcome {
        start,
        termination,
        progress,
        stats,
        matches,
        reporter_cancel,
        reporter,
    } = outcome;

    shutdown_gracefully(reporter_cancel, Some(reporter)).await;

    let snapshot = progress.snapshot();
    log_progress(&snapshot);
    print_error_statistics(&stats);

    let matches = std::mem::take(
        &mut *matches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()),
    );
    let elapsed_seconds = start.elapsed().as_secs_f64();

    info!(
        "Run finished ({}): {} domain{} checked, {} matched in {:.1}s",
        termination,
        snapshot.processed_count,
        if snapshot.processed_count == 1 { "" } else { "s" },
        matches.len(),
        elapsed_seconds
    );

    RunReport {
        snapshot,
        matches,
        stats,
        termination,
        elapsed_seconds,
    }
}
