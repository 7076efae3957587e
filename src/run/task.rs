//! Worker loop.
//!
//! Each worker repeatedly pulls a candidate, queries it, evaluates the answer
//! and records the result. The only await point per iteration is the query,
//! which is bounded by the configured timeout.

use log::{debug, info};

use crate::candidates::Candidate;
use crate::dns::{query, QueryOutcome};
use crate::matching::{evaluate_with_policy, ClassifiedResult};

use super::resources::{ActiveWorkerGuard, WorkerContext};
use super::RunEvent;

/// Runs one worker until the source is exhausted or the stop signal fires.
///
/// The stop signal is checked before pulling a candidate and again before
/// querying it, so no query starts after the signal has been observed. A query
/// already in flight is allowed to finish or time out.
///
/// `_active` is taken at spawn time and released when the worker returns.
pub async fn run_worker(ctx: WorkerContext, _active: ActiveWorkerGuard) {
    debug!("Worker {} started", ctx.id);

    loop {
        if ctx.stop.is_cancelled() {
            break;
        }

        let Some(candidate) = ctx.source.next_candidate() else {
            debug!("Worker {} found the candidate source exhausted", ctx.id);
            break;
        };

        if ctx.stop.is_cancelled() {
            record_outcome(&ctx, candidate, QueryOutcome::Cancelled);
            break;
        }

        let outcome = query(
            ctx.lookup.as_ref(),
            candidate.as_str(),
            ctx.config.query_timeout,
        )
        .await;
        record_outcome(&ctx, candidate, outcome);

        // A lookup that answers without suspending would otherwise keep this
        // task on the scheduler and starve the deadline timer
        tokio::task::yield_now().await;
    }

    debug!("Worker {} exiting", ctx.id);
}

/// Classifies an outcome and updates counters, statistics, matches and events.
///
/// Cancelled candidates were never queried and are not counted as processed.
pub fn record_outcome(ctx: &WorkerContext, candidate: Candidate, outcome: QueryOutcome) {
    let classified = evaluate_with_policy(
        candidate.as_str(),
        &outcome,
        &ctx.config.target_txt_value,
        ctx.config.match_policy,
    );

    if outcome != QueryOutcome::Cancelled {
        ctx.progress.record_processed();
    }

    match classified {
        ClassifiedResult::Matched(result) => {
            info!("Found TXT record on {}", result.domain);
            ctx.push_match(result.clone());
            ctx.progress.record_match();
            ctx.emit(RunEvent::Matched(result));
        }
        ClassifiedResult::NotMatched => {
            if outcome == QueryOutcome::NotFound {
                ctx.stats.increment_not_found();
            } else {
                ctx.stats.increment_no_match();
            }
            ctx.emit(RunEvent::NotMatched {
                domain: candidate.into_string(),
            });
        }
        ClassifiedResult::Errored(reason) => {
            debug!("Query for {} failed: {}", candidate, reason);
            ctx.stats.increment_error(reason.kind);
            ctx.emit(RunEvent::Errored {
                domain: candidate.into_string(),
                kind: reason.kind,
                message: reason.message,
            });
        }
    }
}
