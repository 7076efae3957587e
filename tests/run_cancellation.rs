//! Cancellation: draining starts promptly and no query starts after the
//! signal.

mod helpers;

use std::time::{Duration, Instant};

use helpers::{auto_config, ScriptedLookup};
use txt_checker::{init_source, QueryOutcome, RunController, RunState, TerminationReason};

#[tokio::test]
async fn test_cancel_mid_run_starts_no_new_queries() {
    let config = auto_config(Some(Duration::from_secs(30)), &[".com", ".se"], 4);
    let query_timeout = config.query_timeout;
    let controller = RunController::new(config).expect("valid config");
    let cancel = controller.cancellation_token();
    let state = controller.subscribe_state();
    let active = controller.active_workers();
    let source = init_source(controller.config());
    let lookup = ScriptedLookup::with_delay(Duration::from_millis(100), |_| QueryOutcome::NotFound);

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let at = Instant::now();
        cancel.cancel();
        at
    });

    let report = controller.run(source, lookup.clone()).await;
    let cancelled_at = canceller.await.expect("canceller panicked");

    assert_eq!(report.termination, TerminationReason::Cancelled);
    assert!(cancelled_at.elapsed() <= query_timeout + Duration::from_millis(250));
    assert_eq!(active.count(), 0);
    assert_eq!(*state.borrow(), RunState::Completed);

    let late_starts = lookup
        .start_times()
        .into_iter()
        .filter(|started| *started > cancelled_at + Duration::from_millis(20))
        .count();
    assert_eq!(late_starts, 0, "queries started after cancellation");

    // In-flight queries were allowed to finish and were counted
    assert_eq!(
        report.snapshot.processed_count as usize,
        lookup.attempted().len()
    );
}

#[tokio::test]
async fn test_cancel_with_hung_resolver_completes_within_timeout() {
    let config = auto_config(None, &[".com"], 3);
    let query_timeout = config.query_timeout;
    let controller = RunController::new(config).expect("valid config");
    let cancel = controller.cancellation_token();
    let active = controller.active_workers();
    let source = init_source(controller.config());
    let lookup = ScriptedLookup::with_delay(Duration::from_secs(60), |_| QueryOutcome::NotFound);

    let during_run = {
        let active = active.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let running = active.count();
            cancel.cancel();
            running
        })
    };

    let start = Instant::now();
    let report = controller.run(source, lookup).await;

    assert_eq!(report.termination, TerminationReason::Cancelled);
    assert!(start.elapsed() < Duration::from_millis(100) + query_timeout * 2 + Duration::from_millis(250));
    assert_eq!(during_run.await.expect("canceller panicked"), 3);
    assert_eq!(active.count(), 0);
}
