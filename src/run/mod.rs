//! Worker pool and run controller.
//!
//! A run moves through `Idle → Running → Draining → Completed`:
//! - `Running`: `worker_count` tasks each loop pull → query → evaluate → record
//! - `Draining`: entered on source exhaustion, time budget expiry or
//!   cancellation; no new query is started, in-flight ones finish or time out
//! - `Completed`: every worker has exited and the report is final
//!
//! Query failures stay inside the worker that saw them. Only the three
//! triggers above end a run.

mod finalize;
mod init;
mod resources;
mod task;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use log::{info, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::app::log_progress;
use crate::candidates::CandidateSource;
use crate::config::{RunConfig, ScanMode};
use crate::dns::TxtLookup;
use crate::error_handling::{ConfigError, ProcessingStats, QueryErrorKind};
use crate::matching::MatchResult;
use crate::progress::{ProgressAggregator, ProgressSnapshot};

pub use init::{init_lookup, init_source, run_scan};
pub use resources::ActiveWorkers;

use resources::WorkerContext;

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Draining,
    Completed,
}

/// What ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The word list was fully processed
    Exhausted,
    /// The auto-mode duration elapsed
    TimeBudget,
    /// The cancellation token was triggered
    Cancelled,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TerminationReason::Exhausted => "word list exhausted",
            TerminationReason::TimeBudget => "time budget reached",
            TerminationReason::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Per-candidate notification, delivered as results are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Matched(MatchResult),
    NotMatched {
        domain: String,
    },
    Errored {
        domain: String,
        kind: QueryErrorKind,
        message: String,
    },
}

/// Final result of a run.
#[derive(Debug)]
pub struct RunReport {
    /// Counters after every worker exited
    pub snapshot: ProgressSnapshot,
    /// Matches in the order they were recorded
    pub matches: Vec<MatchResult>,
    /// Failure and non-match statistics
    pub stats: Arc<ProcessingStats>,
    pub termination: TerminationReason,
    pub elapsed_seconds: f64,
}

/// Owns one run from validation to the final report.
///
/// # Examples
///
/// ```no_run
/// use txt_checker::{RunConfig, RunController, ScanMode};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = RunConfig {
///     resolver_address: "1.1.1.1".to_string(),
///     target_txt_value: "v=spf1".to_string(),
///     mode: ScanMode::WordList { words: vec!["example".to_string()] },
///     ..Default::default()
/// };
/// let controller = RunController::new(config)?;
/// let cancel = controller.cancellation_token();
/// tokio::spawn(async move {
///     let _ = tokio::signal::ctrl_c().await;
///     cancel.cancel();
/// });
/// let report = controller.run_with_resolver().await?;
/// println!("{} matches", report.matches.len());
/// # Ok(())
/// # }
/// ```
pub struct RunController {
    config: Arc<RunConfig>,
    cancel: CancellationToken,
    state_tx: watch::Sender<RunState>,
    progress_tx: watch::Sender<ProgressSnapshot>,
    events: Option<mpsc::UnboundedSender<RunEvent>>,
    active_workers: ActiveWorkers,
}

impl RunController {
    /// Validates `config` and prepares an idle run.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is unusable. No task has
    /// been spawned when this fails.
    pub fn new(mut config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (state_tx, _) = watch::channel(RunState::Idle);
        let (progress_tx, _) = watch::channel(ProgressSnapshot::default());
        Ok(Self {
            config: Arc::new(config),
            cancel: CancellationToken::new(),
            state_tx,
            progress_tx,
            events: None,
            active_workers: ActiveWorkers::default(),
        })
    }

    /// Sends a [`RunEvent`] for every recorded candidate to `events`.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<RunEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The validated configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Token that stops the run when cancelled. Safe to trigger at any time,
    /// including before [`run`](Self::run) is called.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Handle on the number of workers currently running.
    pub fn active_workers(&self) -> ActiveWorkers {
        self.active_workers.clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<RunState> {
        self.state_tx.subscribe()
    }

    /// Receives a fresh snapshot every `progress_interval` and a last one when
    /// the run completes.
    pub fn subscribe_progress(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress_tx.subscribe()
    }

    /// Runs the pool until the source is exhausted, the time budget is spent
    /// or the run is cancelled, then drains and reports.
    pub async fn run<S, L>(self, source: S, lookup: L) -> RunReport
    where
        S: CandidateSource + 'static,
        L: TxtLookup + 'static,
    {
        let RunController {
            config,
            cancel,
            state_tx,
            progress_tx,
            events,
            active_workers,
        } = self;

        let start = Instant::now();
        let progress = Arc::new(ProgressAggregator::starting_at(start));
        let stats = Arc::new(ProcessingStats::new());
        let matches = Arc::new(Mutex::new(Vec::new()));
        let stop = cancel.child_token();

        let reporter_cancel = CancellationToken::new();
        let reporter = spawn_reporter(
            Arc::clone(&progress),
            progress_tx,
            config.progress_interval,
            reporter_cancel.clone(),
        );

        let template = WorkerContext {
            id: 0,
            config: Arc::clone(&config),
            source: Arc::new(source),
            lookup: Arc::new(lookup),
            stop: stop.clone(),
            progress: Arc::clone(&progress),
            stats: Arc::clone(&stats),
            matches: Arc::clone(&matches),
            events,
        };

        state_tx.send_replace(RunState::Running);
        info!(
            "Starting {} workers, TLDs: {}",
            config.worker_count,
            config.tlds.join(", ")
        );

        let mut workers = FuturesUnordered::new();
        for id in 0..config.worker_count {
            let guard = active_workers.enter();
            let ctx = WorkerContext {
                id,
                ..template.clone()
            };
            workers.push(tokio::spawn(task::run_worker(ctx, guard)));
        }
        drop(template);

        let deadline = match config.mode {
            ScanMode::Auto {
                duration: Some(duration),
            } => Some(tokio::time::Instant::from_std(start) + duration),
            _ => None,
        };

        let termination = tokio::select! {
            biased;
            _ = cancel.cancelled() => TerminationReason::Cancelled,
            _ = wait_for_deadline(deadline) => TerminationReason::TimeBudget,
            _ = drain_workers(&mut workers) => TerminationReason::Exhausted,
        };

        info!("Run draining: {}", termination);
        state_tx.send_replace(RunState::Draining);
        stop.cancel();
        drain_workers(&mut workers).await;
        if active_workers.count() != 0 {
            warn!("{} workers still counted as active after draining", active_workers.count());
        }

        let report = finalize::finalize_run(finalize::RunOutcome {
            start,
            termination,
            progress,
            stats,
            matches,
            reporter_cancel,
            reporter,
        })
        .await;

        state_tx.send_replace(RunState::Completed);
        report
    }
}

async fn wait_for_deadline(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn drain_workers(workers: &mut FuturesUnordered<JoinHandle<()>>) {
    while let Some(result) = workers.next().await {
        if let Err(join_error) = result {
            warn!("Worker task panicked: {:?}", join_error);
        }
    }
}

/// Publishes a snapshot every `interval` until `cancel` fires, then publishes
/// one last snapshot.
fn spawn_reporter(
    progress: Arc<ProgressAggregator>,
    progress_tx: watch::Sender<ProgressSnapshot>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let snapshot = progress.snapshot();
                    log_progress(&snapshot);
                    progress_tx.send_replace(snapshot);
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
        progress_tx.send_replace(progress.snapshot());
    })
}
