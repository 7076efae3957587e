//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Stops the progress reporter and waits for it to exit.
///
/// The reporter publishes one last snapshot on its way out, so the caller
/// sees final counts once this returns.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    reporter_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(reporter_task) = reporter_task {
        if let Err(e) = reporter_task.await {
            log::warn!("Progress reporter task failed: {:?}", e);
        }
    }
}
