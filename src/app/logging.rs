//! Progress logging utilities.

use log::info;

use crate::progress::ProgressSnapshot;

/// Logs one progress line for `snapshot`.
pub fn log_progress(snapshot: &ProgressSnapshot) {
    info!(
        "Processed {} domains in {:.2} seconds (~{:.2} domains/sec), {} matched",
        snapshot.processed_count,
        snapshot.elapsed_seconds,
        snapshot.rate(),
        snapshot.match_count
    );
}

/// Formats the live progress line shown on the terminal.
pub fn render_progress_line(snapshot: &ProgressSnapshot) -> String {
    format!(
        "Domains checked: {} | Rate: {:.2} domains/s | Elapsed: {:.0}s | Found: {}",
        snapshot.processed_count,
        snapshot.rate(),
        snapshot.elapsed_seconds,
        snapshot.match_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_zero_elapsed() {
        // Should not panic or divide by zero
        log_progress(&ProgressSnapshot::default());
    }

    #[test]
    fn test_render_progress_line() {
        let line = render_progress_line(&ProgressSnapshot {
            processed_count: 50,
            elapsed_seconds: 10.0,
            match_count: 2,
        });
        assert_eq!(
            line,
            "Domains checked: 50 | Rate: 5.00 domains/s | Elapsed: 10s | Found: 2"
        );
    }

    #[test]
    fn test_log_progress() {
        log_progress(&ProgressSnapshot {
            processed_count: 120,
            elapsed_seconds: 4.0,
            match_count: 3,
        });
    }
}
