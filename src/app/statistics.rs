//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ProcessingStats, QueryErrorKind};

/// Prints query failure and non-match counts to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();

    if total_errors > 0 {
        info!("Query Error Counts ({} total):", total_errors);
        for kind in QueryErrorKind::iter() {
            let count = error_stats.get_error_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }

    let not_found = error_stats.not_found_count();
    let no_match = error_stats.no_match_count();
    if not_found > 0 || no_match > 0 {
        info!("Non-matching domains:");
        info!("   No TXT records: {}", not_found);
        info!("   TXT records without target: {}", no_match);
    }
}
