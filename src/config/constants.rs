//! Configuration constants.
//!
//! Defaults shared by the library configuration and the CLI options.

use std::time::Duration;

/// Default number of concurrent workers
pub const DEFAULT_WORKER_COUNT: usize = 10;

/// Default TLD set, in the order candidates are produced
pub const DEFAULT_TLDS: &[&str] = &[".com", ".se", ".no", ".dk"];

/// Comma-separated form of [`DEFAULT_TLDS`] for the `--tlds` flag
pub const DEFAULT_TLDS_ARG: &str = ".com,.se,.no,.dk";

/// Per-query DNS timeout in milliseconds.
/// A single attempt is made per candidate, so this is also the upper bound
/// on how long a worker can stay busy with one domain.
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 3000;

/// Standard DNS port, used when the resolver address carries none
pub const DNS_PORT: u16 = 53;

/// Shortest random label generated in auto mode
pub const MIN_LABEL_LEN: usize = 3;
/// Longest random label generated in auto mode
pub const MAX_LABEL_LEN: usize = 8;

/// Letters used for random labels
pub const LABEL_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
/// Digits appended to the alphabet when `--digits` is set
pub const LABEL_DIGITS: &[u8] = b"0123456789";

/// How often the progress reporter refreshes its snapshot
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Results file written by the CLI
pub const DEFAULT_OUTPUT_FILE: &str = "successful_domains.txt";
