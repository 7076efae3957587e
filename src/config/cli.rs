//! Command-line options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};

use crate::config::constants::{
    DEFAULT_OUTPUT_FILE, DEFAULT_QUERY_TIMEOUT_MS, DEFAULT_TLDS_ARG, DEFAULT_WORKER_COUNT,
    PROGRESS_INTERVAL,
};
use crate::config::types::{LogFormat, LogLevel, MatchPolicy, RunConfig, ScanMode};

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Check every word in a list against the default TLDs
/// txt_checker -l words.txt -w 20 -d 8.8.8.8 -x "v=spf1 include:_custspf.one.com ~all"
///
/// # Generate random domains for 10 seconds
/// txt_checker -a -t 10 -w 50 -d 8.8.8.8 -x "include:_custspf.one.com" --tlds ".co.uk,.com,.gov"
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "txt_checker",
    version,
    about = "Checks candidate domains for a specific TXT record value."
)]
#[command(group(ArgGroup::new("mode").required(true).args(["list", "auto"])))]
pub struct Opt {
    /// Path to the word list file
    #[arg(short = 'l', long, value_parser)]
    pub list: Option<PathBuf>,

    /// Enable auto mode for random domain generation
    #[arg(short = 'a', long)]
    pub auto: bool,

    /// Run time in seconds for auto mode (runs until Ctrl-C when omitted)
    #[arg(short = 't', long = "time", conflicts_with = "list")]
    pub time: Option<u64>,

    /// Number of concurrent workers
    #[arg(short = 'w', long, default_value_t = DEFAULT_WORKER_COUNT)]
    pub workers: usize,

    /// DNS server to use for queries (IP, IP:port or hostname)
    #[arg(short = 'd', long)]
    pub dns: String,

    /// TXT record value to look for
    #[arg(short = 'x', long)]
    pub txt: String,

    /// Comma-separated list of TLDs to use
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_TLDS_ARG)]
    pub tlds: Vec<String>,

    /// File that matched domains are appended to
    #[arg(short = 'o', long, value_parser, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Per-query timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_QUERY_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// How TXT strings are compared with the target: contains|exact
    #[arg(long, value_enum, default_value_t = MatchPolicy::Contains)]
    pub match_policy: MatchPolicy,

    /// Include digits in randomly generated labels
    #[arg(long)]
    pub digits: bool,

    /// Seed for the random label generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print ip4/ip6/include details of matched SPF records
    #[arg(long)]
    pub show_spf: bool,

    /// Look up DMARC and DKIM records of every matched domain
    #[arg(long)]
    pub mail_records: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds the run configuration for an already-prepared scan mode.
    ///
    /// The word list is loaded by the caller so that file I/O stays out of
    /// option parsing.
    pub fn run_config(&self, mode: ScanMode) -> RunConfig {
        RunConfig {
            resolver_address: self.dns.clone(),
            target_txt_value: self.txt.clone(),
            tlds: self.tlds.clone(),
            worker_count: self.workers,
            mode,
            query_timeout: Duration::from_millis(self.timeout_ms),
            match_policy: self.match_policy,
            include_digits: self.digits,
            seed: self.seed,
            progress_interval: PROGRESS_INTERVAL,
        }
    }

    /// Auto-mode time budget, if one was given.
    pub fn auto_duration(&self) -> Option<Duration> {
        self.time.map(Duration::from_secs)
    }
}
