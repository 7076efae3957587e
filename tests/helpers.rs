// Shared test helpers for scripted DNS lookups and run configurations.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use txt_checker::{QueryOutcome, RunConfig, ScanMode, TxtLookup};

type Answer = Box<dyn Fn(&str) -> QueryOutcome + Send + Sync>;

/// In-memory `TxtLookup` that records every domain it is asked about.
pub struct ScriptedLookup {
    attempts: Mutex<Vec<(String, Instant)>>,
    delay: Duration,
    answer: Answer,
}

#[allow(dead_code)] // Not every test file uses every helper
impl ScriptedLookup {
    pub fn new(answer: impl Fn(&str) -> QueryOutcome + Send + Sync + 'static) -> Arc<Self> {
        Self::with_delay(Duration::ZERO, answer)
    }

    /// Answers after sleeping for `delay`, simulating resolver latency.
    pub fn with_delay(
        delay: Duration,
        answer: impl Fn(&str) -> QueryOutcome + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            attempts: Mutex::new(Vec::new()),
            delay,
            answer: Box::new(answer),
        })
    }

    /// Domains queried so far, in the order the queries started.
    pub fn attempted(&self) -> Vec<String> {
        self.attempts
            .lock()
            .expect("attempts lock poisoned")
            .iter()
            .map(|(domain, _)| domain.clone())
            .collect()
    }

    /// When each query started.
    pub fn start_times(&self) -> Vec<Instant> {
        self.attempts
            .lock()
            .expect("attempts lock poisoned")
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl TxtLookup for ScriptedLookup {
    async fn lookup_txt(&self, domain: &str) -> QueryOutcome {
        self.attempts
            .lock()
            .expect("attempts lock poisoned")
            .push((domain.to_string(), Instant::now()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.answer)(domain)
    }
}

/// Answers with an SPF record for domains whose label starts with `prefix`.
#[allow(dead_code)]
pub fn spf_for_prefix(prefix: &'static str) -> impl Fn(&str) -> QueryOutcome + Send + Sync {
    move |domain: &str| {
        if domain.starts_with(prefix) {
            QueryOutcome::Success(vec!["v=spf1 include:_custspf.one.com ~all".to_string()])
        } else {
            QueryOutcome::NotFound
        }
    }
}

#[allow(dead_code)]
pub fn word_list_config(words: &[&str], tlds: &[&str], worker_count: usize) -> RunConfig {
    RunConfig {
        resolver_address: "127.0.0.1".to_string(),
        target_txt_value: "include:_custspf.one.com".to_string(),
        tlds: tlds.iter().map(|t| t.to_string()).collect(),
        worker_count,
        mode: ScanMode::WordList {
            words: words.iter().map(|w| w.to_string()).collect(),
        },
        query_timeout: Duration::from_millis(500),
        progress_interval: Duration::from_millis(50),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn auto_config(duration: Option<Duration>, tlds: &[&str], worker_count: usize) -> RunConfig {
    RunConfig {
        resolver_address: "127.0.0.1".to_string(),
        target_txt_value: "include:_custspf.one.com".to_string(),
        tlds: tlds.iter().map(|t| t.to_string()).collect(),
        worker_count,
        mode: ScanMode::Auto { duration },
        query_timeout: Duration::from_millis(500),
        progress_interval: Duration::from_millis(50),
        seed: Some(7),
        ..Default::default()
    }
}
