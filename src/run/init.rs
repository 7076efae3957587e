//! Run resource initialization.
//!
//! Builds the production collaborators for a validated [`RunConfig`]: the
//! hickory-backed lookup bound to the configured resolver and the candidate
//! source for the selected mode.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::candidates::{CandidateSource, RandomSource, WordListSource};
use crate::config::{RunConfig, ScanMode};
use crate::dns::HickoryTxtClient;
use crate::initialization::resolve_resolver_address;

use super::{RunController, RunReport};

/// Resolves the configured resolver address and builds a client for it.
///
/// # Errors
///
/// Returns an error if the address cannot be resolved.
pub async fn init_lookup(config: &RunConfig) -> Result<HickoryTxtClient> {
    let name_server = resolve_resolver_address(&config.resolver_address)
        .await
        .context("Failed to resolve the resolver address")?;
    let client = HickoryTxtClient::new(name_server, config.query_timeout);
    info!("Querying TXT records via {}", client.name_server());
    Ok(client)
}

/// Builds the candidate source for `config.mode`.
pub fn init_source(config: &RunConfig) -> Arc<dyn CandidateSource> {
    match &config.mode {
        ScanMode::WordList { words } => {
            let source = WordListSource::new(words.clone(), config.tlds.clone());
            info!("Word list mode: {} candidates", source.total());
            Arc::new(source)
        }
        ScanMode::Auto { duration } => {
            match duration {
                Some(duration) => info!("Auto mode for {:.1}s", duration.as_secs_f64()),
                None => info!("Auto mode until cancelled"),
            }
            Arc::new(RandomSource::new(
                config.tlds.clone(),
                config.include_digits,
                config.seed,
            ))
        }
    }
}

impl RunController {
    /// Runs with the production resolver client and the configured source.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver cannot be set up. Per-query failures
    /// never fail the run.
    pub async fn run_with_resolver(self) -> Result<RunReport> {
        let lookup = init_lookup(self.config()).await?;
        let source = init_source(self.config());
        Ok(self.run(source, lookup).await)
    }
}

/// Validates `config` and runs a scan to completion.
///
/// # Errors
///
/// Returns a [`ConfigError`](crate::error_handling::ConfigError) (wrapped)
/// before anything starts if the configuration is invalid, or an error if
/// the resolver cannot be set up.
pub async fn run_scan(config: RunConfig) -> Result<RunReport> {
    let controller = RunController::new(config)?;
    controller.run_with_resolver().await
}
