//! Word-list expansion.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{Candidate, CandidateSource};

/// Expands every word with every TLD, in word order then TLD order.
///
/// Position `i` of the sequence is `words[i / tlds.len()] + tlds[i % tlds.len()]`.
/// A single atomic cursor hands out positions, so each pair goes to exactly
/// one caller no matter how many workers pull concurrently.
#[derive(Debug)]
pub struct WordListSource {
    words: Vec<String>,
    tlds: Vec<String>,
    cursor: AtomicUsize,
}

impl WordListSource {
    pub fn new(words: Vec<String>, tlds: Vec<String>) -> Self {
        Self {
            words,
            tlds,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of candidates the source produces in total.
    pub fn total(&self) -> usize {
        self.words.len().saturating_mul(self.tlds.len())
    }
}

impl CandidateSource for WordListSource {
    fn next_candidate(&self) -> Option<Candidate> {
        let total = self.total();
        // Stops at `total` so an exhausted source stays exhausted
        let position = self
            .cursor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pos| {
                (pos < total).then_some(pos + 1)
            })
            .ok()?;

        let word = &self.words[position / self.tlds.len()];
        let tld = &self.tlds[position % self.tlds.len()];
        Some(Candidate(format!("{word}{tld}")))
    }
}

/// Loads a word list from a file.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Duplicates
/// are kept. Words are transliterated to ASCII (`café` becomes `cafe`,
/// `blåbær` becomes `blabaer`) so they form plain hostname labels.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub async fn load_words(path: &Path) -> Result<Vec<String>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open word list {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut words = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .with_context(|| format!("Failed to read word list {}", path.display()))?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let word = deunicode::deunicode(trimmed);
        let word = word.trim();
        if word.is_empty() {
            continue;
        }
        words.push(word.to_string());
    }

    log::info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
