//! Candidate domain generation.
//!
//! A [`CandidateSource`] hands out domain names to the workers one at a time.
//! Both implementations are safe to call from every worker at once:
//! - [`WordListSource`] walks `words × tlds` with an atomic cursor and ends
//! - [`RandomSource`] draws random labels forever

mod random;
mod wordlist;

use std::fmt;

pub use random::RandomSource;
pub use wordlist::{load_words, WordListSource};

/// A domain name proposed for lookup (label followed by TLD).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(domain: impl Into<String>) -> Self {
        Candidate(domain.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Produces candidates on demand.
///
/// `None` is the end-of-sequence signal; once returned, every later call
/// returns `None` too. Implementations must not block on I/O.
pub trait CandidateSource: Send + Sync {
    fn next_candidate(&self) -> Option<Candidate>;
}

impl<T: CandidateSource + ?Sized> CandidateSource for std::sync::Arc<T> {
    fn next_candidate(&self) -> Option<Candidate> {
        (**self).next_candidate()
    }
}
