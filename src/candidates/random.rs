//! Random label generation for auto mode.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Candidate, CandidateSource};
use crate::config::{LABEL_ALPHABET, LABEL_DIGITS, MAX_LABEL_LEN, MIN_LABEL_LEN};

/// Endless source of random candidates.
///
/// Labels are 3 to 8 characters drawn uniformly from the alphabet. TLDs are
/// assigned round-robin: a label is emitted once with every configured TLD,
/// in order, before the next label is drawn. The RNG is not cryptographic.
#[derive(Debug)]
pub struct RandomSource {
    tlds: Vec<String>,
    alphabet: Vec<u8>,
    state: Mutex<RandomState>,
}

#[derive(Debug)]
struct RandomState {
    rng: StdRng,
    label: String,
    next_tld: usize,
}

impl RandomSource {
    /// Creates a source over `tlds`.
    ///
    /// `include_digits` adds `0-9` to the lowercase alphabet. A `seed` makes
    /// the sequence reproducible; otherwise the RNG is seeded from the OS.
    pub fn new(tlds: Vec<String>, include_digits: bool, seed: Option<u64>) -> Self {
        let mut alphabet = LABEL_ALPHABET.to_vec();
        if include_digits {
            alphabet.extend_from_slice(LABEL_DIGITS);
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            tlds,
            alphabet,
            state: Mutex::new(RandomState {
                rng,
                label: String::new(),
                next_tld: 0,
            }),
        }
    }

    fn random_label(rng: &mut StdRng, alphabet: &[u8]) -> String {
        let len = rng.random_range(MIN_LABEL_LEN..=MAX_LABEL_LEN);
        (0..len)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
            .collect()
    }
}

impl CandidateSource for RandomSource {
    fn next_candidate(&self) -> Option<Candidate> {
        if self.tlds.is_empty() {
            return None;
        }

        // A poisoned lock only means another worker panicked mid-draw; the
        // state is still a valid RNG and cursor.
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if state.next_tld == 0 {
            let RandomState { rng, label, .. } = &mut *state;
            *label = Self::random_label(rng, &self.alphabet);
        }

        let domain = format!("{}{}", state.label, self.tlds[state.next_tld]);
        state.next_tld = (state.next_tld + 1) % self.tlds.len();
        Some(Candidate(domain))
    }
}
