//! Table reference label generation.
//!
//! Refs are an uppercase letter followed by digits (`A1`, `K7`). Random
//! two-character refs are tried first; once those collide too often the
//! generator scans the two-character space in order and then widens to
//! longer digit runs, so a free ref is always found.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DEFAULT_ATTEMPTS: usize = 64;

/// Produces refs not already used by the schema.
#[derive(Debug, Clone)]
pub struct RefGenerator {
    rng: StdRng,
    max_attempts: usize,
}

impl RefGenerator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible layouts and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Random attempts made before falling back to the ordered scan.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// A ref that is not in `existing`.
    pub fn generate<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) -> String {
        let taken: HashSet<&str> = existing.into_iter().collect();

        for _ in 0..self.max_attempts {
            let letter = LETTERS[self.rng.gen_range(0..LETTERS.len())] as char;
            let digit: u32 = self.rng.gen_range(0..10);
            let candidate = format!("{letter}{digit}");
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
        }

        tracing::debug!(
            taken = taken.len(),
            "Random ref attempts exhausted, scanning"
        );

        let mut width = 1usize;
        loop {
            let limit = 10u64.saturating_pow(width as u32);
            for &letter in LETTERS {
                for n in 0..limit {
                    let candidate = format!("{}{:0width$}", letter as char, n, width = width);
                    if !taken.contains(candidate.as_str()) {
                        return candidate;
                    }
                }
            }
            width += 1;
        }
    }
}

impl Default for RefGenerator {
    fn default() -> Self {
        Self::new()
    }
}
