//! Tie-breaking for hybrid arm selection.
//!
//! The hybrid policy routes each miss to whichever arm carries more weight.
//! When the weights are exactly equal there is nothing to compare, so the
//! policy asks a [`TieBreaker`] to pick a side. The default draws from a
//! small PRNG; tests inject a seeded or fixed breaker to pin the eviction
//! sequence.
//!
//! # Example
//!
//! ```
//! use cortado::tiebreak::FixedTieBreaker;
//! use cortado::{Arm, HybridBuilder, HybridPolicy};
//!
//! let policy: HybridPolicy<u64> = HybridBuilder::new(100)
//!     .tie_breaker(Box::new(FixedTieBreaker(Arm::Recency)))
//!     .build()
//!     .unwrap();
//! # drop(policy);
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use crate::policy::Arm;

/// Picks the winning arm when the hybrid's weights are exactly tied.
pub trait TieBreaker: Send {
    fn break_tie(&mut self) -> Arm;
}

// ---------------------------------------------------------------------------
// Built-in implementations
// ---------------------------------------------------------------------------

/// Uniformly random tie-breaking. This is the default.
pub struct RandomTieBreaker {
    rng: SmallRng,
}

impl RandomTieBreaker {
    /// Creates a breaker seeded from the operating system.
    pub fn new() -> Self {
        RandomTieBreaker {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a breaker with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        RandomTieBreaker {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTieBreaker {
    fn default() -> Self {
        Self::new()
    }
}

impl TieBreaker for RandomTieBreaker {
    #[inline]
    fn break_tie(&mut self) -> Arm {
        if self.rng.gen_bool(0.5) {
            Arm::Recency
        } else {
            Arm::Frequency
        }
    }
}

/// Always answers with the same arm. Useful in tests that need a fully
/// deterministic eviction sequence.
pub struct FixedTieBreaker(pub Arm);

impl TieBreaker for FixedTieBreaker {
    #[inline]
    fn break_tie(&mut self) -> Arm {
        self.0
    }
}
