use std::hash::Hash;
use crate::error::PolicyError;
use crate::policy::hybrid::{HybridPolicy, DEFAULT_LEARNING_RATE};
use crate::tiebreak::{RandomTieBreaker, TieBreaker};

/// Builder for configuring and constructing a [`HybridPolicy`].
///
/// # Example
/// ```
/// use cortado::{HybridBuilder, HybridPolicy};
///
/// let policy: HybridPolicy<String> = HybridBuilder::new(1_000)
///     .learning_rate(0.45)
///     .seed(42)
///     .build()
///     .unwrap();
/// # drop(policy);
/// ```
pub struct HybridBuilder {
    budget: usize,
    learning_rate: f64,
    tie_breaker: Box<dyn TieBreaker>,
}

impl HybridBuilder {
    pub fn new(budget: usize) -> Self {
        HybridBuilder {
            budget,
            learning_rate: DEFAULT_LEARNING_RATE,
            tie_breaker: Box::new(RandomTieBreaker::new()),
        }
    }

    /// Set the exponent of the multiplicative regret update (default: 0.45).
    ///
    /// Larger values shift trust between the arms faster. Must be finite and
    /// greater than 0; checked by [`build`](Self::build).
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Replace the tie-breaking source consulted on exact weight ties.
    pub fn tie_breaker(mut self, breaker: Box<dyn TieBreaker>) -> Self {
        self.tie_breaker = breaker;
        self
    }

    /// Shorthand for a seeded random tie-breaker, for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.tie_breaker = Box::new(RandomTieBreaker::seeded(seed));
        self
    }

    /// Validates the configuration and constructs the policy.
    pub fn build<K: Hash + Eq + Clone + Send>(self) -> Result<HybridPolicy<K>, PolicyError> {
        HybridPolicy::from_parts(self.budget, self.learning_rate, self.tie_breaker)
    }
}
