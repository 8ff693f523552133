use std::collections::VecDeque;
use std::hash::Hash;
use super::lfu::LfuPolicy;
use super::lru::LruPolicy;
use super::{Arm, Policy};
use crate::builder::HybridBuilder;
use crate::error::PolicyError;
use crate::metrics::stats::{Metrics, StatsCounter};
use crate::tiebreak::TieBreaker;

/// Default exponent for the multiplicative regret update.
pub(crate) const DEFAULT_LEARNING_RATE: f64 = 0.45;

/// A snapshot of the hybrid's arm weights. The pair always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmWeights {
    /// Trust placed in the frequency arm.
    pub frequency: f64,
    /// Trust placed in the recency arm.
    pub recency: f64,
}

/// Adaptive eviction policy blending LFU and LRU.
///
/// ## Algorithm
///
/// Two complete sub-policies ("arms") run side by side, each with its own
/// resident set bounded by the shared budget:
///
/// | Arm           | Discipline | Evicts                                      |
/// |---------------|------------|---------------------------------------------|
/// | **Frequency** | LFU        | lowest access count, earliest-inserted on a tie |
/// | **Recency**   | LRU        | least recently used                         |
///
/// Each access is resolved in two steps:
///
/// 1. **Hit**: a key resident in either arm counts as a hit and is replayed
///    into the arm holding it, so that arm's ordering and counts advance.
///    The frequency arm takes precedence when both hold the key. Hits never
///    evict.
/// 2. **Miss**: the arms' weights are first adjusted by regret. Each arm
///    logs its evictions in a bounded history, and a missed key found in the
///    recency arm's history means frequency-based retention would have kept
///    it, so the frequency weight is multiplied by `exp(learning_rate)`; the
///    symmetric case boosts the recency weight. The pair is renormalized to
///    sum to 1 on every miss. The key then goes to the arm with the greater
///    weight (exact ties are settled by the injected [`TieBreaker`]), and if
///    that arm evicts, the victim is logged in its history and returned to
///    the caller.
///
/// Weights start at 0.5 each, so the earliest routing decisions fall to the
/// tie-breaker until the first regret signal arrives.
///
/// ## References
///
/// - Ari et al., "ACME: Adaptive Caching Using Multiple Experts", WDAS 2002.
/// - Herbster & Warmuth, "Tracking the Best Expert", Machine Learning 32, 1998.
pub struct HybridPolicy<K> {
    frequency: LfuPolicy<K>,
    recency: LruPolicy<K>,
    /// Keys most recently evicted by the frequency arm, newest first.
    history_lfu: VecDeque<K>,
    /// Keys most recently evicted by the recency arm, newest first.
    history_lru: VecDeque<K>,
    w_lfu: f64,
    w_lru: f64,
    learning_rate: f64,
    tie_breaker: Box<dyn TieBreaker>,
    budget: usize,
    stats: StatsCounter,
}

impl<K: Hash + Eq + Clone + Send> HybridPolicy<K> {
    /// Creates a hybrid with the default learning rate and a random
    /// tie-breaker. Use [`HybridBuilder`] for anything else.
    pub fn new(budget: usize) -> Result<Self, PolicyError> {
        HybridBuilder::new(budget).build()
    }

    pub(crate) fn from_parts(
        budget: usize,
        learning_rate: f64,
        tie_breaker: Box<dyn TieBreaker>,
    ) -> Result<Self, PolicyError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(PolicyError::InvalidLearningRate(learning_rate));
        }
        Ok(HybridPolicy {
            frequency: LfuPolicy::new(budget)?,
            recency: LruPolicy::new(budget)?,
            history_lfu: VecDeque::with_capacity(budget),
            history_lru: VecDeque::with_capacity(budget),
            w_lfu: 0.5,
            w_lru: 0.5,
            learning_rate,
            tie_breaker,
            budget,
            stats: StatsCounter::new(),
        })
    }

    /// Current arm weights.
    pub fn weights(&self) -> ArmWeights {
        ArmWeights {
            frequency: self.w_lfu,
            recency: self.w_lru,
        }
    }

    // -----------------------------------------------------------------------
    // Weight adaptation
    // -----------------------------------------------------------------------

    /// Applies the regret update for a missed key, then renormalizes.
    ///
    /// A key in an arm's eviction history was thrown out by that arm and is
    /// wanted again, so the rival arm's weight grows by `exp(learning_rate)`.
    /// Renormalization runs on every miss, regret or not, keeping the pair a
    /// two-way distribution.
    fn update_weights(&mut self, key: &K) {
        if self.history_lru.contains(key) {
            self.w_lfu *= self.learning_rate.exp();
        } else if self.history_lfu.contains(key) {
            self.w_lru *= self.learning_rate.exp();
        }
        self.w_lru /= self.w_lru + self.w_lfu;
        self.w_lfu = 1.0 - self.w_lru;
    }

    /// Picks the arm for a missed key: greater weight wins, exact ties go
    /// to the tie-breaker.
    #[inline]
    fn select_arm(&mut self) -> Arm {
        if self.w_lru > self.w_lfu {
            Arm::Recency
        } else if self.w_lfu > self.w_lru {
            Arm::Frequency
        } else {
            self.tie_breaker.break_tie()
        }
    }

    /// Logs an eviction into `history`, dropping the oldest entry when the
    /// log is at the budget cap.
    fn push_history(history: &mut VecDeque<K>, budget: usize, evicted: K) {
        if history.len() >= budget {
            history.pop_back();
        }
        history.push_front(evicted);
    }
}

impl<K: Hash + Eq + Clone + Send> Policy<K> for HybridPolicy<K> {
    fn access(&mut self, key: K) -> Option<K> {
        if self.contains(&key) {
            self.stats.record_hit();
            // The frequency arm takes precedence when both arms hold the key.
            if self.frequency.contains(&key) {
                return self.frequency.access(key);
            }
            return self.recency.access(key);
        }

        self.stats.record_miss();
        self.update_weights(&key);
        let arm = self.select_arm();
        let evicted = match arm {
            Arm::Frequency => self.frequency.access(key),
            Arm::Recency => self.recency.access(key),
        };
        if let Some(victim) = &evicted {
            self.stats.record_eviction();
            match arm {
                Arm::Frequency => {
                    Self::push_history(&mut self.history_lfu, self.budget, victim.clone())
                }
                Arm::Recency => {
                    Self::push_history(&mut self.history_lru, self.budget, victim.clone())
                }
            }
        }
        evicted
    }

    /// A key is resident if either arm holds it.
    fn contains(&self, key: &K) -> bool {
        self.frequency.contains(key) || self.recency.contains(key)
    }

    fn budget(&self) -> usize {
        self.budget
    }

    /// Top-level statistics. The arms keep their own books for the accesses
    /// delegated to them; those are not folded in here.
    fn metrics(&self) -> Metrics {
        self.stats.snapshot()
    }
}
