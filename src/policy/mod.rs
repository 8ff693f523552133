pub mod hybrid;
pub mod lfu;
pub mod lru;

use std::hash::Hash;
use crate::metrics::stats::Metrics;

/// Which of the hybrid's two sub-policies a decision refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    /// The frequency side (least-frequently-used).
    Frequency,
    /// The recency side (least-recently-used).
    Recency,
}

/// Core eviction decision strategy.
///
/// All methods are called **single-threadedly** by the owning store.
/// Implementors only need to be `Send`; `Sync` is not required because a
/// concurrent store wraps the policy in a `Mutex`.
pub trait Policy<K: Hash + Eq>: Send {
    /// Records one access to `key`.
    ///
    /// Returns the key that must be evicted from the backing store to stay
    /// within budget, or `None` if no eviction is needed. Hits never evict.
    fn access(&mut self, key: K) -> Option<K>;

    /// Returns `true` if `key` is currently resident.
    fn contains(&self, key: &K) -> bool;

    /// Maximum number of distinct resident keys.
    fn budget(&self) -> usize;

    /// A point-in-time snapshot of the access statistics.
    fn metrics(&self) -> Metrics;

    /// Convenience: percentage of accesses that hit, `0.0` before the
    /// first access.
    fn hit_rate(&self) -> f64 {
        self.metrics().hit_rate
    }
}
