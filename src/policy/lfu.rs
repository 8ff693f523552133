use std::hash::Hash;
use ahash::RandomState;
use indexmap::IndexMap;
use super::Policy;
use crate::error::PolicyError;
use crate::metrics::stats::{Metrics, StatsCounter};

/// Least-frequently-used eviction policy with exact per-key counts.
///
/// Counts live in an insertion-ordered map so that eviction ties resolve
/// toward the oldest-inserted key: the victim scan keeps the **first** entry
/// holding the minimum count. A plain hash map would pick an arbitrary key
/// among ties and produce a different eviction sequence on every run.
pub struct LfuPolicy<K> {
    /// Key -> access count, iterated in insertion order.
    table: IndexMap<K, u64, RandomState>,
    budget: usize,
    stats: StatsCounter,
}

impl<K: Hash + Eq> LfuPolicy<K> {
    /// Creates a policy retaining at most `budget` distinct keys.
    pub fn new(budget: usize) -> Result<Self, PolicyError> {
        if budget == 0 {
            return Err(PolicyError::ZeroBudget);
        }
        Ok(LfuPolicy {
            // One extra slot: the table briefly holds budget + 1 keys
            // between insert and eviction.
            table: IndexMap::with_capacity_and_hasher(budget.saturating_add(1), RandomState::new()),
            budget,
            stats: StatsCounter::new(),
        })
    }

    /// Number of keys currently resident.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current access count for `key`, if resident.
    pub fn count(&self, key: &K) -> Option<u64> {
        self.table.get(key).copied()
    }

    /// Removes and returns the resident key with the lowest count, taking
    /// the earliest-inserted among equals.
    fn evict_lfu(&mut self) -> Option<K> {
        let mut victim = 0;
        let mut victim_count = u64::MAX;
        for (idx, count) in self.table.values().enumerate() {
            // Strict `<` keeps the first minimum.
            if *count < victim_count {
                victim = idx;
                victim_count = *count;
            }
        }
        // shift_remove preserves the insertion order of the survivors.
        self.table.shift_remove_index(victim).map(|(key, _)| key)
    }
}

impl<K: Hash + Eq + Send> Policy<K> for LfuPolicy<K> {
    fn access(&mut self, key: K) -> Option<K> {
        if self.table.contains_key(&key) {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        *self.table.entry(key).or_insert(0) += 1;

        if self.table.len() > self.budget {
            let evicted = self.evict_lfu();
            if evicted.is_some() {
                self.stats.record_eviction();
            }
            return evicted;
        }
        None
    }

    fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    fn budget(&self) -> usize {
        self.budget
    }

    fn metrics(&self) -> Metrics {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_frequent_entry_when_over_budget() {
        let mut policy: LfuPolicy<&str> = LfuPolicy::new(2).unwrap();
        assert_eq!(policy.access("a"), None);
        assert_eq!(policy.access("b"), None);
        assert_eq!(policy.access("a"), None); // "a" now has count 2
        assert_eq!(policy.access("c"), Some("b")); // "b" is least frequent
    }

    #[test]
    fn tie_breaks_toward_earliest_inserted() {
        let mut policy: LfuPolicy<&str> = LfuPolicy::new(3).unwrap();
        policy.access("a");
        policy.access("b");
        policy.access("c");
        // All counts equal; "a" was inserted first.
        assert_eq!(policy.access("d"), Some("a"));
        // "b" is now the oldest of the remaining count-1 keys.
        assert_eq!(policy.access("e"), Some("b"));
    }

    #[test]
    fn reinserted_key_starts_over_at_the_back() {
        let mut policy: LfuPolicy<&str> = LfuPolicy::new(2).unwrap();
        policy.access("a");
        policy.access("a");
        policy.access("b");
        assert_eq!(policy.access("c"), Some("b"));
        // "b" re-enters at count 1, behind "c" in insertion order.
        assert_eq!(policy.access("b"), Some("c"));
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert!(matches!(
            LfuPolicy::<u64>::new(0),
            Err(PolicyError::ZeroBudget)
        ));
    }
}
