use std::hash::Hash;
use ahash::AHashMap;
use super::Policy;
use crate::error::PolicyError;
use crate::metrics::stats::{Metrics, StatsCounter};

/// Sentinel indices in the `nodes` arena.
const HEAD: usize = 0; // most-recently-used end
const TAIL: usize = 1; // least-recently-used end
const NULL: usize = usize::MAX;

struct LruNode<K> {
    /// `None` only for the HEAD and TAIL sentinels.
    key: Option<K>,
    /// Index toward HEAD (more recently used).
    prev: usize,
    /// Index toward TAIL (less recently used).
    next: usize,
}

/// O(1) least-recently-used eviction policy backed by an index-arena
/// doubly-linked list.
///
/// Nodes are stored in a `Vec<LruNode<K>>` and linked by index, avoiding
/// unsafe raw pointers at the cost of a little indirection. The list runs
/// from most-recently-used (just after HEAD) to least-recently-used (just
/// before TAIL); eviction always removes the node before TAIL.
pub struct LruPolicy<K> {
    /// Index 0 = HEAD sentinel, 1 = TAIL sentinel, 2+ = real entries.
    nodes: Vec<LruNode<K>>,
    /// Maps a key to its index in `nodes`.
    map: AHashMap<K, usize>,
    /// Indices of freed (reusable) slots.
    free_list: Vec<usize>,
    budget: usize,
    stats: StatsCounter,
}

impl<K: Hash + Eq + Clone + Send> LruPolicy<K> {
    /// Creates a policy retaining at most `budget` distinct keys.
    pub fn new(budget: usize) -> Result<Self, PolicyError> {
        if budget == 0 {
            return Err(PolicyError::ZeroBudget);
        }
        // Two sentinels, the budget, and one transient over-budget slot.
        let mut nodes: Vec<LruNode<K>> = Vec::with_capacity(budget.saturating_add(3));
        // HEAD sentinel (index 0): next points to TAIL initially
        nodes.push(LruNode {
            key: None,
            prev: NULL,
            next: TAIL,
        });
        // TAIL sentinel (index 1): prev points to HEAD initially
        nodes.push(LruNode {
            key: None,
            prev: HEAD,
            next: NULL,
        });

        Ok(LruPolicy {
            nodes,
            map: AHashMap::new(),
            free_list: Vec::new(),
            budget,
            stats: StatsCounter::new(),
        })
    }

    /// Number of keys currently resident.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Links `idx` immediately after the HEAD sentinel (marks it most-recently-used).
    fn link_after_head(&mut self, idx: usize) {
        let old_first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = old_first;
        self.nodes[HEAD].next = idx;
        self.nodes[old_first].prev = idx;
    }

    /// Detaches `idx` from its current position in the list.
    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[idx].prev = NULL;
        self.nodes[idx].next = NULL;
    }

    /// Allocates a new node (reusing from the free list when available).
    fn alloc_node(&mut self, key: K) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx].key = Some(key);
            self.nodes[idx].prev = NULL;
            self.nodes[idx].next = NULL;
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(LruNode {
                key: Some(key),
                prev: NULL,
                next: NULL,
            });
            idx
        }
    }

    /// Removes and returns the least-recently-used key.
    fn evict_lru(&mut self) -> Option<K> {
        let lru_idx = self.nodes[TAIL].prev;
        if lru_idx == HEAD {
            return None; // list is empty
        }
        self.unlink(lru_idx);
        let key = self.nodes[lru_idx].key.take()?;
        self.map.remove(&key);
        self.free_list.push(lru_idx);
        Some(key)
    }
}

impl<K: Hash + Eq + Clone + Send> Policy<K> for LruPolicy<K> {
    fn access(&mut self, key: K) -> Option<K> {
        if let Some(&idx) = self.map.get(&key) {
            self.stats.record_hit();
            self.unlink(idx);
            self.link_after_head(idx);
            return None;
        }

        self.stats.record_miss();
        let idx = self.alloc_node(key.clone());
        self.map.insert(key, idx);
        self.link_after_head(idx);

        if self.map.len() > self.budget {
            let evicted = self.evict_lru();
            if evicted.is_some() {
                self.stats.record_eviction();
            }
            return evicted;
        }
        None
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn budget(&self) -> usize {
        self.budget
    }

    fn metrics(&self) -> Metrics {
        self.stats.snapshot()
    }
}
