/// Counters updated on every policy access.
///
/// Policies are driven by one caller at a time, so these are plain integers.
/// A store that shares a policy across threads wraps the whole policy in a
/// `Mutex`, counters included.
#[derive(Debug, Clone, Default)]
pub struct StatsCounter {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl StatsCounter {
    pub fn new() -> Self {
        StatsCounter::default()
    }

    #[inline]
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Returns a point-in-time snapshot of the statistics.
    pub fn snapshot(&self) -> Metrics {
        let total = self.hits + self.misses;
        let hit_rate = if total == 0 {
            0.0_f64
        } else {
            self.hits as f64 * 100.0 / total as f64
        };
        Metrics {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            hit_rate,
        }
    }
}

/// A point-in-time snapshot of policy statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Number of accesses that found the key resident.
    pub hits: u64,
    /// Number of accesses that did not find the key.
    pub misses: u64,
    /// Number of keys reported for eviction.
    pub evictions: u64,
    /// `hits * 100 / (hits + misses)` as a percentage,
    /// or `0.0` if no accesses have been made.
    pub hit_rate: f64,
}

impl Metrics {
    /// Total number of accesses observed.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }
}
