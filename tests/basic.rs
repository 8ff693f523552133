use cortado::tiebreak::FixedTieBreaker;
use cortado::{Arm, HybridBuilder, HybridPolicy, LfuPolicy, LruPolicy, Policy, PolicyError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_hybrid(budget: usize, arm: Arm) -> HybridPolicy<&'static str> {
    HybridBuilder::new(budget)
        .tie_breaker(Box::new(FixedTieBreaker(arm)))
        .build()
        .unwrap()
}

/// Three warm-up touches of "1", then "a", "b", "c" cycling 50 times.
/// The early burst makes "1" look permanently important to a frequency
/// policy even though it never comes back.
fn stale_burst_trace() -> Vec<&'static str> {
    let mut trace = vec!["1"; 3];
    for _ in 0..50 {
        trace.extend_from_slice(&["a", "b", "c"]);
    }
    trace
}

/// A hot key, a burst of fresh keys that pushes it out, then the hot key
/// again. Punishes pure recency twice per swing.
fn seesaw_trace() -> Vec<&'static str> {
    let mut trace = vec!["a"; 10];
    trace.extend_from_slice(&["b", "c", "d"]);
    trace.extend_from_slice(&["a"; 3]);
    trace.extend_from_slice(&["b", "c", "d"]);
    trace
}

/// A skewed working set ("a" hot, "b"/"c" warm) polluted by one-shot keys,
/// repeated 100 times.
fn scan_polluted_trace() -> Vec<&'static str> {
    let mut cycle: Vec<&'static str> = vec!["a"; 10];
    for _ in 0..3 {
        cycle.extend_from_slice(&["b", "c"]);
    }
    cycle.extend_from_slice(&["c", "d", "e", "f"]);

    let mut trace = Vec::with_capacity(cycle.len() * 100);
    for _ in 0..100 {
        trace.extend_from_slice(&cycle);
    }
    trace
}

/// Two heavy stable keys, a warm "b"/"c" pair, and a churn tail, repeated
/// 300 times. No single discipline covers all three layers.
fn layered_mix_trace() -> Vec<&'static str> {
    let mut cycle: Vec<&'static str> = vec!["z"; 20];
    cycle.extend_from_slice(&["a"; 10]);
    for _ in 0..3 {
        cycle.extend_from_slice(&["b", "c"]);
    }
    cycle.extend_from_slice(&["c", "d", "e", "f"]);

    let mut trace = Vec::with_capacity(cycle.len() * 300);
    for _ in 0..300 {
        trace.extend_from_slice(&cycle);
    }
    trace
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn zero_budget_is_rejected_everywhere() {
    assert!(matches!(
        LfuPolicy::<u64>::new(0),
        Err(PolicyError::ZeroBudget)
    ));
    assert!(matches!(
        LruPolicy::<u64>::new(0),
        Err(PolicyError::ZeroBudget)
    ));
    assert!(matches!(
        HybridBuilder::new(0).build::<u64>(),
        Err(PolicyError::ZeroBudget)
    ));
}

#[test]
fn non_finite_learning_rate_is_rejected() {
    assert!(matches!(
        HybridBuilder::new(8).learning_rate(f64::NAN).build::<u64>(),
        Err(PolicyError::InvalidLearningRate(_))
    ));
}

// ---------------------------------------------------------------------------
// Accounting
// ---------------------------------------------------------------------------

#[test]
fn hit_rate_is_zero_before_any_access() {
    let lfu: LfuPolicy<u64> = LfuPolicy::new(8).unwrap();
    let lru: LruPolicy<u64> = LruPolicy::new(8).unwrap();
    let hybrid: HybridPolicy<u64> = HybridPolicy::new(8).unwrap();
    assert_eq!(lfu.hit_rate(), 0.0);
    assert_eq!(lru.hit_rate(), 0.0);
    assert_eq!(hybrid.hit_rate(), 0.0);
}

#[test]
fn hit_rate_is_a_percentage() {
    let mut policy: LruPolicy<&str> = LruPolicy::new(2).unwrap();
    policy.access("a"); // miss
    policy.access("a"); // hit
    policy.access("a"); // hit
    policy.access("b"); // miss

    let stats = policy.metrics();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.accesses(), 4);
    assert!(
        (stats.hit_rate - 50.0).abs() < 1e-9,
        "hit_rate = {}",
        stats.hit_rate
    );
}

#[test]
fn evictions_are_counted() {
    let mut policy: LruPolicy<u64> = LruPolicy::new(2).unwrap();
    for i in 0..5u64 {
        policy.access(i);
    }
    assert_eq!(policy.metrics().evictions, 3);
}

// ---------------------------------------------------------------------------
// Characteristic traces
// ---------------------------------------------------------------------------

#[test]
fn lfu_and_lru_agree_on_a_basic_trace() {
    let trace = ["a", "b", "a", "c"];
    let mut lfu: LfuPolicy<&str> = LfuPolicy::new(2).unwrap();
    let mut lru: LruPolicy<&str> = LruPolicy::new(2).unwrap();

    let expected = vec![None, None, None, Some("b")];
    let lfu_evictions: Vec<_> = trace.iter().map(|&k| lfu.access(k)).collect();
    let lru_evictions: Vec<_> = trace.iter().map(|&k| lru.access(k)).collect();
    assert_eq!(lfu_evictions, expected);
    assert_eq!(lru_evictions, expected);
}

#[test]
fn stale_burst_traps_lfu_but_not_lru() {
    let trace = stale_burst_trace();
    let mut lfu: LfuPolicy<&str> = LfuPolicy::new(3).unwrap();
    let mut lru: LruPolicy<&str> = LruPolicy::new(3).unwrap();
    for &key in &trace {
        lfu.access(key);
        lru.access(key);
    }
    // The stale "1" pins a frequency slot; the cycling keys then evict each
    // other on every access.
    assert!(lfu.hit_rate() <= 50.0, "lfu hit rate = {}", lfu.hit_rate());
    assert!(lru.hit_rate() >= 95.0, "lru hit rate = {}", lru.hit_rate());
}

#[test]
fn frequency_wins_on_a_scan_polluted_mix() {
    let trace = scan_polluted_trace();
    let mut lfu: LfuPolicy<&str> = LfuPolicy::new(3).unwrap();
    let mut lru: LruPolicy<&str> = LruPolicy::new(3).unwrap();
    for &key in &trace {
        lfu.access(key);
        lru.access(key);
    }
    // One-shot keys never reach the counts of the skewed working set, so
    // LFU sheds them immediately; LRU lets them displace the hot keys.
    assert!(lfu.hit_rate() > 80.0, "lfu hit rate = {}", lfu.hit_rate());
    assert!(lru.hit_rate() < 75.0, "lru hit rate = {}", lru.hit_rate());
    assert!(lfu.hit_rate() > lru.hit_rate());
}

#[test]
fn resident_sets_never_exceed_budget() {
    let budget = 3;
    let mut lfu: LfuPolicy<&str> = LfuPolicy::new(budget).unwrap();
    let mut lru: LruPolicy<&str> = LruPolicy::new(budget).unwrap();
    for &key in &scan_polluted_trace() {
        lfu.access(key);
        lru.access(key);
        assert!(lfu.len() <= budget);
        assert!(lru.len() <= budget);
    }
}

// ---------------------------------------------------------------------------
// Hybrid adaptation
// ---------------------------------------------------------------------------

#[test]
fn hybrid_recovers_when_frequency_goes_stale() {
    let trace = stale_burst_trace();
    let mut lfu: LfuPolicy<&str> = LfuPolicy::new(3).unwrap();
    let mut lru: LruPolicy<&str> = LruPolicy::new(3).unwrap();
    let mut hybrid = make_hybrid(3, Arm::Recency);
    for &key in &trace {
        lfu.access(key);
        lru.access(key);
        hybrid.access(key);
    }
    assert!(
        hybrid.hit_rate() > lfu.hit_rate(),
        "hybrid {} should beat lfu {}",
        hybrid.hit_rate(),
        lfu.hit_rate()
    );
    assert!(
        hybrid.hit_rate() >= lru.hit_rate(),
        "hybrid {} should match lru {}",
        hybrid.hit_rate(),
        lru.hit_rate()
    );
}

#[test]
fn hybrid_beats_recency_on_a_seesaw_pattern() {
    let trace = seesaw_trace();
    let mut lru: LruPolicy<&str> = LruPolicy::new(3).unwrap();
    let mut hybrid = make_hybrid(3, Arm::Recency);
    for &key in &trace {
        lru.access(key);
        hybrid.access(key);
    }
    assert!(lru.hit_rate() < 60.0, "lru hit rate = {}", lru.hit_rate());
    assert!(
        hybrid.hit_rate() > lru.hit_rate(),
        "hybrid {} should beat lru {}",
        hybrid.hit_rate(),
        lru.hit_rate()
    );
}

#[test]
fn hybrid_beats_both_arms_on_a_layered_mix() {
    let trace = layered_mix_trace();
    let mut lfu: LfuPolicy<&str> = LfuPolicy::new(3).unwrap();
    let mut lru: LruPolicy<&str> = LruPolicy::new(3).unwrap();
    let mut hybrid = make_hybrid(3, Arm::Frequency);
    for &key in &trace {
        lfu.access(key);
        lru.access(key);
        hybrid.access(key);
    }
    assert!(lfu.hit_rate() > lru.hit_rate());
    assert!(
        hybrid.hit_rate() > lfu.hit_rate(),
        "hybrid {} should beat lfu {}",
        hybrid.hit_rate(),
        lfu.hit_rate()
    );
    assert!(
        hybrid.hit_rate() > lru.hit_rate(),
        "hybrid {} should beat lru {}",
        hybrid.hit_rate(),
        lru.hit_rate()
    );
}

#[test]
fn hybrid_reports_the_victim_of_the_routed_arm() {
    let mut hybrid = make_hybrid(2, Arm::Recency);
    assert_eq!(hybrid.access("a"), None);
    assert_eq!(hybrid.access("b"), None);
    // Both arms' weights are tied; the fixed breaker routes "c" to the
    // recency arm, which evicts its least recently used key.
    assert_eq!(hybrid.access("c"), Some("a"));
    assert_eq!(hybrid.metrics().evictions, 1);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_seed_replays_identically() {
    let trace: Vec<u64> = (0..400u64).map(|i| (i * 7) % 13).collect();
    let mut first: HybridPolicy<u64> = HybridBuilder::new(4).seed(0xC0FFEE).build().unwrap();
    let mut second: HybridPolicy<u64> = HybridBuilder::new(4).seed(0xC0FFEE).build().unwrap();

    let evictions_a: Vec<_> = trace.iter().map(|&k| first.access(k)).collect();
    let evictions_b: Vec<_> = trace.iter().map(|&k| second.access(k)).collect();

    assert_eq!(evictions_a, evictions_b);
    assert_eq!(first.weights(), second.weights());
    assert_eq!(first.metrics(), second.metrics());
}
