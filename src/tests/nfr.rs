//! Non-functional requirement tests: store copies and asymptotic cost.
//!
//! These tests verify quantitative properties of the collections:
//! - exactly one store copy per real write, none per no-op write
//! - exactly one store copy per batch, whatever its length
//! - no copy at all when a sole owner applies a batch
//! - O(1) get, O(n + plan) batches

use std::hint::black_box;
use std::time::Instant;

use crate::store::copies;
use crate::{BatchPlan, IMap, ISet};

/// Measures wall-clock time of a closure in nanoseconds.
fn measure_ns<F: FnMut()>(mut f: F) -> u64 {
    let start = Instant::now();
    f();
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

/// Runs `f` multiple times and returns median time in nanoseconds.
fn median_ns<F: FnMut()>(iterations: u32, mut f: F) -> u64 {
    let mut times: Vec<u64> = (0..iterations).map(|_| measure_ns(&mut f)).collect();
    times.sort_unstable();
    times[times.len() / 2]
}

fn build_map(n: u64) -> IMap<u64, u64> {
    (0..n).map(|i| (i, i)).collect()
}

// =============================================================================
// Copies
// =============================================================================

#[test]
fn construction_copies_nothing() {
    let (map, n) = copies::during(|| build_map(1_000));
    assert_eq!(n, 0);
    assert_eq!(map.len(), 1_000);
}

#[test]
fn single_write_copies_once() {
    let map = build_map(100);
    assert_eq!(copies::during(|| map.insert(500, 1)).1, 1);
    assert_eq!(copies::during(|| map.insert(5, 1)).1, 1);
    assert_eq!(copies::during(|| map.remove(&5)).1, 1);
    assert_eq!(copies::during(|| map.update(&5, |v| v + 1)).1, 1);
}

#[test]
fn noop_write_copies_nothing() {
    let map = build_map(100);
    assert_eq!(copies::during(|| map.insert_if_changed(5, 5)).1, 0);
    assert_eq!(copies::during(|| map.remove(&500)).1, 0);
    assert_eq!(copies::during(|| map.update(&500, |v| v + 1)).1, 0);
}

#[test]
fn batch_copies_once_regardless_of_length() {
    let map = build_map(1_000);
    for len in [1_u64, 10, 1_000, 5_000] {
        let plan = (0..len).fold(BatchPlan::new(), |plan, i| {
            plan.set(i + 2_000, i).update(i, |v| v * 2).delete(i + 1)
        });
        let (out, n) = copies::during(|| map.apply_batch(plan));
        assert_eq!(n, 1, "plan of {len} steps copied {n} times");
        black_box(out);
    }
}

#[test]
fn empty_batch_copies_nothing() {
    let map = build_map(10);
    assert_eq!(copies::during(|| map.apply_batch(BatchPlan::new())).1, 0);
}

#[test]
fn sole_owner_batch_copies_nothing() {
    let map = build_map(100);
    let plan = BatchPlan::new().set(1_000, 1).delete(0);
    let (out, n) = copies::during(|| map.into_batch(plan));
    assert_eq!(n, 0);
    assert_eq!(out.len(), 100);
}

#[test]
fn shared_owner_batch_copies_once() {
    let map = build_map(100);
    let keep = map.clone();
    let plan = BatchPlan::new().set(1_000, 1).delete(0);
    let (out, n) = copies::during(|| map.into_batch(plan));
    assert_eq!(n, 1);
    assert_eq!(out.len(), 100);
    assert!(keep.contains_key(&0));
}

#[test]
fn unconditional_insert_copies_once() {
    let map = build_map(100);
    assert_eq!(copies::during(|| map.insert(5, 5)).1, 1);
}

#[test]
fn sole_owner_extended_copies_nothing() {
    let map = build_map(100);
    let (out, n) = copies::during(|| map.extended((100..200).map(|i| (i, i))));
    assert_eq!(n, 0);
    assert_eq!(out.len(), 200);
}

#[test]
fn shared_extended_copies_once() {
    let map = build_map(100);
    let (out, n) = copies::during(|| map.clone().extended((100..200).map(|i| (i, i))));
    assert_eq!(n, 1);
    assert_eq!(out.len(), 200);
    assert_eq!(map.len(), 100);
    assert_eq!(copies::during(|| map.clone().extended([])).1, 0);
}

#[test]
fn set_algebra_copy_counts() {
    let a: ISet<u64> = (0..1_000).collect();
    let b: ISet<u64> = (500..600).collect();
    assert_eq!(copies::during(|| a.union(&b)).1, 1);
    assert_eq!(copies::during(|| b.union(&a)).1, 1);
    assert_eq!(copies::during(|| a.intersection(&b)).1, 0);
    assert_eq!(copies::during(|| a.diff(&b)).1, 0);
}

// =============================================================================
// Asymptotic cost
// =============================================================================

/// get time does not grow with map size.
///
/// 100x more entries should keep lookups within a constant factor; the
/// bound leaves headroom for cache effects and CI noise.
#[test]
fn get_constant_time() {
    let small = build_map(1_000);
    let large = build_map(100_000);

    let t_small = median_ns(5, || {
        for i in 0_u64..1_000 {
            black_box(small.get(&i));
        }
    });
    let t_large = median_ns(5, || {
        for i in 0_u64..1_000 {
            black_box(large.get(&i));
        }
    });

    #[allow(clippy::cast_precision_loss)]
    let ratio = t_large as f64 / t_small.max(1) as f64;
    assert!(
        ratio < 10.0,
        "get ratio {ratio:.2}x exceeds 10x bound (small={t_small}ns, large={t_large}ns)"
    );
}

/// A batch of N writes costs O(N + n), far below N single writes at O(N · n).
#[test]
fn batch_beats_single_writes() {
    let map = build_map(10_000);

    let t_single = median_ns(3, || {
        let mut m = map.clone();
        for i in 0_u64..300 {
            m = m.insert(i + 20_000, i);
        }
        black_box(m);
    });
    let t_batch = median_ns(3, || {
        let plan = (0_u64..300).fold(BatchPlan::new(), |plan, i| plan.set(i + 20_000, i));
        black_box(map.apply_batch(plan));
    });

    assert!(
        t_batch * 10 < t_single,
        "batch {t_batch}ns not clearly below single writes {t_single}ns"
    );
}
