//! Panic-safety tests: element constructors that fail partway through
//! sequence operations must never leak, double-drop, or corrupt state.

use secvec::prelude::*;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

thread_local! {
    /// Number of `Tracked` values currently alive on this thread
    static LIVE: Cell<isize> = const { Cell::new(0) };
    /// Constructions allowed before the next one panics (`None` = unlimited)
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
    /// Number of `Tracked` drops on this thread
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

/// Element type that counts live instances and panics on demand.
#[derive(Debug, PartialEq)]
struct Tracked(u32);

impl Tracked {
    fn new(value: u32) -> Self {
        BUDGET.with(|budget| match budget.get() {
            Some(0) => panic!("construction budget exhausted"),
            Some(n) => budget.set(Some(n - 1)),
            None => {}
        });
        LIVE.with(|live| live.set(live.get() + 1));
        Tracked(value)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(self.0)
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Tracked::new(0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
        DROPS.with(|drops| drops.set(drops.get() + 1));
    }
}

fn live() -> isize {
    LIVE.with(Cell::get)
}

fn drops() -> usize {
    DROPS.with(Cell::get)
}

/// Allows `n` more constructions, then panics on the next one.
fn arm(n: usize) {
    BUDGET.with(|budget| budget.set(Some(n)));
}

fn disarm() {
    BUDGET.with(|budget| budget.set(None));
}

fn tracked(values: &[u32]) -> Sequence<Tracked> {
    let mut seq = Sequence::with_capacity(values.len()).unwrap();
    for &value in values {
        seq.push_back(Tracked::new(value)).unwrap();
    }
    seq
}

fn values(seq: &Sequence<Tracked>) -> Vec<u32> {
    seq.iter().map(|t| t.0).collect()
}

/// Runs `f`, expecting it to panic, and re-enables construction afterwards.
fn expect_panic<F: FnOnce()>(f: F) {
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    disarm();
    assert!(result.is_err(), "operation was expected to panic");
}

#[test]
fn test_emplace_back_panic_during_growth_is_strong() {
    let mut seq = tracked(&[1, 2, 3, 4]);
    assert_eq!(seq.len(), seq.capacity());
    let storage = seq.as_ptr();

    arm(0);
    expect_panic(|| {
        let _ = seq.emplace_back_with(|| Tracked::new(99));
    });

    assert_eq!(values(&seq), vec![1, 2, 3, 4]);
    assert_eq!(seq.capacity(), 4);
    assert_eq!(seq.as_ptr(), storage);
    assert_eq!(live(), 4);

    drop(seq);
    assert_eq!(live(), 0);
}

#[test]
fn test_emplace_back_panic_with_spare_capacity() {
    let mut seq = tracked(&[1, 2]);
    seq.reserve(8).unwrap();

    arm(0);
    expect_panic(|| {
        let _ = seq.emplace_back_with(|| Tracked::new(3));
    });

    assert_eq!(values(&seq), vec![1, 2]);
    assert_eq!(live(), 2);
}

#[test]
fn test_emplace_in_place_panic_leaves_order_intact() {
    let mut seq = tracked(&[1, 2, 3]);
    seq.reserve(6).unwrap();

    arm(0);
    expect_panic(|| {
        let _ = seq.emplace_with(1, || Tracked::new(9));
    });

    assert_eq!(values(&seq), vec![1, 2, 3]);
    assert_eq!(live(), 3);
}

#[test]
fn test_emplace_with_reallocation_panic_is_strong() {
    let mut seq = tracked(&[1, 2, 3]);
    assert_eq!(seq.len(), seq.capacity());

    arm(0);
    expect_panic(|| {
        let _ = seq.emplace_with(1, || Tracked::new(9));
    });

    assert_eq!(values(&seq), vec![1, 2, 3]);
    assert_eq!(seq.capacity(), 3);
    assert_eq!(live(), 3);

    seq.emplace_with(1, || Tracked::new(9)).unwrap();
    assert_eq!(values(&seq), vec![1, 9, 2, 3]);
}

#[test]
fn test_clone_panic_drops_partial_copy() {
    let seq = tracked(&[1, 2, 3, 4, 5]);

    arm(2);
    expect_panic(|| {
        let _ = seq.try_clone();
    });

    assert_eq!(live(), 5);
    assert_eq!(values(&seq), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_with_size_panic_drops_constructed_elements() {
    let drops_before = drops();

    arm(3);
    expect_panic(|| {
        let _ = Sequence::<Tracked>::with_size(6);
    });

    assert_eq!(live(), 0);
    assert_eq!(drops() - drops_before, 3);
}

#[test]
fn test_clone_from_with_reallocation_is_strong() {
    let mut dst = tracked(&[7]);
    let src = tracked(&[1, 2, 3, 4]);

    arm(2);
    expect_panic(|| {
        dst.clone_from(&src);
    });

    assert_eq!(values(&dst), vec![7]);
    assert_eq!(dst.capacity(), 1);
    assert_eq!(live(), 5);
}

#[test]
fn test_clone_from_in_place_keeps_constructed_prefix() {
    let mut dst = tracked(&[7]);
    dst.reserve(8).unwrap();
    let src = tracked(&[1, 2, 3, 4]);

    // One construction for the overlapping slot, one extra, then a panic.
    arm(2);
    expect_panic(|| {
        dst.clone_from(&src);
    });

    assert_eq!(values(&dst), vec![1, 2]);
    assert_eq!(live(), 4 + 2);

    drop(dst);
    drop(src);
    assert_eq!(live(), 0);
}

#[test]
fn test_resize_past_capacity_panic_is_strong() {
    let mut seq = tracked(&[1, 2]);

    arm(3);
    expect_panic(|| {
        let _ = seq.resize(10);
    });

    assert_eq!(values(&seq), vec![1, 2]);
    assert_eq!(seq.capacity(), 2);
    assert_eq!(live(), 2);
}

#[test]
fn test_resize_in_place_panic_keeps_built_elements() {
    let mut seq = tracked(&[1]);
    seq.reserve(10).unwrap();

    arm(3);
    expect_panic(|| {
        let _ = seq.resize(10);
    });

    assert_eq!(values(&seq), vec![1, 0, 0, 0]);
    assert_eq!(live(), 4);
}

#[test]
fn test_erase_drops_exactly_once() {
    let mut seq = tracked(&[1, 2, 3, 4]);
    let drops_before = drops();

    seq.erase(1).unwrap();
    seq.erase(2).unwrap();
    assert_eq!(drops() - drops_before, 2);
    assert_eq!(values(&seq), vec![1, 3]);

    drop(seq);
    assert_eq!(drops() - drops_before, 4);
    assert_eq!(live(), 0);
}

/// Element whose `Drop` panics when `armed` is set.
struct PanicOnDrop {
    armed: bool,
}

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        DROPS.with(|drops| drops.set(drops.get() + 1));
        if self.armed {
            panic!("drop failed");
        }
    }
}

#[test]
fn test_panicking_drop_during_erase_never_double_drops() {
    let mut seq: Sequence<PanicOnDrop> = Sequence::new();
    for armed in [false, true, false] {
        seq.push_back(PanicOnDrop { armed }).unwrap();
    }
    let drops_before = drops();

    expect_panic(|| {
        let _ = seq.erase(1);
    });

    assert_eq!(seq.len(), 2);
    assert!(seq.iter().all(|e| !e.armed));
    drop(seq);
    assert_eq!(drops() - drops_before, 3);
}

#[test]
fn test_no_leaks_across_mixed_operations() {
    {
        let mut seq: Sequence<Tracked> = Sequence::new();
        for i in 0..20 {
            seq.push_back(Tracked::new(i)).unwrap();
        }
        seq.insert(5, Tracked::new(100)).unwrap();
        seq.erase(0).unwrap();
        seq.resize(30).unwrap();
        seq.truncate(10);
        let copy = seq.clone();
        let mut other = tracked(&[1, 2, 3]);
        other.clone_from(&copy);
        assert_eq!(other, copy);
        let _ = other.pop_back();
        seq.shrink_to_fit().unwrap();
        let _taken: Vec<Tracked> = seq.into_iter().collect();
    }
    assert_eq!(live(), 0);
}
