//! Sort stage: order intervals by start position.
//!
//! Three interchangeable strategies:
//! - `Standard`: unstable comparison sort, O(n log n). Switches to a rayon
//!   parallel sort for large inputs.
//! - `Quick`: in-place Lomuto quicksort with the last element as pivot.
//!   O(n log n) average, O(n^2) worst case, no auxiliary allocation.
//! - `Basic`: quadratic exchange sort. Slow baseline for benchmarks only.
//!
//! Only `start` is compared. Ties between equal starts are left in whatever
//! order the strategy produces; the sweep does not depend on it.

use crate::interval::Interval;
use rayon::prelude::*;
use std::fmt;

/// Minimum number of intervals before the standard strategy parallelizes.
/// Below this threshold, sequential sorting is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Sorting strategy used before the merge sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortStrategy {
    /// General-purpose comparison sort (default)
    #[default]
    Standard,
    /// Partition-based in-place quicksort
    Quick,
    /// Quadratic exchange sort (reference baseline)
    Basic,
}

impl SortStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [SortStrategy; 3] = [Self::Standard, Self::Quick, Self::Basic];

    /// Parse strategy from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(Self::Standard),
            "quick" | "quicksort" => Some(Self::Quick),
            "basic" | "exchange" => Some(Self::Basic),
            _ => None,
        }
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Quick => "quick",
            Self::Basic => "basic",
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort intervals in place by start using the given strategy.
pub fn sort_by_start(intervals: &mut [Interval], strategy: SortStrategy) {
    if intervals.len() < 2 {
        return;
    }
    match strategy {
        SortStrategy::Standard => standard_sort(intervals),
        SortStrategy::Quick => quick_sort(intervals),
        SortStrategy::Basic => basic_sort(intervals),
    }
}

/// Comparison sort by start, parallel above [`PARALLEL_THRESHOLD`].
pub fn standard_sort(intervals: &mut [Interval]) {
    if intervals.len() >= PARALLEL_THRESHOLD {
        intervals.par_sort_unstable_by_key(|iv| iv.start);
    } else {
        intervals.sort_unstable_by_key(|iv| iv.start);
    }
}

/// In-place quicksort by start.
///
/// Partitions around the last element of the current range. Recurses into
/// the smaller partition and loops on the larger one, so stack depth stays
/// logarithmic even on already-sorted input.
pub fn quick_sort(intervals: &mut [Interval]) {
    let mut vals = intervals;
    while vals.len() > 1 {
        let split = partition(vals);
        let (left, rest) = std::mem::take(&mut vals).split_at_mut(split);
        // rest[0] is the pivot, already in its final position
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort(left);
            vals = right;
        } else {
            quick_sort(right);
            vals = left;
        }
    }
}

/// Lomuto partition. Returns the pivot's final index.
#[inline]
fn partition(vals: &mut [Interval]) -> usize {
    let last = vals.len() - 1;
    let pivot = vals[last].start;
    let mut split = 0;
    for i in 0..last {
        if vals[i].start < pivot {
            vals.swap(split, i);
            split += 1;
        }
    }
    vals.swap(split, last);
    split
}

/// Quadratic exchange sort by start.
///
/// Repeats full nested-loop exchange runs until a run makes no swap.
/// Kept as a slow, allocation-free baseline for benchmarking.
pub fn basic_sort(intervals: &mut [Interval]) {
    while exchange_run(intervals) {}
}

fn exchange_run(vals: &mut [Interval]) -> bool {
    let len = vals.len();
    let mut switched = false;
    for i in 0..len {
        for j in i..len {
            if vals[j].start < vals[i].start {
                vals.swap(i, j);
                switched = true;
            }
        }
    }
    switched
}

/// Check that intervals are ordered by non-decreasing start.
pub fn is_sorted_by_start(intervals: &[Interval]) -> bool {
    intervals.windows(2).all(|w| w[0].start <= w[1].start)
}

/// Statistics from a sort run.
#[derive(Debug, Default, Clone)]
pub struct SortStats {
    /// Number of intervals sorted
    pub intervals: usize,
    /// Strategy used
    pub strategy: SortStrategy,
    /// Wall time spent sorting
    pub elapsed: std::time::Duration,
}

impl fmt::Display for SortStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sorted: {}, Strategy: {}, Time: {:.3}ms",
            self.intervals,
            self.strategy,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}
