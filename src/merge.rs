//! Merge implementation.
//!
//! Uses a sort by start followed by an O(n) single-pass sweep:
//! 1. Validate every interval (`start <= end`), failing on the first bad one
//! 2. Sort by start with the configured [`SortStrategy`]
//! 3. Sweep left to right, extending the current span while the next
//!    interval starts at or before its end, emitting it otherwise
//!
//! Validation runs before sorting, so a failed call leaves the caller's
//! buffer in its original order.

use crate::config;
use crate::error::InvalidInterval;
use crate::interval::Interval;
use crate::sort::{sort_by_start, SortStrategy};
use std::fmt;

/// Merge configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merger {
    /// Strategy used to order intervals before the sweep
    pub sort: SortStrategy,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}

impl Merger {
    /// Create a merger using the globally configured sort strategy.
    pub fn new() -> Self {
        Self {
            sort: config::default_sort_strategy(),
        }
    }

    /// Set the sort strategy.
    pub fn with_sort(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    /// Merge intervals into a new vector.
    ///
    /// Reorders `intervals` as a side effect. Use [`Merger::merge_pure`] if
    /// the caller's slice must stay untouched.
    pub fn merge(&self, intervals: &mut [Interval]) -> Result<Vec<Interval>, InvalidInterval> {
        validate_all(intervals)?;
        if intervals.is_empty() {
            return Ok(Vec::new());
        }

        sort_by_start(intervals, self.sort);
        Ok(merge_sorted_slice(intervals))
    }

    /// Merge a copy of `intervals`, leaving the original untouched.
    pub fn merge_pure(&self, intervals: &[Interval]) -> Result<Vec<Interval>, InvalidInterval> {
        let mut copy = intervals.to_vec();
        self.merge(&mut copy)
    }

    /// Merge into the prefix of `intervals`, returning the merged prefix.
    ///
    /// Elements past the returned prefix are left in an unspecified state.
    /// With [`SortStrategy::Quick`] or [`SortStrategy::Basic`] no heap
    /// allocation takes place.
    pub fn merge_in_place<'a>(
        &self,
        intervals: &'a mut [Interval],
    ) -> Result<&'a mut [Interval], InvalidInterval> {
        validate_all(intervals)?;
        if intervals.is_empty() {
            return Ok(intervals);
        }

        sort_by_start(intervals, self.sort);
        let len = compact_sorted(intervals);
        Ok(&mut intervals[..len])
    }

    /// Merge a vector in place and truncate it to the merged length.
    pub fn merge_in_place_vec(&self, intervals: &mut Vec<Interval>) -> Result<(), InvalidInterval> {
        let len = self.merge_in_place(intervals)?.len();
        intervals.truncate(len);
        Ok(())
    }
}

/// Merge intervals using the configured default strategy.
///
/// ```
/// use interval_union::{merge, Interval};
///
/// let mut input = vec![Interval::new(234, 5234), Interval::new(-22, -1), Interval::new(-5, 3)];
/// let merged = merge(&mut input).unwrap();
/// assert_eq!(merged, vec![Interval::new(-22, 3), Interval::new(234, 5234)]);
/// ```
pub fn merge(intervals: &mut [Interval]) -> Result<Vec<Interval>, InvalidInterval> {
    Merger::new().merge(intervals)
}

/// Merge a copy of the intervals; the input slice is never modified.
pub fn merge_pure(intervals: &[Interval]) -> Result<Vec<Interval>, InvalidInterval> {
    Merger::new().merge_pure(intervals)
}

/// Merge into the prefix of the given buffer.
pub fn merge_in_place(intervals: &mut [Interval]) -> Result<&mut [Interval], InvalidInterval> {
    Merger::new().merge_in_place(intervals)
}

/// Fail on the first interval with `end < start`, in input order.
#[inline]
fn validate_all(intervals: &[Interval]) -> Result<(), InvalidInterval> {
    match intervals.iter().find(|iv| !iv.is_valid()) {
        Some(bad) => Err(InvalidInterval::new(bad.start, bad.end)),
        None => Ok(()),
    }
}

/// Sweep over intervals already sorted by start. Input must be non-empty.
fn merge_sorted_slice(intervals: &[Interval]) -> Vec<Interval> {
    let mut result = Vec::new();
    let mut current = intervals[0];

    for interval in &intervals[1..] {
        if current.absorbs(interval) {
            current.end = current.end.max(interval.end);
        } else {
            result.push(current);
            current = *interval;
        }
    }

    result.push(current);
    result
}

/// Sweep with a write cursor. Returns the length of the merged prefix.
/// Input must be non-empty and sorted by start.
fn compact_sorted(intervals: &mut [Interval]) -> usize {
    let mut write = 0;

    for read in 1..intervals.len() {
        let next = intervals[read];
        if intervals[write].absorbs(&next) {
            intervals[write].end = intervals[write].end.max(next.end);
        } else {
            write += 1;
            intervals[write] = next;
        }
    }

    write + 1
}

/// Statistics from a merge run.
#[derive(Debug, Default, Clone)]
pub struct MergeStats {
    /// Number of intervals read
    pub intervals_read: usize,
    /// Number of merged intervals written
    pub intervals_written: usize,
}

impl MergeStats {
    /// Compression ratio (how many input intervals per output interval)
    pub fn compression_ratio(&self) -> f64 {
        if self.intervals_written == 0 {
            0.0
        } else {
            self.intervals_read as f64 / self.intervals_written as f64
        }
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Read: {}, Written: {}, Compression: {:.2}x",
            self.intervals_read,
            self.intervals_written,
            self.compression_ratio()
        )
    }
}
