//! Core interval type for closed integer ranges.

use crate::error::InvalidInterval;
use std::cmp::Ordering;
use std::fmt;

/// A closed integer interval. Both `start` and `end` are included.
///
/// An interval is valid when `start <= end`. Construction does not enforce
/// this; validity is checked by the merge operations so that malformed
/// records surface as [`InvalidInterval`] errors instead of being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Create a new interval.
    #[inline]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns true if `start <= end`.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Return the interval unchanged if valid, or the matching error.
    #[inline]
    pub fn validate(self) -> Result<Self, InvalidInterval> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(InvalidInterval::new(self.start, self.end))
        }
    }

    /// Number of integer points covered. Zero for invalid intervals.
    /// Saturates at `u64::MAX` for the full `i64` range.
    #[inline]
    pub fn len(&self) -> u64 {
        if self.is_valid() {
            self.end.abs_diff(self.start).saturating_add(1)
        } else {
            0
        }
    }

    /// Returns true if the interval covers no points (i.e. it is invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// Check whether `point` lies within the interval.
    #[inline]
    pub fn contains(&self, point: i64) -> bool {
        self.start <= point && point <= self.end
    }

    /// Check if this interval overlaps with another.
    /// Closed bounds: sharing a single endpoint counts as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Sweep test: can `next`, which starts at or after `self.start`,
    /// be folded into `self`?
    #[inline]
    pub fn absorbs(&self, next: &Interval) -> bool {
        next.start <= self.end
    }

    /// Smallest interval covering both.
    #[inline]
    pub fn merge(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<(i64, i64)> for Interval {
    #[inline]
    fn from((start, end): (i64, i64)) -> Self {
        Self::new(start, end)
    }
}

impl From<Interval> for (i64, i64) {
    #[inline]
    fn from(iv: Interval) -> Self {
        (iv.start, iv.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then(self.end.cmp(&other.end))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_validity() {
        assert!(Interval::new(-22, -1).is_valid());
        assert!(Interval::new(5, 5).is_valid());
        assert!(!Interval::new(-22, -23).is_valid());

        let err = Interval::new(-22, -23).validate().unwrap_err();
        assert_eq!(err, InvalidInterval::new(-22, -23));
    }

    #[test]
    fn test_interval_len() {
        assert_eq!(Interval::new(0, 3).len(), 4);
        assert_eq!(Interval::new(7, 7).len(), 1);
        assert_eq!(Interval::new(3, 0).len(), 0);
        assert!(Interval::new(3, 0).is_empty());
        // Full i64 range does not overflow
        assert_eq!(Interval::new(i64::MIN, -1).len(), 1u64 << 63);
    }

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(-1, 1);
        let b = Interval::new(1, 15);
        let c = Interval::new(2, 15);

        assert!(a.overlaps(&b)); // Touching endpoints
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // Gap of one missing point
        assert!(a.absorbs(&b));
        assert!(!a.absorbs(&c));
    }

    #[test]
    fn test_interval_contains() {
        let a = Interval::new(-5, 3);
        assert!(a.contains(-5));
        assert!(a.contains(3));
        assert!(!a.contains(4));
    }

    #[test]
    fn test_interval_merge() {
        let a = Interval::new(-22, -1);
        let b = Interval::new(-5, 3);

        assert_eq!(a.merge(&b), Interval::new(-22, 3));
        assert_eq!(b.merge(&a), Interval::new(-22, 3));
    }

    #[test]
    fn test_interval_ordering() {
        let mut intervals = [
            Interval::new(234, 5234),
            Interval::new(-22, -1),
            Interval::new(-22, -5),
        ];
        intervals.sort();

        assert_eq!(intervals[0], Interval::new(-22, -5));
        assert_eq!(intervals[1], Interval::new(-22, -1));
        assert_eq!(intervals[2], Interval::new(234, 5234));
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(Interval::new(-20, 15).to_string(), "[-20, 15]");
        assert_eq!(Interval::from((1, 2)), Interval::new(1, 2));
    }
}
