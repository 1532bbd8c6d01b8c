//! Sort validation for the streaming merge.
//!
//! The streaming merge trusts its input. This module lets a producer check
//! the precondition as records go by:
//! 1. Every interval is valid (`start <= end`)
//! 2. Starts are non-decreasing

use crate::error::{InputError, InvalidInterval};
use crate::interval::Interval;
use crate::text::IntervalReader;
use std::path::Path;

/// Inline sort validator for use within streaming loops.
///
/// Avoids reading the input twice by validating order as records are
/// produced.
#[derive(Debug, Default)]
pub struct SortValidator {
    prev_start: Option<i64>,
    record_count: usize,
}

impl SortValidator {
    /// Create a new sort validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that the given interval is well-formed and keeps sort order.
    #[inline]
    pub fn validate(&mut self, interval: &Interval) -> Result<(), InputError> {
        self.record_count += 1;

        if !interval.is_valid() {
            return Err(InvalidInterval::new(interval.start, interval.end).into());
        }

        if let Some(previous) = self.prev_start {
            if interval.start < previous {
                return Err(InputError::Unsorted {
                    record: self.record_count,
                    start: interval.start,
                    previous,
                });
            }
        }

        self.prev_start = Some(interval.start);
        Ok(())
    }

    /// Reset validator state for a new stream.
    pub fn reset(&mut self) {
        self.prev_start = None;
        self.record_count = 0;
    }

    /// Get the number of records validated.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}

/// Verify that a slice satisfies the streaming precondition.
pub fn verify_sorted(intervals: &[Interval]) -> Result<(), InputError> {
    let mut validator = SortValidator::new();
    intervals
        .iter()
        .try_for_each(|interval| validator.validate(interval))
}

/// Verify that an interval file satisfies the streaming precondition.
///
/// # Example
///
/// ```rust,no_run
/// use interval_union::streaming::validation::verify_sorted_file;
///
/// verify_sorted_file("input.txt").expect("File must be sorted");
/// ```
pub fn verify_sorted_file<P: AsRef<Path>>(path: P) -> Result<(), InputError> {
    let reader = IntervalReader::from_path(path)?;
    let mut validator = SortValidator::new();

    for result in reader.intervals() {
        validator.validate(&result?)?;
    }

    Ok(())
}
