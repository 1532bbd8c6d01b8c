//! Streaming merge over intervals already sorted by start.
//!
//! Two forms share one sweep:
//! - [`MergeSorted`], a pull-based iterator adapter with O(1) state
//! - [`merge_stream`], a channel task that pulls from one rendezvous
//!   channel and pushes merged spans into another
//!
//! # Requirements
//!
//! Input MUST be sorted by start and every interval MUST be valid.
//! Neither is checked here. Unsorted or malformed input produces
//! unspecified output rather than an error. Callers that cannot
//! guarantee the precondition validate upstream with
//! [`validation::SortValidator`].
//!
//! # Backpressure
//!
//! With zero-capacity channels on both sides, the merge task blocks on
//! `recv` while the producer is idle and on `send` until the consumer takes
//! the previous span. A slow consumer therefore stalls the task, which
//! stalls the producer; nothing is buffered beyond the single accumulator.

pub mod validation;

pub use validation::{verify_sorted, SortValidator};

use crate::interval::Interval;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::iter::{Fuse, FusedIterator};
use std::thread::{self, JoinHandle};

/// Create an unbuffered handoff channel for intervals.
///
/// A `send` completes only once a receiver has taken the value.
pub fn rendezvous() -> (Sender<Interval>, Receiver<Interval>) {
    bounded(0)
}

/// Iterator adapter merging a start-sorted sequence on the fly.
pub struct MergeSorted<I: Iterator<Item = Interval>> {
    iter: Fuse<I>,
    pending: Option<Interval>,
}

impl<I: Iterator<Item = Interval>> MergeSorted<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
            pending: None,
        }
    }
}

impl<I: Iterator<Item = Interval>> Iterator for MergeSorted<I> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        // The first interval pulled seeds the accumulator
        let mut current = match self.pending.take() {
            Some(iv) => iv,
            None => self.iter.next()?,
        };

        for interval in self.iter.by_ref() {
            if current.absorbs(&interval) {
                current.end = current.end.max(interval.end);
            } else {
                self.pending = Some(interval);
                return Some(current);
            }
        }

        Some(current)
    }
}

impl<I: Iterator<Item = Interval>> FusedIterator for MergeSorted<I> {}

/// Merge a start-sorted iterator of valid intervals.
///
/// ```
/// use interval_union::{streaming::merge_sorted, Interval};
///
/// let sorted = vec![Interval::new(-20, -1), Interval::new(-1, 1), Interval::new(1, 15)];
/// let merged: Vec<_> = merge_sorted(sorted).collect();
/// assert_eq!(merged, vec![Interval::new(-20, 15)]);
/// ```
pub fn merge_sorted<I>(intervals: I) -> MergeSorted<I::IntoIter>
where
    I: IntoIterator<Item = Interval>,
{
    MergeSorted::new(intervals.into_iter())
}

/// Run the streaming merge until `input` is closed and drained.
///
/// Each merged span is pushed to `output` as soon as the next input proves
/// it complete; the last span is pushed when `input` disconnects. Returning
/// drops `output`, which signals end-of-stream downstream. If the
/// downstream receiver goes away first, the task stops and drops `input`,
/// so a blocked producer sees the disconnect too.
pub fn merge_stream(input: Receiver<Interval>, output: Sender<Interval>) {
    for merged in merge_sorted(input.iter()) {
        if output.send(merged).is_err() {
            return;
        }
    }
}

/// A streaming merge task running on its own thread.
pub struct MergeStreamHandle {
    output: Receiver<Interval>,
    thread: JoinHandle<()>,
}

impl MergeStreamHandle {
    /// Receiving end of the merged stream.
    pub fn output(&self) -> &Receiver<Interval> {
        &self.output
    }

    /// Split into the output receiver and the thread handle.
    pub fn into_parts(self) -> (Receiver<Interval>, JoinHandle<()>) {
        (self.output, self.thread)
    }

    /// Drain all merged intervals, then wait for the task to finish.
    pub fn collect(self) -> thread::Result<Vec<Interval>> {
        let merged: Vec<Interval> = self.output.iter().collect();
        self.thread.join()?;
        Ok(merged)
    }
}

/// Spawn [`merge_stream`] on a named thread with a rendezvous output.
pub fn spawn_merge_stream(input: Receiver<Interval>) -> io::Result<MergeStreamHandle> {
    let (tx, rx) = rendezvous();
    let thread = thread::Builder::new()
        .name("merge-stream".to_string())
        .spawn(move || merge_stream(input, tx))?;

    Ok(MergeStreamHandle { output: rx, thread })
}
