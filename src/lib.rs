//! interval-union: union of closed integer intervals.
//!
//! Given an unordered collection of `[start, end]` ranges, produce the
//! minimal sorted set of non-overlapping intervals covering the same
//! points, or report the first malformed (`end < start`) input.
//!
//! # Variants
//!
//! - [`merge`]: sort then sweep into a new vector; may reorder its input
//! - [`merge_pure`]: same, on a copy; the input is never touched
//! - [`merge_in_place`]: sweep into the prefix of the caller's buffer
//! - [`streaming::merge_stream`]: channel task over pre-sorted input
//!
//! The sort stage is pluggable through [`sort::SortStrategy`].
//!
//! # Example
//!
//! ```rust
//! use interval_union::{merge, Interval};
//!
//! let mut intervals = vec![
//!     Interval::new(-3, 29),
//!     Interval::new(-22, -1),
//!     Interval::new(-5, 33),
//!     Interval::new(-20, -10),
//! ];
//! let merged = merge(&mut intervals).unwrap();
//! assert_eq!(merged, vec![Interval::new(-22, 33)]);
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod interval;
pub mod merge;
pub mod sort;
pub mod streaming;
pub mod text;

// Re-export commonly used types
pub use error::{InputError, InvalidInterval};
pub use interval::Interval;
pub use merge::{merge, merge_in_place, merge_pure, MergeStats, Merger};
pub use sort::SortStrategy;
pub use streaming::{merge_sorted, merge_stream, spawn_merge_stream};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{InputError, InvalidInterval};
    pub use crate::interval::Interval;
    pub use crate::merge::{merge, merge_in_place, merge_pure, Merger};
    pub use crate::sort::SortStrategy;
    pub use crate::streaming::{merge_sorted, merge_stream, rendezvous, spawn_merge_stream};
    pub use crate::text::{parse_intervals, read_intervals, IntervalReader, IntervalWriter};
}
