//! Global configuration for interval-union runtime behavior.
//!
//! Process-wide settings read by the merge entry points that take no
//! explicit strategy. Set once at startup; reads are a single atomic load.

use crate::sort::SortStrategy;
use std::sync::atomic::{AtomicU8, Ordering};

/// Default sort strategy, stored as its discriminant.
static DEFAULT_SORT_STRATEGY: AtomicU8 = AtomicU8::new(encode(SortStrategy::Standard));

const fn encode(strategy: SortStrategy) -> u8 {
    match strategy {
        SortStrategy::Standard => 0,
        SortStrategy::Quick => 1,
        SortStrategy::Basic => 2,
    }
}

const fn decode(value: u8) -> SortStrategy {
    match value {
        1 => SortStrategy::Quick,
        2 => SortStrategy::Basic,
        _ => SortStrategy::Standard,
    }
}

/// Set the sort strategy used by [`crate::merge::merge`] and friends.
///
/// # Example
///
/// ```
/// use interval_union::config;
/// use interval_union::sort::SortStrategy;
///
/// config::set_default_sort_strategy(SortStrategy::Quick);
/// assert_eq!(config::default_sort_strategy(), SortStrategy::Quick);
/// config::set_default_sort_strategy(SortStrategy::Standard);
/// ```
#[inline]
pub fn set_default_sort_strategy(strategy: SortStrategy) {
    DEFAULT_SORT_STRATEGY.store(encode(strategy), Ordering::Release);
}

/// The currently configured default sort strategy.
#[inline]
pub fn default_sort_strategy() -> SortStrategy {
    decode(DEFAULT_SORT_STRATEGY.load(Ordering::Acquire))
}
