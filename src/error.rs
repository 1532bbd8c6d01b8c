//! Error types.
//!
//! Merge operations have exactly one failure mode, [`InvalidInterval`].
//! Reading and validating interval streams adds I/O and format failures on
//! top, collected in [`InputError`].

use std::io;
use thiserror::Error;

/// An interval whose end lies before its start.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("invalid interval [{start}, {end}]: end is before start")]
pub struct InvalidInterval {
    pub start: i64,
    pub end: i64,
}

impl InvalidInterval {
    #[inline]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }
}

/// Errors that can occur while reading or validating interval input.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Invalid(#[from] InvalidInterval),

    #[error("Input not sorted: start {start} at record {record} comes after {previous}")]
    Unsorted {
        record: usize,
        start: i64,
        previous: i64,
    },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("{0} thread panicked")]
    ThreadPanic(&'static str),
}
