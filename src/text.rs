//! Line-oriented interval text format.
//!
//! One interval per line: `start` and `end` separated by a tab, space or
//! comma. Further fields are ignored. Blank lines and lines starting with
//! `#` are skipped.
//!
//! ```text
//! # start  end
//! -22	-1
//! 234	5234
//! ```
//!
//! The reader does not check `start <= end`. Malformed bounds are passed
//! through so that the merge reports them as [`InvalidInterval`] errors.
//!
//! [`InvalidInterval`]: crate::error::InvalidInterval

use crate::error::InputError;
use crate::interval::Interval;
use memchr::memchr3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

pub type Result<T> = std::result::Result<T, InputError>;

/// Output buffer size (256KB).
const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// A streaming interval reader.
pub struct IntervalReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl IntervalReader<File> {
    /// Open an interval file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> IntervalReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 64 * 1024)
    }

    /// Create a reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: String::with_capacity(128),
        }
    }

    /// Read the next interval.
    pub fn read_interval(&mut self) -> Result<Option<Interval>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return self.parse_line(line).map(Some);
        }
    }

    /// Parse a single line.
    fn parse_line(&self, line: &str) -> Result<Interval> {
        let (start_field, rest) = split_field(line);
        let (end_field, _) = split_field(rest);

        if end_field.is_empty() {
            return Err(InputError::Parse {
                line: self.line_number,
                message: "Expected at least 2 fields, got 1".to_string(),
            });
        }

        let start = self.parse_bound(start_field, "start")?;
        let end = self.parse_bound(end_field, "end")?;
        Ok(Interval::new(start, end))
    }

    fn parse_bound(&self, s: &str, field_name: &str) -> Result<i64> {
        s.parse().map_err(|_| InputError::Parse {
            line: self.line_number,
            message: format!("Invalid {} value: '{}'", field_name, s),
        })
    }

    /// Current line number (1-based, counting skipped lines).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get an iterator over all intervals.
    pub fn intervals(self) -> IntervalIter<R> {
        IntervalIter { reader: self }
    }
}

/// Split off the first field, skipping any run of separators after it.
#[inline]
fn split_field(s: &str) -> (&str, &str) {
    let bytes = s.as_bytes();
    match memchr3(b'\t', b' ', b',', bytes) {
        Some(pos) => {
            let rest = s[pos..].trim_start_matches(['\t', ' ', ',']);
            (&s[..pos], rest)
        }
        None => (s, ""),
    }
}

/// Iterator over intervals from an [`IntervalReader`].
pub struct IntervalIter<R: Read> {
    reader: IntervalReader<R>,
}

impl<R: Read> Iterator for IntervalIter<R> {
    type Item = Result<Interval>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_interval().transpose()
    }
}

/// Read all intervals from a file.
pub fn read_intervals<P: AsRef<Path>>(path: P) -> Result<Vec<Interval>> {
    IntervalReader::from_path(path)?.intervals().collect()
}

/// Read all intervals from any reader.
pub fn read_intervals_from<R: Read>(reader: R) -> Result<Vec<Interval>> {
    IntervalReader::new(reader).intervals().collect()
}

/// Parse intervals from a string (useful for testing).
pub fn parse_intervals(content: &str) -> Result<Vec<Interval>> {
    read_intervals_from(content.as_bytes())
}

/// Buffered interval writer.
///
/// Uses itoa for integer formatting to avoid allocation in the hot path.
pub struct IntervalWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> IntervalWriter<W> {
    /// Create a new writer with the default 256KB buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    /// Create a new writer with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write one interval as `start\tend\n`.
    #[inline]
    pub fn write_interval(&mut self, interval: &Interval) -> io::Result<()> {
        self.writer
            .write_all(self.itoa_buf.format(interval.start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.end).as_bytes())?;
        self.writer.write_all(b"\n")
    }

    /// Write every interval in order.
    pub fn write_intervals<'a, I>(&mut self, intervals: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        let mut written = 0;
        for interval in intervals {
            self.write_interval(interval)?;
            written += 1;
        }
        Ok(written)
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
