//! Generate synthetic interval datasets for benchmarking.
//!
//! Features:
//! - Uniform and clustered start distributions
//! - Configurable span and interval lengths
//! - Optional sorted output (for the streaming merge)
//! - Deterministic reproducibility via seed

use crate::error::InputError;
use crate::interval::Interval;
use crate::sort::standard_sort;
use crate::text::IntervalWriter;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::time::Instant;

/// Distribution of generated start positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerateMode {
    /// Starts spread evenly across the span
    #[default]
    Uniform,
    /// Most starts packed into a few hotspots, producing heavy overlap
    Clustered,
}

impl GenerateMode {
    /// Parse mode from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" => Some(Self::Uniform),
            "clustered" => Some(Self::Clustered),
            _ => None,
        }
    }
}

/// Size specification (parses 1K, 1M, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    pub count: u64,
}

impl SizeSpec {
    /// Parse size from string (e.g., "1K", "5M", "100").
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        if s.is_empty() {
            return None;
        }

        let (num_part, multiplier) = if let Some(n) = s.strip_suffix('K') {
            (n, 1_000u64)
        } else if let Some(n) = s.strip_suffix('M') {
            (n, 1_000_000u64)
        } else if let Some(n) = s.strip_suffix('G') {
            (n, 1_000_000_000u64)
        } else {
            (s.as_str(), 1u64)
        };

        num_part
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(multiplier))
            .map(|count| Self { count })
    }
}

/// Configuration for dataset generation.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub count: u64,
    pub seed: u64,
    pub mode: GenerateMode,
    /// Smallest possible start
    pub min_start: i64,
    /// Largest possible start
    pub max_start: i64,
    /// Interval length bounds, as `end - start`
    pub len_min: u32,
    pub len_max: u32,
    /// Share of intervals placed in hotspots (clustered mode)
    pub hotspot_weight: f64,
    /// Sort output by start
    pub sorted: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            count: 1_000,
            seed: 42,
            mode: GenerateMode::Uniform,
            min_start: -1_000_000,
            max_start: 1_000_000,
            len_min: 0,
            len_max: 1_000,
            hotspot_weight: 0.80,
            sorted: false,
        }
    }
}

/// Statistics from a generate run.
#[derive(Debug, Default, Clone)]
pub struct GenerateStats {
    pub total_intervals: u64,
    pub elapsed_secs: f64,
}

impl std::fmt::Display for GenerateStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} intervals ({:.1}s)",
            self.total_intervals, self.elapsed_secs
        )
    }
}

/// Largest count [`generate_intervals`] will hold in memory.
///
/// Sorted output needs the whole dataset at once. Unsorted output written
/// through [`run`] is streamed and has no limit.
pub const MAX_IN_MEMORY_COUNT: u64 = 100_000_000;

/// Hotspot for clustered distribution.
struct Hotspot {
    center: i64,
    radius: i64,
}

/// Lazily generated intervals. Same seed, same sequence.
pub struct IntervalGenerator {
    rng: SmallRng,
    hotspots: Vec<Hotspot>,
    in_hotspot: u64,
    min_start: i64,
    max_start: i64,
    len_min: u32,
    len_max: u32,
    index: u64,
    count: u64,
}

impl IntervalGenerator {
    pub fn new(config: &GenerateConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let (min_start, max_start) = if config.min_start <= config.max_start {
            (config.min_start, config.max_start)
        } else {
            (config.max_start, config.min_start)
        };
        let (len_min, len_max) = if config.len_min <= config.len_max {
            (config.len_min, config.len_max)
        } else {
            (config.len_max, config.len_min)
        };

        let hotspots = match config.mode {
            GenerateMode::Uniform => Vec::new(),
            GenerateMode::Clustered => create_hotspots(&mut rng, min_start, max_start),
        };
        let in_hotspot = if hotspots.is_empty() {
            0
        } else {
            (config.count as f64 * config.hotspot_weight.clamp(0.0, 1.0)) as u64
        };

        Self {
            rng,
            hotspots,
            in_hotspot,
            min_start,
            max_start,
            len_min,
            len_max,
            index: 0,
            count: config.count,
        }
    }
}

impl Iterator for IntervalGenerator {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        if self.index >= self.count {
            return None;
        }

        let start = if self.index < self.in_hotspot {
            let hotspot = &self.hotspots[self.rng.gen_range(0..self.hotspots.len())];
            let lo = hotspot
                .center
                .saturating_sub(hotspot.radius)
                .max(self.min_start);
            let hi = hotspot
                .center
                .saturating_add(hotspot.radius)
                .min(self.max_start);
            self.rng.gen_range(lo..=hi)
        } else {
            self.rng.gen_range(self.min_start..=self.max_start)
        };
        let len = self.rng.gen_range(self.len_min..=self.len_max);
        self.index += 1;

        Some(Interval::new(start, start.saturating_add(len as i64)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Generate intervals per the config into memory.
///
/// Fails with [`InputError::InvalidFormat`] before allocating when the
/// count exceeds [`MAX_IN_MEMORY_COUNT`].
pub fn generate_intervals(config: &GenerateConfig) -> Result<Vec<Interval>, InputError> {
    if config.count > MAX_IN_MEMORY_COUNT {
        return Err(InputError::InvalidFormat(format!(
            "count {} exceeds the in-memory limit of {} intervals",
            config.count, MAX_IN_MEMORY_COUNT
        )));
    }

    let mut intervals: Vec<Interval> = IntervalGenerator::new(config).collect();
    if config.sorted {
        standard_sort(&mut intervals);
    }

    Ok(intervals)
}

/// A handful of hotspots, each about 1% of the span wide.
fn create_hotspots(rng: &mut SmallRng, min_start: i64, max_start: i64) -> Vec<Hotspot> {
    let span = max_start.abs_diff(min_start);
    let radius = (span / 200).min(i64::MAX as u64) as i64;

    (0..8)
        .map(|_| Hotspot {
            center: rng.gen_range(min_start..=max_start),
            radius,
        })
        .collect()
}

/// Generate a dataset and write it to `output`.
///
/// Unsorted output is written as it is generated. Sorted output is built in
/// memory first and is subject to [`MAX_IN_MEMORY_COUNT`].
pub fn run<W: Write>(config: &GenerateConfig, output: W) -> Result<GenerateStats, InputError> {
    let start = Instant::now();
    let mut writer = IntervalWriter::new(output);

    let written = if config.sorted {
        writer.write_intervals(&generate_intervals(config)?)?
    } else {
        let mut written = 0;
        for interval in IntervalGenerator::new(config) {
            writer.write_interval(&interval)?;
            written += 1;
        }
        written
    };
    writer.flush()?;

    Ok(GenerateStats {
        total_intervals: written as u64,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}
