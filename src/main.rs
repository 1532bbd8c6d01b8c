// Clippy allows
#![allow(clippy::too_many_arguments)]

//! iunion: merge closed integer intervals from the command line.
//!
//! Usage: iunion <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Instant;

use interval_union::error::InputError;
use interval_union::generate::{self, GenerateConfig, GenerateMode, SizeSpec};
use interval_union::merge::{MergeStats, Merger};
use interval_union::sort::{sort_by_start, SortStats, SortStrategy};
use interval_union::streaming::{rendezvous, spawn_merge_stream, SortValidator};
use interval_union::text::{read_intervals_from, IntervalReader, IntervalWriter};
use interval_union::{config, Interval};

#[derive(Parser)]
#[command(name = "iunion")]
#[command(version)]
#[command(about = "Merge overlapping closed integer intervals", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Sort strategy used before merging: standard, quick or basic
    #[arg(long, global = true, value_parser = parse_strategy)]
    sort: Option<SortStrategy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overlapping and touching intervals
    Merge {
        /// Input file, one "start end" pair per line (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Merge into the input buffer instead of a new one
        #[arg(long, conflicts_with = "streaming")]
        in_place: bool,

        /// Use streaming mode (constant memory, requires input sorted by start).
        /// Spans completed before an input error are already written.
        #[arg(long)]
        streaming: bool,

        /// Skip sorted validation in streaming mode
        #[arg(long, requires = "streaming")]
        assume_sorted: bool,

        /// Print merge statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Sort intervals by start
    Sort {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print sorting statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Generate a random interval dataset for benchmarking
    Generate {
        /// Number of intervals (accepts K/M/G suffixes)
        #[arg(short = 'n', long, default_value = "1K")]
        count: String,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Start distribution: uniform or clustered
        #[arg(long, default_value = "uniform")]
        mode: String,

        /// Smallest start value
        #[arg(long, default_value = "-1000000", allow_negative_numbers = true)]
        min_start: i64,

        /// Largest start value
        #[arg(long, default_value = "1000000", allow_negative_numbers = true)]
        max_start: i64,

        /// Minimum interval length (end - start)
        #[arg(long, default_value = "0")]
        len_min: u32,

        /// Maximum interval length (end - start)
        #[arg(long, default_value = "1000")]
        len_max: u32,

        /// Sort output by start
        #[arg(long)]
        sorted: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print generation statistics to stderr
        #[arg(long)]
        stats: bool,
    },
}

fn parse_strategy(s: &str) -> Result<SortStrategy, String> {
    SortStrategy::parse(s)
        .ok_or_else(|| format!("unknown sort strategy '{}' (expected standard, quick or basic)", s))
}

fn main() {
    let cli = Cli::parse();

    // Must be set before any merge runs
    if let Some(strategy) = cli.sort {
        config::set_default_sort_strategy(strategy);
    }

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .expect("Failed to initialize thread pool");
    }

    let result = match cli.command {
        Commands::Merge {
            input,
            in_place,
            streaming,
            assume_sorted,
            stats,
        } => run_merge(input, in_place, streaming, assume_sorted, stats),

        Commands::Sort { input, stats } => run_sort(input, stats),

        Commands::Generate {
            count,
            seed,
            mode,
            min_start,
            max_start,
            len_min,
            len_max,
            sorted,
            output,
            stats,
        } => run_generate(
            &count, seed, &mode, min_start, max_start, len_min, len_max, sorted, output, stats,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Open the input file, or stdin when absent or `-`.
fn open_input(input: Option<PathBuf>) -> Result<Box<dyn Read + Send>, InputError> {
    match input {
        Some(path) if path.to_string_lossy() != "-" => Ok(Box::new(File::open(&path)?)),
        _ => Ok(Box::new(io::stdin())),
    }
}

fn run_merge(
    input: Option<PathBuf>,
    in_place: bool,
    streaming: bool,
    assume_sorted: bool,
    stats: bool,
) -> Result<(), InputError> {
    let reader = open_input(input)?;
    let stdout = io::stdout();
    let mut writer = IntervalWriter::new(stdout.lock());

    let result = if streaming {
        merge_streaming(reader, assume_sorted, &mut writer)?
    } else {
        let mut intervals = read_intervals_from(reader)?;
        let merger = Merger::new();
        let intervals_read = intervals.len();

        let intervals_written = if in_place {
            merger.merge_in_place_vec(&mut intervals)?;
            writer.write_intervals(&intervals)?
        } else {
            let merged = merger.merge(&mut intervals)?;
            writer.write_intervals(&merged)?
        };

        MergeStats {
            intervals_read,
            intervals_written,
        }
    };

    writer.flush()?;

    if stats {
        eprintln!("Merge stats: {}", result);
    }

    Ok(())
}

/// Producer thread parses and validates, the merge task sweeps, and this
/// thread writes. All three are linked by rendezvous channels.
fn merge_streaming<W: Write>(
    reader: Box<dyn Read + Send>,
    assume_sorted: bool,
    writer: &mut IntervalWriter<W>,
) -> Result<MergeStats, InputError> {
    let (tx, rx) = rendezvous();
    let handle = spawn_merge_stream(rx)?;

    let producer = thread::Builder::new()
        .name("producer".to_string())
        .spawn(move || -> Result<usize, InputError> {
            let mut validator = SortValidator::new();
            let mut read = 0;
            for result in IntervalReader::new(reader).intervals() {
                let interval: Interval = result?;
                if !assume_sorted {
                    validator.validate(&interval)?;
                }
                if tx.send(interval).is_err() {
                    break;
                }
                read += 1;
            }
            Ok(read)
        })?;

    // The merge task flushes its accumulator whenever input ends, including
    // when the producer bails out. Hold each span back until the next one
    // arrives and write the last only if the producer succeeded.
    let (output, merge_thread) = handle.into_parts();
    let mut intervals_written = 0;
    let mut held: Option<Interval> = None;
    for merged in output.iter() {
        if let Some(complete) = held.replace(merged) {
            writer.write_interval(&complete)?;
            intervals_written += 1;
        }
    }

    let intervals_read = producer
        .join()
        .map_err(|_| InputError::ThreadPanic("producer"))??;
    merge_thread
        .join()
        .map_err(|_| InputError::ThreadPanic("merge"))?;

    if let Some(last) = held {
        writer.write_interval(&last)?;
        intervals_written += 1;
    }

    Ok(MergeStats {
        intervals_read,
        intervals_written,
    })
}

fn run_sort(input: Option<PathBuf>, stats: bool) -> Result<(), InputError> {
    let mut intervals = read_intervals_from(open_input(input)?)?;
    let strategy = config::default_sort_strategy();

    let start = Instant::now();
    sort_by_start(&mut intervals, strategy);
    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut writer = IntervalWriter::new(stdout.lock());
    writer.write_intervals(&intervals)?;
    writer.flush()?;

    if stats {
        let result = SortStats {
            intervals: intervals.len(),
            strategy,
            elapsed,
        };
        eprintln!("Sort stats: {}", result);
    }

    Ok(())
}

fn run_generate(
    count: &str,
    seed: u64,
    mode: &str,
    min_start: i64,
    max_start: i64,
    len_min: u32,
    len_max: u32,
    sorted: bool,
    output: Option<PathBuf>,
    stats: bool,
) -> Result<(), InputError> {
    let count = SizeSpec::parse(count)
        .ok_or_else(|| InputError::InvalidFormat(format!("Invalid count: '{}'", count)))?
        .count;
    let mode = GenerateMode::parse(mode)
        .ok_or_else(|| InputError::InvalidFormat(format!("Invalid mode: '{}'", mode)))?;

    let config = GenerateConfig {
        count,
        seed,
        mode,
        min_start,
        max_start,
        len_min,
        len_max,
        sorted,
        ..GenerateConfig::default()
    };

    let result = match output {
        Some(path) => generate::run(&config, File::create(path)?)?,
        None => generate::run(&config, io::stdout().lock())?,
    };

    if stats {
        eprintln!("Generate stats: {}", result);
    }

    Ok(())
}
