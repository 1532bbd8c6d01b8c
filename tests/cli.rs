//! End-to-end tests for the `iunion` binary.
//!
//! Tests cover:
//! 1. Default, in-place and streaming merge paths agree
//! 2. Every sort strategy via the global `--sort` flag
//! 3. Invalid and unsorted input exit with status 1
//! 4. `generate` output feeds back into `merge`

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

/// Helper to create a temporary interval file.
fn create_input_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

/// Helper to run iunion and return output.
fn run_iunion(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iunion"))
        .args(args)
        .output()
        .expect("Failed to run iunion")
}

/// Helper to run iunion with data piped on stdin.
fn run_iunion_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_iunion"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run iunion");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Test fixtures
// =============================================================================

/// Unsorted input with overlap, containment and touching endpoints.
fn unsorted_input() -> &'static str {
    "# sample\n110\t130\n-3\t29\n100\t103\n-20\t-10\n-3\t29\n-22\t-1\n110\t120\n-20\t-10\n-5\t33\n105\t110\n"
}

fn unsorted_expected() -> &'static str {
    "-22\t33\n100\t103\n105\t130\n"
}

fn sorted_input() -> &'static str {
    "-22\t-1\n-5\t3\n0\t3\n234\t5234\n523\t2352\n"
}

fn sorted_expected() -> &'static str {
    "-22\t3\n234\t5234\n"
}

// =============================================================================
// Merge
// =============================================================================

#[test]
fn test_merge_default() {
    let file = create_input_file(unsorted_input());
    let output = run_iunion(&["merge", "-i", file.path().to_str().unwrap()]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), unsorted_expected());
}

#[test]
fn test_merge_in_place() {
    let file = create_input_file(unsorted_input());
    let output = run_iunion(&["merge", "--in-place", "-i", file.path().to_str().unwrap()]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), unsorted_expected());
}

#[test]
fn test_merge_each_strategy() {
    let file = create_input_file(unsorted_input());
    for strategy in ["standard", "quick", "basic"] {
        let output = run_iunion(&[
            "--sort",
            strategy,
            "merge",
            "-i",
            file.path().to_str().unwrap(),
        ]);
        assert!(output.status.success(), "{}: {}", strategy, stderr(&output));
        assert_eq!(stdout(&output), unsorted_expected(), "{}", strategy);
    }
}

#[test]
fn test_merge_unknown_strategy() {
    let file = create_input_file(sorted_input());
    let output = run_iunion(&["--sort", "bogo", "merge", "-i", file.path().to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_merge_stdin() {
    let output = run_iunion_stdin(&["merge"], unsorted_input());
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), unsorted_expected());

    let output = run_iunion_stdin(&["merge", "-i", "-"], unsorted_input());
    assert_eq!(stdout(&output), unsorted_expected());
}

#[test]
fn test_merge_empty_input() {
    let file = create_input_file("");
    let output = run_iunion(&["merge", "-i", file.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_merge_invalid_interval() {
    let file = create_input_file("0\t3\n-22\t-23\n");
    let output = run_iunion(&["merge", "-i", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("invalid interval [-22, -23]"));
}

#[test]
fn test_merge_parse_error() {
    let file = create_input_file("1\t2\nnot a number\n");
    let output = run_iunion(&["merge", "-i", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("line 2"));
}

#[test]
fn test_merge_stats() {
    let file = create_input_file(unsorted_input());
    let output = run_iunion(&["merge", "--stats", "-i", file.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stderr(&output).contains("Read: 10, Written: 3"));
}

// =============================================================================
// Streaming merge
// =============================================================================

#[test]
fn test_streaming_sorted() {
    let file = create_input_file(sorted_input());
    let output = run_iunion(&["merge", "--streaming", "-i", file.path().to_str().unwrap()]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), sorted_expected());
}

#[test]
fn test_streaming_rejects_unsorted() {
    let file = create_input_file(unsorted_input());
    let output = run_iunion(&["merge", "--streaming", "-i", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not sorted"));
}

#[test]
fn test_streaming_unsorted_keeps_only_completed_spans() {
    // [20, 30] is still open when [2, 4] breaks the order, so it is dropped
    let file = create_input_file("1\t5\n3\t8\n20\t30\n2\t4\n");
    let output = run_iunion(&["merge", "--streaming", "-i", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "1\t8\n");
    assert!(stderr(&output).contains("not sorted"));
}

#[test]
fn test_streaming_rejects_invalid() {
    let file = create_input_file("-22\t-23\n");
    let output = run_iunion(&["merge", "--streaming", "-i", file.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid interval"));
}

#[test]
fn test_streaming_assume_sorted_skips_validation() {
    // Unsorted input is accepted; output is unspecified but the run succeeds
    let file = create_input_file(unsorted_input());
    let output = run_iunion(&[
        "merge",
        "--streaming",
        "--assume-sorted",
        "-i",
        file.path().to_str().unwrap(),
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn test_streaming_stdin() {
    let output = run_iunion_stdin(&["merge", "--streaming", "--stats"], sorted_input());

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), sorted_expected());
    assert!(stderr(&output).contains("Read: 5, Written: 2"));
}

#[test]
fn test_in_place_conflicts_with_streaming() {
    let file = create_input_file(sorted_input());
    let output = run_iunion(&[
        "merge",
        "--in-place",
        "--streaming",
        "-i",
        file.path().to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

// =============================================================================
// Sort and generate
// =============================================================================

#[test]
fn test_sort_command() {
    let file = create_input_file("5\t6\n-1\t0\n3\t9\n");
    for strategy in ["standard", "quick", "basic"] {
        let output = run_iunion(&["--sort", strategy, "sort", "-i", file.path().to_str().unwrap()]);
        assert!(output.status.success());
        assert_eq!(stdout(&output), "-1\t0\n3\t9\n5\t6\n");
    }
}

#[test]
fn test_generate_then_merge() {
    let generated = NamedTempFile::new().unwrap();
    let path = generated.path().to_str().unwrap();

    let output = run_iunion(&["generate", "-n", "2K", "--seed", "3", "--sorted", "-o", path]);
    assert!(output.status.success(), "{}", stderr(&output));

    let batch = run_iunion(&["merge", "-i", path]);
    let streamed = run_iunion(&["merge", "--streaming", "-i", path]);

    assert!(batch.status.success());
    assert!(streamed.status.success(), "{}", stderr(&streamed));
    assert!(!stdout(&batch).is_empty());
    assert_eq!(stdout(&batch), stdout(&streamed));
}

#[test]
fn test_generate_negative_bounds() {
    let output = run_iunion(&[
        "generate",
        "-n",
        "20",
        "--min-start",
        "-100",
        "--max-start",
        "-50",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    for line in stdout(&output).lines() {
        let start: i64 = line.split('\t').next().unwrap().parse().unwrap();
        assert!((-100..=-50).contains(&start));
    }
}
