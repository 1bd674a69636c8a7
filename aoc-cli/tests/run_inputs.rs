//! Runs the `aoc` binary against a temporary inputs directory

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const EXAMPLE: &str = "\
0:
###
#..
###

1:
##
##

4x4: 2 0
3x3: 1 1
6x2: 0 3
";

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run_day_12(inputs: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aoc"))
        .args(["--year", "2025", "--day", "12", "--inputs-dir"])
        .arg(inputs)
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_example_answer_passes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "2025/day12_example.txt", EXAMPLE);
    write(temp.path(), "2025/day12_example_part1.answer", "2\n");

    let output = run_day_12(temp.path(), &["--example"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(stdout.contains("2025/12 Part 1: 2"));
    assert!(stdout.contains("✓ PASSED"));
    assert!(stdout.contains("Checks: 1 passed, 0 failed"));
}

#[test]
fn test_wrong_answer_fails_run() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "2025/day12.txt", EXAMPLE);
    write(temp.path(), "2025/day12_part1.answer", "3");

    let output = run_day_12(temp.path(), &["--parallelize-by", "part"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("✗ FAILED (expected 3)"));
}

#[test]
fn test_quiet_prints_only_answer() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "2025/day12.txt", EXAMPLE);

    let output = run_day_12(temp.path(), &["--quiet", "--parallelize-by", "sequential"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2\n");
}

#[test]
fn test_missing_input_is_reported() {
    let temp = TempDir::new().unwrap();

    let output = run_day_12(temp.path(), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input file not found"), "stderr: {}", stderr);
}

#[test]
fn test_unmatched_tags_run_nothing() {
    let temp = TempDir::new().unwrap();

    let output = run_day_12(temp.path(), &["--tags", "no-such-tag"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No solvers found"));
}
