//! Output formatting for solver results

use crate::executor::SolverResult;
use aoc_solver::Verdict;
use chrono::TimeDelta;

/// Totals over a finished run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub errors: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
    pub total_parse_time: TimeDelta,
    pub total_solve_time: TimeDelta,
}

impl Summary {
    pub fn from_results(results: &[SolverResult]) -> Self {
        results.iter().fold(Summary::default(), |mut s, r| {
            match &r.answer {
                Ok(_) => s.solved += 1,
                Err(_) => s.errors += 1,
            }
            match r.verdict {
                Verdict::Pass => s.checks_passed += 1,
                Verdict::Fail { .. } => s.checks_failed += 1,
                Verdict::Unchecked => {}
            }
            s.total_parse_time += r.parse_duration.unwrap_or_default();
            s.total_solve_time += r.solve_duration;
            s
        })
    }

    /// No solver errors and no wrong answers
    pub fn is_success(&self) -> bool {
        self.errors == 0 && self.checks_failed == 0
    }
}

pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        if self.quiet {
            match &result.answer {
                Ok(answer) => println!("{}", answer),
                Err(e) => eprintln!("Error: {}", e),
            }
        } else {
            match format_result(result) {
                Ok(line) => println!("{}", line),
                Err(line) => eprintln!("{}", line),
            }
        }
    }

    /// Print totals; both summed solve time and wall-clock time are shown
    pub fn print_summary(&self, summary: &Summary) {
        if self.quiet {
            return;
        }

        let elapsed_time = self.start_time.elapsed();
        let total_compute_time = summary.total_parse_time + summary.total_solve_time;

        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.solved, summary.errors
        );
        if summary.checks_passed + summary.checks_failed > 0 {
            println!(
                "Checks: {} passed, {} failed",
                summary.checks_passed, summary.checks_failed
            );
        }
        println!(
            "Total parse time: {}",
            format_duration(summary.total_parse_time)
        );
        println!(
            "Total solve time: {}",
            format_duration(summary.total_solve_time)
        );
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// One result line; `Err` lines belong on stderr
fn format_result(result: &SolverResult) -> Result<String, String> {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    let answer = match &result.answer {
        Ok(answer) => answer,
        Err(e) => return Err(format!("{}: Error - {}", prefix, e)),
    };

    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    let line = format!(
        "{}: {} ({}solve: {}){}",
        prefix,
        answer,
        parse_timing,
        format_duration(result.solve_duration),
        format_verdict(&result.verdict)
    );

    if result.verdict.is_fail() {
        Err(line)
    } else {
        Ok(line)
    }
}

fn format_verdict(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Unchecked => String::new(),
        Verdict::Pass => " ✓ PASSED".to_string(),
        Verdict::Fail { expected } => format!(" ✗ FAILED (expected {})", expected),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Wall-clock counterpart of [`format_duration`]
fn format_std_duration(d: std::time::Duration) -> String {
    TimeDelta::from_std(d).map_or_else(|_| "N/A".to_string(), format_duration)
}
