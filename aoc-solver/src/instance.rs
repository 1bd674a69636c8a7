//! Parsed solver instances and the type-erased interface the runner drives

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Outcome of comparing an answer with a known-good one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Verdict {
    /// No expected answer was available
    #[default]
    Unchecked,
    Pass,
    Fail { expected: String },
}

impl Verdict {
    /// Compare `answer` with `expected`, ignoring surrounding whitespace.
    pub fn judge(answer: &str, expected: Option<&str>) -> Self {
        match expected {
            None => Verdict::Unchecked,
            Some(expected) if expected.trim() == answer.trim() => Verdict::Pass,
            Some(expected) => Verdict::Fail {
                expected: expected.trim().to_string(),
            },
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail { .. })
    }
}

/// Answer for one part, with solve timestamps
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
    pub verdict: Verdict,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// One puzzle's parsed input, ready to have its parts solved.
///
/// Parts share `SharedData`, so a part may reuse work memoized by an
/// earlier one.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` and record how long it took.
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }
}

/// Type-erased access to a [`SolverInstance`].
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(solver: &mut dyn DynSolver) -> Result<(), Box<dyn std::error::Error>> {
///     let result = solver.solve_checked(1, Some("42"))?;
///     println!("{} {:?} ({:?})", result.answer, result.verdict, result.duration());
///     println!("parse took {:?}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part`, leaving the verdict `Unchecked`.
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        self.solve_checked(part, None)
    }

    /// Solve `part` and compare the answer against `expected` when given.
    fn solve_checked(
        &mut self,
        part: u8,
        expected: Option<&str>,
    ) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts the underlying solver supports
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<'a, S: SolverExt> DynSolver for SolverInstance<'a, S> {
    fn solve_checked(
        &mut self,
        part: u8,
        expected: Option<&str>,
    ) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let solve_end = Utc::now();
        let verdict = Verdict::judge(&answer, expected);

        Ok(SolveResult {
            answer,
            solve_start,
            solve_end,
            verdict,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
