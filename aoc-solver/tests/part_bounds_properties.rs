//! Property-based tests for part-range checking and answer verdicts

use aoc_solver::{
    AocParser, DynSolver, ParseError, SolveError, Solver, SolverExt, SolverInstance, Verdict,
};
use proptest::prelude::*;

/// Answers `part{k}` for every part up to `N`
struct EchoPart<const N: u8>;

impl<const N: u8> AocParser for EchoPart<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for EchoPart<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut (), part: u8) -> Result<String, SolveError> {
        Ok(format!("part{}", part))
    }
}

fn checked(max_parts: u8, part: u8) -> Result<String, SolveError> {
    match max_parts {
        1 => EchoPart::<1>::solve_part_checked_range(&mut (), part),
        2 => EchoPart::<2>::solve_part_checked_range(&mut (), part),
        _ => EchoPart::<3>::solve_part_checked_range(&mut (), part),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Parts outside 1..=PARTS never reach `solve_part`
    #[test]
    fn prop_out_of_range_rejection(max_parts in 1u8..=3, part in 0u8..=255) {
        let result = checked(max_parts, part);

        if part == 0 || part > max_parts {
            match result {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
            }
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{}", part));
        }
    }

    /// A verdict only fails when the trimmed answers differ
    #[test]
    fn prop_verdict_matches_trimmed_equality(
        answer in "[0-9]{1,6}",
        expected in "[0-9]{1,6}",
        pad in " {0,2}\n{0,1}",
    ) {
        let verdict = Verdict::judge(&answer, Some(&format!("{}{}", expected, pad)));
        if answer == expected {
            prop_assert_eq!(verdict, Verdict::Pass);
        } else {
            prop_assert_eq!(verdict, Verdict::Fail { expected: expected.clone() });
        }
    }
}

#[test]
fn test_instance_reports_parts_and_verdict() {
    let mut instance = SolverInstance::<EchoPart<2>>::new(2025, 12, "").unwrap();

    assert_eq!(instance.parts(), 2);
    assert!(instance.parse_duration() >= chrono::TimeDelta::zero());

    let result = instance.solve_checked(1, Some("part1")).unwrap();
    assert_eq!(result.verdict, Verdict::Pass);
    assert!(result.duration() >= chrono::TimeDelta::zero());

    let result = instance.solve_checked(2, Some("part1")).unwrap();
    assert!(result.verdict.is_fail());

    assert_eq!(instance.solve(2).unwrap().verdict, Verdict::Unchecked);
    assert!(matches!(
        instance.solve(3),
        Err(SolveError::PartOutOfRange(3))
    ));
}
