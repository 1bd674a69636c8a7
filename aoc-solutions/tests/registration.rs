use aoc_solutions::my_solutions::year_2025::day_12;
use aoc_solver::{SolverRegistryBuilder, Verdict};

const INPUT: &str = "\
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

#[test]
fn test_day_12_registered_as_plugin() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"packing"))
        .unwrap()
        .build();

    let info = registry.get_info(2025, 12).unwrap();
    assert_eq!(info.parts, 1);

    let mut solver = registry.create_solver(2025, 12, INPUT).unwrap();
    let result = solver.solve_checked(1, Some("2\n")).unwrap();
    assert_eq!(result.answer, "2");
    assert_eq!(result.verdict, Verdict::Pass);
}

#[test]
fn test_day_12_registered_explicitly() {
    let registry = SolverRegistryBuilder::new()
        .register::<day_12::Solver>(2025, 12)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2025, 12, INPUT).unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "2");
    assert!(solver.solve(2).is_err());
}
