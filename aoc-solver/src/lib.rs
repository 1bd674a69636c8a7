//! Advent of Code Solver Library
//!
//! A small framework for writing Advent of Code solvers and running them
//! uniformly. Each puzzle parses its input once into shared data and then
//! answers one or more parts from it.
//!
//! # Overview
//!
//! - [`AocParser`] turns the raw input into `SharedData`.
//! - [`PartSolver<N>`] answers part `N`.
//! - [`Solver`] ties the parts together; usually derived with
//!   `#[derive(AocSolver)]`.
//! - [`SolverRegistry`] maps (year, day) to a factory producing a
//!   type-erased [`DynSolver`].
//! - `#[derive(AutoRegisterSolver)]` submits a solver as a [`SolverPlugin`]
//!   so a runner can discover it without a central list.
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Calories;
//!
//! impl AocParser for Calories {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .split("\n\n")
//!             .map(|elf| {
//!                 elf.lines()
//!                     .map(|l| l.parse::<u32>().map_err(|e| ParseError::InvalidFormat(e.to_string())))
//!                     .sum()
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or(0).to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         shared.sort_unstable_by(|a, b| b.cmp(a));
//!         Ok(shared.iter().take(3).sum::<u32>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Calories>(2022, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2022, 1, "1\n2\n\n4\n\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "4");
//! assert_eq!(solver.solve_checked(2, Some("10")).unwrap().verdict, aoc_solver::Verdict::Pass);
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance, Verdict};
pub use registry::{
    RegisterableSolver, SolverFactory, SolverInfo, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// The derive macros expand to paths under `::aoc_solver`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
