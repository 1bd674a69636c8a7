//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one derives `AutoRegisterSolver`,
//! so linking this crate is enough for a runner to discover it through
//! [`aoc_solver::SolverRegistryBuilder::register_all_plugins`].

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
