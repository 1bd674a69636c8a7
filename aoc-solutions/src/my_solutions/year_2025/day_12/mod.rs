//! Day 12: fitting presents under the trees
//!
//! The input lists polyomino present shapes and then regions, each with the
//! number of presents of every shape it must hold. Presents can be rotated
//! and flipped but not overlap. The answer is how many regions can hold all
//! of their presents.

mod grid;
mod region;
mod search;
mod shape;


use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use log::{debug, trace, warn};

pub use grid::OccupancyGrid;
pub use region::{
    MAX_SEARCH_CELLS, PackingConfig, PackingOutcome, PuzzleInput, Region, check_region, check_region_with,
    render_packing,
};
pub use search::{
    CallBudget, DEFAULT_CALL_BUDGET, FirstRemaining, Placement, PlacementSearch, SearchReport,
    SearchStatus, TemplateSelector,
};
pub use shape::{Cell, OrientationSet, Shape};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2025, day = 12, tags = ["packing", "backtracking"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    puzzle: PuzzleInput,
    /// `orientations[i]` belongs to `puzzle.templates[i]`
    orientations: Vec<OrientationSet>,
    config: PackingConfig,
}

impl SharedData {
    pub fn new(puzzle: PuzzleInput, config: PackingConfig) -> Self {
        let orientations = puzzle.orientations();
        Self {
            puzzle,
            orientations,
            config,
        }
    }

    pub fn with_config(self, config: PackingConfig) -> Self {
        Self { config, ..self }
    }

    pub fn puzzle(&self) -> &PuzzleInput {
        &self.puzzle
    }

    pub fn orientations(&self) -> &[OrientationSet] {
        &self.orientations
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (&Region, PackingOutcome)> + '_ {
        self.puzzle
            .regions
            .iter()
            .map(|region| (region, check_region(region, &self.orientations, &self.config)))
    }

    /// Regions whose presents all fit
    pub fn count_packable(&self) -> usize {
        self.outcomes()
            .inspect(|(region, outcome)| self.log_outcome(region, outcome))
            .filter(|(_, outcome)| outcome.is_feasible())
            .count()
    }

    fn log_outcome(&self, region: &Region, outcome: &PackingOutcome) {
        match outcome {
            PackingOutcome::Packed(placements) if placements.is_empty() => {
                debug!("{} needs no presents", region)
            }
            PackingOutcome::Packed(placements) => {
                debug!("{} packed with {} presents", region, placements.len());
                trace!(
                    "{}\n{}",
                    region,
                    render_packing(region, &self.orientations, placements)
                );
            }
            PackingOutcome::AreaExceeded {
                required,
                available,
            } => debug!(
                "{} rejected: needs {} cells, has {}",
                region, required, available
            ),
            PackingOutcome::Exhausted => debug!("{} cannot be packed", region),
            PackingOutcome::BudgetExhausted => warn!(
                "{} gave up after {} search calls; counted as not packable",
                region, self.config.call_budget
            ),
            PackingOutcome::TooLarge { cells } => warn!(
                "{} has {} cells, too many to search; counted as not packable",
                region, cells
            ),
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let puzzle = PuzzleInput::parse(input)?;
        debug!(
            "parsed {} shapes and {} regions",
            puzzle.templates.len(),
            puzzle.regions.len()
        );
        Ok(SharedData::new(puzzle, PackingConfig::default()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.count_packable().to_string())
    }
}
