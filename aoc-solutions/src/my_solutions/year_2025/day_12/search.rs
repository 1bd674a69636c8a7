//! Backtracking placement search
//!
//! Places one present per recursion level. At each level a
//! [`TemplateSelector`] commits to a single template; every orientation of
//! it is tried at every top-left offset in row-major order. If none of those
//! placements leads to a full packing, the level fails without trying any
//! other template.
//!
//! The search is bounded by a [`CallBudget`] shared by the whole recursion
//! tree. Running out of budget is reported separately from a finished,
//! unsuccessful search, but both mean "not packed" to the puzzle answer, so a
//! pathological region can be a false negative.

use std::ops::{Deref, DerefMut};

use super::grid::OccupancyGrid;
use super::shape::{OrientationSet, Shape};

/// Recursive calls allowed per region before giving up
pub const DEFAULT_CALL_BUDGET: u64 = 2_000_000;

/// Counts search calls against a fixed limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallBudget {
    limit: u64,
    calls: u64,
}

impl CallBudget {
    pub fn new(limit: u64) -> Self {
        Self { limit, calls: 0 }
    }

    /// Record one call. Returns `false` once the count exceeds the limit.
    pub fn tick(&mut self) -> bool {
        self.calls += 1;
        self.calls <= self.limit
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for CallBudget {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_BUDGET)
    }
}

/// Chooses which template the next recursion level must place
pub trait TemplateSelector {
    /// `remaining[i]` is how many copies of template `i` are still unplaced.
    /// `None` means nothing is left to place.
    fn select(&self, remaining: &[usize]) -> Option<usize>;
}

/// Lowest-indexed template that still has copies to place
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstRemaining;

impl TemplateSelector for FirstRemaining {
    fn select(&self, remaining: &[usize]) -> Option<usize> {
        remaining.iter().position(|&count| count > 0)
    }
}

/// One present put down in a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub template: usize,
    /// Index into the template's [`OrientationSet`]
    pub orientation: usize,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Found,
    /// Every placement of the selected templates was tried
    Exhausted,
    OutOfBudget,
}

/// Result of searching one region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub status: SearchStatus,
    pub calls: u64,
    /// Placements in the order they were made; empty unless `Found`
    pub placements: Vec<Placement>,
}

/// Mutable state of one region's search, dropped with it
#[derive(Debug)]
struct SearchState {
    grid: OccupancyGrid,
    remaining: Vec<usize>,
    budget: CallBudget,
    placed: Vec<Placement>,
}

impl SearchState {
    fn new(width: usize, height: usize, required: &[usize], budget: CallBudget) -> Self {
        Self {
            grid: OccupancyGrid::new(width, height),
            remaining: required.to_vec(),
            budget,
            placed: Vec::new(),
        }
    }
}

/// A placement held on the grid for as long as the guard lives.
///
/// Acquiring marks the cells and takes one copy off the template's remaining
/// count; dropping gives both back, whichever way the recursion returns.
struct PlacementGuard<'s, 'o> {
    state: &'s mut SearchState,
    shape: &'o Shape,
    placement: Placement,
}

impl<'s, 'o> PlacementGuard<'s, 'o> {
    fn acquire(state: &'s mut SearchState, shape: &'o Shape, placement: Placement) -> Option<Self> {
        if !state.grid.fits(shape, placement.row, placement.col) {
            return None;
        }
        state.grid.fill(shape, placement.row, placement.col);
        state.remaining[placement.template] -= 1;
        Some(Self {
            state,
            shape,
            placement,
        })
    }
}

impl Deref for PlacementGuard<'_, '_> {
    type Target = SearchState;

    fn deref(&self) -> &SearchState {
        self.state
    }
}

impl DerefMut for PlacementGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut SearchState {
        self.state
    }
}

impl Drop for PlacementGuard<'_, '_> {
    fn drop(&mut self) {
        let Placement {
            template, row, col, ..
        } = self.placement;
        self.state.grid.clear(self.shape, row, col);
        self.state.remaining[template] += 1;
    }
}

/// Depth-first packer over precomputed orientation sets.
///
/// `orientations[i]` belongs to template `i`; the required counts passed to
/// [`run`](Self::run) use the same indexing.
pub struct PlacementSearch<'a, S = FirstRemaining> {
    orientations: &'a [OrientationSet],
    selector: S,
}

impl<'a> PlacementSearch<'a, FirstRemaining> {
    pub fn new(orientations: &'a [OrientationSet]) -> Self {
        Self::with_selector(orientations, FirstRemaining)
    }
}

impl<'a, S: TemplateSelector> PlacementSearch<'a, S> {
    pub fn with_selector(orientations: &'a [OrientationSet], selector: S) -> Self {
        Self {
            orientations,
            selector,
        }
    }

    /// Try to pack `required[i]` copies of every template `i` into a fresh
    /// `width × height` grid.
    pub fn run(&self, width: usize, height: usize, required: &[usize], budget: CallBudget) -> SearchReport {
        let mut state = SearchState::new(width, height, required, budget);
        let status = self.search(&mut state);

        debug_assert_eq!(state.grid.occupied_count(), 0);
        debug_assert_eq!(state.remaining, required);

        let mut placements = std::mem::take(&mut state.placed);
        placements.reverse();

        SearchReport {
            status,
            calls: state.budget.calls(),
            placements,
        }
    }

    fn search(&self, state: &mut SearchState) -> SearchStatus {
        if !state.budget.tick() {
            return SearchStatus::OutOfBudget;
        }

        let Some(template) = self.selector.select(&state.remaining) else {
            return SearchStatus::Found;
        };
        // A count for a template with no drawing can never be satisfied
        let Some(orientations) = self.orientations.get(template) else {
            return SearchStatus::Exhausted;
        };

        let (width, height) = (state.grid.width(), state.grid.height());

        for (orientation, shape) in orientations.iter().enumerate() {
            if shape.width() > width || shape.height() > height {
                continue;
            }
            for row in 0..=height - shape.height() {
                for col in 0..=width - shape.width() {
                    let placement = Placement {
                        template,
                        orientation,
                        row,
                        col,
                    };
                    let Some(mut guard) = PlacementGuard::acquire(state, shape, placement) else {
                        continue;
                    };
                    match self.search(&mut guard) {
                        SearchStatus::Found => {
                            guard.placed.push(placement);
                            return SearchStatus::Found;
                        }
                        SearchStatus::OutOfBudget => return SearchStatus::OutOfBudget,
                        SearchStatus::Exhausted => {}
                    }
                }
            }
        }

        SearchStatus::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn orientations(drawings: &[&str]) -> Vec<OrientationSet> {
        drawings
            .iter()
            .map(|d| Shape::from_drawing(&d.lines().collect::<Vec<_>>()).orientations())
            .collect()
    }

    #[test]
    fn test_budget_ticks_until_limit() {
        let mut budget = CallBudget::new(2);
        assert!(budget.tick());
        assert!(budget.tick());
        assert!(!budget.tick());
        assert_eq!(budget.calls(), 3);
        assert_eq!(budget.limit(), 2);
        assert_eq!(CallBudget::default().limit(), DEFAULT_CALL_BUDGET);
    }

    #[test]
    fn test_first_remaining_selector() {
        assert_eq!(FirstRemaining.select(&[0, 0, 3, 1]), Some(2));
        assert_eq!(FirstRemaining.select(&[1, 2]), Some(0));
        assert_eq!(FirstRemaining.select(&[0, 0]), None);
        assert_eq!(FirstRemaining.select(&[]), None);
    }

    #[test]
    fn test_nothing_required_is_found_in_one_call() {
        let sets = orientations(&["##"]);
        let report = PlacementSearch::new(&sets).run(2, 2, &[0], CallBudget::default());
        assert_eq!(report.status, SearchStatus::Found);
        assert_eq!(report.calls, 1);
        assert!(report.placements.is_empty());
    }

    #[test]
    fn test_packs_dominoes_in_row_major_order() {
        let sets = orientations(&["##"]);
        let report = PlacementSearch::new(&sets).run(2, 2, &[2], CallBudget::default());
        assert_eq!(report.status, SearchStatus::Found);
        assert_eq!(report.calls, 3);
        assert_eq!(
            report.placements,
            vec![
                Placement {
                    template: 0,
                    orientation: 0,
                    row: 0,
                    col: 0
                },
                Placement {
                    template: 0,
                    orientation: 0,
                    row: 1,
                    col: 0
                },
            ]
        );
    }

    #[test]
    fn test_shape_larger_than_region_is_exhausted() {
        let sets = orientations(&["###"]);
        let report = PlacementSearch::new(&sets).run(2, 2, &[1], CallBudget::default());
        assert_eq!(report.status, SearchStatus::Exhausted);
        assert!(report.placements.is_empty());
    }

    #[test]
    fn test_count_for_missing_template_is_exhausted() {
        let sets = orientations(&["#"]);
        let report = PlacementSearch::new(&sets).run(3, 3, &[0, 1], CallBudget::default());
        assert_eq!(report.status, SearchStatus::Exhausted);
    }

    #[test]
    fn test_budget_exhaustion_is_reported() {
        // Five monominoes in a 2x2 grid pass no area check here, and the
        // search runs out of calls long before exhausting placements.
        let sets = orientations(&["#"]);
        let report = PlacementSearch::new(&sets).run(2, 2, &[5], CallBudget::new(10));
        assert_eq!(report.status, SearchStatus::OutOfBudget);
        assert_eq!(report.calls, 11);
        assert!(report.placements.is_empty());
    }

    #[test]
    fn test_failed_search_restores_state() {
        let sets = orientations(&["##", "#"]);
        let report = PlacementSearch::new(&sets).run(3, 1, &[1, 2], CallBudget::default());
        assert_eq!(report.status, SearchStatus::Exhausted);

        // run() debug-asserts the grid and counts are back to their start
        let report = PlacementSearch::new(&sets).run(3, 1, &[1, 1], CallBudget::default());
        assert_eq!(report.status, SearchStatus::Found);
    }

    /// Selects like `FirstRemaining` but records every call
    struct Recording<'c> {
        seen: &'c Cell<usize>,
    }

    impl TemplateSelector for Recording<'_> {
        fn select(&self, remaining: &[usize]) -> Option<usize> {
            self.seen.set(self.seen.get() + 1);
            FirstRemaining.select(remaining)
        }
    }

    #[test]
    fn test_custom_selector_drives_search() {
        let seen = Cell::new(0);
        let sets = orientations(&["#", "##"]);
        let search = PlacementSearch::with_selector(&sets, Recording { seen: &seen });
        let report = search.run(3, 1, &[1, 1], CallBudget::default());

        assert_eq!(report.status, SearchStatus::Found);
        assert_eq!(seen.get() as u64, report.calls);
    }

    /// Always picks the highest-indexed template still needed
    struct LastRemaining;

    impl TemplateSelector for LastRemaining {
        fn select(&self, remaining: &[usize]) -> Option<usize> {
            remaining.iter().rposition(|&count| count > 0)
        }
    }

    #[test]
    fn test_selector_order_changes_placement_order() {
        let sets = orientations(&["#", "##"]);
        let first = PlacementSearch::new(&sets).run(3, 1, &[1, 1], CallBudget::default());
        let last =
            PlacementSearch::with_selector(&sets, LastRemaining).run(3, 1, &[1, 1], CallBudget::default());

        assert_eq!(first.status, SearchStatus::Found);
        assert_eq!(last.status, SearchStatus::Found);
        assert_eq!(first.placements[0].template, 0);
        assert_eq!(last.placements[0].template, 1);
    }
}
