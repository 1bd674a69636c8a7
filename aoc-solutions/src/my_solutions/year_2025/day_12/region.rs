//! Puzzle input parsing and the per-region feasibility check

use std::fmt;

use anyhow::{Context, anyhow, bail};
use aoc_solver::ParseError;
use log::{debug, warn};

use super::search::{
    CallBudget, DEFAULT_CALL_BUDGET, FirstRemaining, Placement, PlacementSearch, SearchStatus,
    TemplateSelector,
};
use super::shape::{OrientationSet, Shape};

/// A tree region and how many presents of each template must fit under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub width: usize,
    pub height: usize,
    /// `counts[i]` copies of template `i`; one entry per template
    pub counts: Vec<usize>,
}

/// Largest region, in cells, the placement search will allocate a grid for
pub const MAX_SEARCH_CELLS: usize = 1 << 20;

impl Region {
    /// Cell count, saturating at `usize::MAX`
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Total cells the required presents cover
    pub fn required_area(&self, orientations: &[OrientationSet]) -> usize {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(i, &count)| {
                orientations
                    .get(i)
                    .map_or(0, OrientationSet::area)
                    .saturating_mul(count)
            })
            .fold(0, usize::saturating_add)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:", self.width, self.height)?;
        for count in &self.counts {
            write!(f, " {}", count)?;
        }
        Ok(())
    }
}

/// Shape templates in definition order followed by the regions to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleInput {
    pub templates: Vec<Shape>,
    pub regions: Vec<Region>,
}

impl PuzzleInput {
    /// Parse shape blocks and region lines.
    ///
    /// A line with both `x` and `:` is a region line. Any other line with a
    /// `:` starts a shape block whose drawing runs until a blank line or the
    /// next line containing `:`. Region lines that fail to parse are logged
    /// and skipped. Fails only when the input defines no shape at all.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.replace('\r', "");
        let mut lines = input.lines().enumerate().peekable();
        let mut templates = Vec::new();
        let mut raw_regions = Vec::new();

        while let Some((idx, line)) = lines.next() {
            if is_region_line(line) {
                match parse_region(line) {
                    Ok(region) => raw_regions.push((idx + 1, region)),
                    Err(e) => warn!("skipping region on line {}: {:#}", idx + 1, e),
                }
            } else if line.contains(':') {
                let drawing: Vec<&str> = std::iter::from_fn(|| {
                    lines
                        .next_if(|(_, l)| !l.trim().is_empty() && !l.contains(':'))
                        .map(|(_, l)| l)
                })
                .collect();

                // Label with nothing drawn under it
                if !drawing.is_empty() {
                    templates.push(Shape::from_drawing(&drawing));
                }
            }
        }

        if templates.is_empty() {
            return Err(ParseError::MissingData(
                "no present shapes defined".to_string(),
            ));
        }

        let regions = raw_regions
            .into_iter()
            .filter_map(|(line_no, region)| {
                fit_counts(region, templates.len())
                    .map_err(|e| warn!("skipping region on line {}: {:#}", line_no, e))
                    .ok()
            })
            .collect();

        Ok(Self { templates, regions })
    }

    pub fn orientations(&self) -> Vec<OrientationSet> {
        self.templates.iter().map(Shape::orientations).collect()
    }
}

fn is_region_line(line: &str) -> bool {
    line.contains('x') && line.contains(':')
}

fn parse_region(line: &str) -> anyhow::Result<Region> {
    let (dims, counts) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':'"))?;
    let (width, height) = dims
        .trim()
        .split_once('x')
        .ok_or_else(|| anyhow!("dimensions must look like WIDTHxHEIGHT"))?;

    let width = width
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid width {:?}", width))?;
    let height = height
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid height {:?}", height))?;
    if width.checked_mul(height).is_none() {
        bail!("{}x{} region has more cells than can be counted", width, height);
    }
    let counts = counts
        .split_whitespace()
        .map(|count| {
            count
                .parse::<usize>()
                .with_context(|| format!("invalid count {:?}", count))
        })
        .collect::<anyhow::Result<Vec<usize>>>()?;

    Ok(Region {
        width,
        height,
        counts,
    })
}

/// Pad missing trailing counts with zero and drop surplus zero counts.
/// A nonzero count for a template that doesn't exist is an error.
fn fit_counts(mut region: Region, templates: usize) -> anyhow::Result<Region> {
    if let Some((i, count)) = region
        .counts
        .iter()
        .enumerate()
        .skip(templates)
        .find(|&(_, &count)| count > 0)
    {
        bail!(
            "{} presents of template {} requested but only {} templates exist",
            count,
            i,
            templates
        );
    }
    region.counts.resize(templates, 0);
    Ok(region)
}

/// Tuning for the placement search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackingConfig {
    /// Search calls allowed per region
    pub call_budget: u64,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            call_budget: DEFAULT_CALL_BUDGET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackingOutcome {
    /// Every present was placed; placements in the order they were made
    Packed(Vec<Placement>),
    /// Rejected before searching
    AreaExceeded { required: usize, available: usize },
    /// The search ran to completion without packing everything
    Exhausted,
    /// The search gave up; feasibility is unknown
    BudgetExhausted,
    /// Presents are required but the region is too big to search
    TooLarge { cells: usize },
}

impl PackingOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Packed(_))
    }
}

/// Decide whether every required present fits in `region`.
pub fn check_region(
    region: &Region,
    orientations: &[OrientationSet],
    config: &PackingConfig,
) -> PackingOutcome {
    check_region_with(region, orientations, config, FirstRemaining)
}

/// [`check_region`] with a custom template selection policy.
pub fn check_region_with<S: TemplateSelector>(
    region: &Region,
    orientations: &[OrientationSet],
    config: &PackingConfig,
    selector: S,
) -> PackingOutcome {
    if region.counts.iter().all(|&count| count == 0) {
        return PackingOutcome::Packed(Vec::new());
    }

    let required = region.required_area(orientations);
    let available = region.area();
    if required > available {
        return PackingOutcome::AreaExceeded {
            required,
            available,
        };
    }
    if available > MAX_SEARCH_CELLS {
        return PackingOutcome::TooLarge { cells: available };
    }

    let report = PlacementSearch::with_selector(orientations, selector).run(
        region.width,
        region.height,
        &region.counts,
        CallBudget::new(config.call_budget),
    );
    debug!("{}: {:?} after {} calls", region, report.status, report.calls);

    match report.status {
        SearchStatus::Found => PackingOutcome::Packed(report.placements),
        SearchStatus::Exhausted => PackingOutcome::Exhausted,
        SearchStatus::OutOfBudget => PackingOutcome::BudgetExhausted,
    }
}

/// Draw a packed region, one letter per placed present and `.` for free
/// cells. Placements naming an unknown template or orientation are ignored.
pub fn render_packing(
    region: &Region,
    orientations: &[OrientationSet],
    placements: &[Placement],
) -> String {
    let mut canvas = vec![vec!['.'; region.width]; region.height];

    for (k, placement) in placements.iter().enumerate() {
        let Some(shape) = orientations
            .get(placement.template)
            .and_then(|set| set.get(placement.orientation))
        else {
            continue;
        };
        let letter = char::from(b'A' + (k % 26) as u8);
        for &(r, c) in shape.cells() {
            if let Some(cell) = canvas
                .get_mut(placement.row + r)
                .and_then(|row| row.get_mut(placement.col + c))
            {
                *cell = letter;
            }
        }
    }

    canvas
        .into_iter()
        .map(String::from_iter)
        .collect::<Vec<_>>()
        .join("\n")
}
