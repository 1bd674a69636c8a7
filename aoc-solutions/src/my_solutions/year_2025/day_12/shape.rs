//! Present shapes and their rotations/reflections

use std::collections::HashSet;
use std::fmt;

/// `(row, col)` offset of an occupied cell inside a shape's drawing frame
pub type Cell = (usize, usize);

/// An immutable polyomino drawn in a `width × height` frame.
///
/// The frame is the drawing's own bounding box (longest line × line count),
/// not the tight box around the `#` cells, so blank margins in a drawing
/// still count when checking whether a shape fits inside a region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Row-major sorted, so equal patterns compare equal
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Shape {
    /// Build a shape from drawing lines where `#` is occupied and anything
    /// else is empty.
    pub fn from_drawing<S: AsRef<str>>(lines: &[S]) -> Self {
        let cells = lines
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == '#')
                    .map(move |(col, _)| (row, col))
            })
            .collect();

        let width = lines
            .iter()
            .map(|line| line.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        Self {
            cells,
            width,
            height: lines.len(),
        }
    }

    fn from_cells(mut cells: Vec<Cell>, width: usize, height: usize) -> Self {
        cells.sort_unstable();
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of occupied cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Rotate 90° clockwise: an `R×C` frame becomes `C×R` and `(r, c)` moves
    /// to `(c, R-1-r)`.
    pub fn rotate_clockwise(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&(r, c)| (c, self.height - 1 - r))
            .collect();
        Self::from_cells(cells, self.height, self.width)
    }

    /// Mirror every row within the frame width. Short drawing lines count as
    /// padded with empty cells, so a ragged drawing mirrors like its
    /// rectangular padding.
    pub fn flip_horizontal(&self) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|&(r, c)| (r, self.width - 1 - c))
            .collect();
        Self::from_cells(cells, self.width, self.height)
    }

    /// All distinct rotations and reflections of this shape.
    ///
    /// Emits the current rotation and its mirror image for each of the four
    /// quarter turns, keeping the first occurrence of every exact
    /// `(cells, width, height)` pattern. The emission order is the order the
    /// placement search tries orientations in.
    pub fn orientations(&self) -> OrientationSet {
        let mut seen = HashSet::new();
        let mut shapes = Vec::with_capacity(8);
        let mut current = Self::from_cells(self.cells.clone(), self.width, self.height);

        for _ in 0..4 {
            let flipped = current.flip_horizontal();
            let next = current.rotate_clockwise();
            for candidate in [current, flipped] {
                if seen.insert(candidate.clone()) {
                    shapes.push(candidate);
                }
            }
            current = next;
        }

        OrientationSet { shapes }
    }
}

impl fmt::Display for Shape {
    /// Renders the frame with `#` for occupied and `.` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied: HashSet<Cell> = self.cells.iter().copied().collect();
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                let ch = if occupied.contains(&(row, col)) { '#' } else { '.' };
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

/// The 1-8 distinct orientations of one shape template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationSet {
    shapes: Vec<Shape>,
}

impl OrientationSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, shape: &Shape) -> bool {
        self.shapes.contains(shape)
    }

    /// Cell count shared by every orientation
    pub fn area(&self) -> usize {
        self.shapes.first().map_or(0, Shape::area)
    }
}

impl<'a> IntoIterator for &'a OrientationSet {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
