use super::shape::Shape;

/// Row-major occupancy of one region while it is being packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    /// Whether `shape`'s frame fits with its top-left corner at `(row, col)`
    /// and every occupied cell lands on a free grid cell.
    pub fn fits(&self, shape: &Shape, row: usize, col: usize) -> bool {
        row + shape.height() <= self.height
            && col + shape.width() <= self.width
            && shape
                .cells()
                .iter()
                .all(|&(r, c)| !self.is_occupied(row + r, col + c))
    }

    /// Mark `shape`'s cells. The caller checks [`fits`](Self::fits) first.
    pub fn fill(&mut self, shape: &Shape, row: usize, col: usize) {
        self.set(shape, row, col, true);
    }

    pub fn clear(&mut self, shape: &Shape, row: usize, col: usize) {
        self.set(shape, row, col, false);
    }

    fn set(&mut self, shape: &Shape, row: usize, col: usize, value: bool) {
        for &(r, c) in shape.cells() {
            let index = self.index(row + r, col + c);
            self.cells[index] = value;
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Shape {
        Shape::from_drawing(&["##", "##"])
    }

    #[test]
    fn test_fits_respects_frame_bounds() {
        let grid = OccupancyGrid::new(3, 2);
        assert!(grid.fits(&square(), 0, 0));
        assert!(grid.fits(&square(), 0, 1));
        assert!(!grid.fits(&square(), 0, 2));
        assert!(!grid.fits(&square(), 1, 0));
    }

    #[test]
    fn test_blank_frame_margin_counts_for_bounds() {
        // Only the left column is occupied, but the frame is two wide
        let bar = Shape::from_drawing(&["#.", "#."]);
        let grid = OccupancyGrid::new(1, 2);
        assert!(!grid.fits(&bar, 0, 0));
    }

    #[test]
    fn test_fill_and_clear_restore_grid() {
        let mut grid = OccupancyGrid::new(4, 2);
        let before = grid.clone();

        grid.fill(&square(), 0, 1);
        assert_eq!(grid.occupied_count(), 4);
        assert!(grid.is_occupied(1, 2));
        assert!(!grid.fits(&square(), 0, 0));
        assert!(!grid.fits(&square(), 0, 2));

        grid.clear(&square(), 0, 1);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_empty_cells_of_shape_never_conflict() {
        let mut grid = OccupancyGrid::new(2, 2);
        let corner = Shape::from_drawing(&["#.", ".."]);
        grid.fill(&corner, 0, 0);

        let rest = Shape::from_drawing(&[".#", "##"]);
        assert!(grid.fits(&rest, 0, 0));
        grid.fill(&rest, 0, 0);
        assert_eq!(grid.occupied_count(), 4);
    }
}
