// src/map/grid.rs

use rayon::prelude::*;
use std::fmt;

use crate::map::TileKind;

/// A `width x height` field of tile kinds.
///
/// Cells are stored row by row (`y * width + x`). Traversal for generation,
/// smoothing and synchronisation is column-major, see [`Grid::positions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<TileKind>,
}

impl Grid {
    /// Creates a grid with every cell set to [`TileKind::WALL`].
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, TileKind::WALL)
    }

    pub fn filled(width: usize, height: usize, kind: TileKind) -> Self {
        Grid {
            width,
            height,
            cells: vec![kind; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True for the outermost ring of cells.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Returns the kind at `(x, y)`. Panics when out of bounds, like slice indexing.
    pub fn get(&self, x: usize, y: usize) -> TileKind {
        self.cells[self.index(x, y)]
    }

    pub fn try_get(&self, x: usize, y: usize) -> Option<TileKind> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, kind: TileKind) {
        let idx = self.index(x, y);
        self.cells[idx] = kind;
    }

    pub fn cells(&self) -> &[TileKind] {
        &self.cells
    }

    /// Every coordinate in traversal order: `x` outer, `y` inner.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Coordinate of the `n`-th cell in traversal order.
    pub fn position_at(&self, n: usize) -> (usize, usize) {
        (n / self.height, n % self.height)
    }

    /// Number of cells holding `kind`.
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.par_iter().filter(|&&k| k == kind).count()
    }

    /// Number of cells whose kind differs from `other`. Grids of different
    /// dimensions are considered entirely different.
    pub fn diff_count(&self, other: &Grid) -> usize {
        if self.dimensions() != other.dimensions() {
            return self.len().max(other.len());
        }
        self.cells
            .par_iter()
            .zip(other.cells.par_iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Checks that the whole border ring is wall.
    pub fn border_is_sealed(&self) -> bool {
        self.positions()
            .filter(|&(x, y)| self.is_border(x, y))
            .all(|(x, y)| self.get(x, y) == TileKind::WALL)
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height, "cell ({}, {}) outside {}x{} grid", x, y, self.width, self.height);
        y * self.width + x
    }
}

/// One text line per row, `#` for walls and `.` for open cells.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|k| k.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_detection() {
        let grid = Grid::new(4, 3);
        assert!(grid.is_border(0, 1));
        assert!(grid.is_border(3, 1));
        assert!(grid.is_border(1, 0));
        assert!(grid.is_border(1, 2));
        assert!(!grid.is_border(1, 1));
        assert!(!grid.is_border(2, 1));
    }

    #[test]
    fn test_positions_are_column_major() {
        let grid = Grid::new(2, 3);
        let order: Vec<_> = grid.positions().collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        for (n, pos) in order.iter().enumerate() {
            assert_eq!(grid.position_at(n), *pos);
        }
    }

    #[test]
    fn test_counts_and_diff() {
        let mut a = Grid::new(3, 3);
        a.set(1, 1, TileKind::OPEN);
        assert_eq!(a.count(TileKind::OPEN), 1);
        assert_eq!(a.count(TileKind::WALL), 8);

        let mut b = a.clone();
        assert_eq!(a.diff_count(&b), 0);
        b.set(1, 1, TileKind::WALL);
        b.set(0, 0, TileKind::OPEN);
        assert_eq!(a.diff_count(&b), 2);
        assert_eq!(a.diff_count(&Grid::new(2, 2)), 9);
    }

    #[test]
    fn test_try_get_out_of_bounds() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.try_get(1, 1), Some(TileKind::WALL));
        assert_eq!(grid.try_get(2, 0), None);
    }

    #[test]
    fn test_text_rendering() {
        let mut grid = Grid::new(3, 2);
        grid.set(1, 0, TileKind::OPEN);
        assert_eq!(grid.to_string(), "#.#\n###\n");
    }
}
