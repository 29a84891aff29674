// src/generation/smoothing.rs

use log::debug;

use crate::map::{Grid, Kernel, TileKind};

/// Neighbour sum at or above which a cell opens up.
pub const OPEN_THRESHOLD: i32 = 4;

/// Runs `passes` cellular-automaton sweeps over the interior of `grid`.
///
/// Updates happen in place and in traversal order: a cell reads neighbours
/// that were already rewritten earlier in the same sweep. Border cells are
/// never touched. A pass count of zero runs one sweep. Returns the number
/// of cell writes that changed a value, summed over all passes.
pub fn smooth(grid: &mut Grid, kernel: &Kernel, passes: usize) -> usize {
    let passes = passes.max(1);
    let mut changed = 0;
    for pass in 0..passes {
        let flipped = sweep(grid, kernel);
        debug!("Smoothing pass {}/{} flipped {} cells", pass + 1, passes, flipped);
        changed += flipped;
    }
    changed
}

/// One in-place sweep. Returns how many cells changed kind.
fn sweep(grid: &mut Grid, kernel: &Kernel) -> usize {
    let (width, height) = grid.dimensions();
    let mut flipped = 0;
    for x in 1..width.saturating_sub(1) {
        for y in 1..height.saturating_sub(1) {
            let kind = if neighbour_sum(grid, kernel, x, y) >= OPEN_THRESHOLD {
                TileKind::OPEN
            } else {
                TileKind::WALL
            };
            if grid.get(x, y) != kind {
                grid.set(x, y, kind);
                flipped += 1;
            }
        }
    }
    flipped
}

/// Weighted sum of the 3x3 neighbourhood around an interior cell.
pub fn neighbour_sum(grid: &Grid, kernel: &Kernel, x: usize, y: usize) -> i32 {
    let mut sum = 0;
    for dx in -1isize..=1 {
        for dy in -1isize..=1 {
            let nx = (x as isize + dx) as usize;
            let ny = (y as isize + dy) as usize;
            sum += grid.get(nx, ny).weight() * kernel.weight(dx, dy);
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{generate, GenerationConfig};

    fn open_interior(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height);
        for x in 1..width - 1 {
            for y in 1..height - 1 {
                grid.set(x, y, TileKind::OPEN);
            }
        }
        grid
    }

    #[test]
    fn test_fully_open_neighbourhood_stays_open() {
        // Cells whose eight neighbours are all open sum to 8. Only the four
        // interior corners touch five border walls (sum 3) and close.
        let mut grid = open_interior(12, 9);
        assert_eq!(neighbour_sum(&grid, &Kernel::default(), 5, 4), 8);
        assert_eq!(smooth(&mut grid, &Kernel::default(), 5), 4);

        for (x, y) in [(1, 1), (1, 7), (10, 1), (10, 7)] {
            assert_eq!(grid.get(x, y), TileKind::WALL);
        }
        assert_eq!(grid.count(TileKind::OPEN), 10 * 7 - 4);
    }

    #[test]
    fn test_settled_grid_is_a_fixed_point() {
        let mut grid = open_interior(12, 9);
        smooth(&mut grid, &Kernel::default(), 1);
        let settled = grid.clone();
        assert_eq!(smooth(&mut grid, &Kernel::default(), 3), 0);
        assert_eq!(grid, settled);
    }

    #[test]
    fn test_open_five_by_five_keeps_a_cross() {
        // fill 0 on a 5x5 map: the interior corners close, the cross stays open.
        let mut config = GenerationConfig::new(5, 5).with_seed("cross").with_fill_percent(0);
        let mut grid = generate(&mut config);
        assert_eq!(grid, open_interior(5, 5));

        smooth(&mut grid, &Kernel::default(), 1);
        assert_eq!(grid.to_string(), "#####\n##.##\n#...#\n##.##\n#####\n");
        assert!(grid.border_is_sealed());
    }

    #[test]
    fn test_wall_below_centre_sequential_update() {
        // Wall at (2, 3), directly below the centre (2, 2). Column-major order
        // closes (1, 1) (sum 3), then (1, 2) reads that fresh wall (sum 3),
        // then (1, 3) (sum 1) and (2, 1) (sum 3). By the time the centre is
        // visited five of its neighbours are walls and its sum is 3.
        let mut grid = open_interior(5, 5);
        grid.set(2, 3, TileKind::WALL);
        let snapshot = grid.clone();

        smooth(&mut grid, &Kernel::default(), 1);
        assert_eq!(grid.get(2, 2), TileKind::WALL);
        assert_eq!(grid.count(TileKind::OPEN), 0);

        // A frozen-snapshot sweep would have kept the centre open.
        assert_eq!(neighbour_sum(&snapshot, &Kernel::default(), 2, 2), 7);
        assert_eq!(neighbour_sum(&snapshot, &Kernel::default(), 1, 2), 4);
    }

    #[test]
    fn test_border_never_touched() {
        let mut config = GenerationConfig::new(30, 20).with_seed("border").with_fill_percent(45);
        let mut grid = generate(&mut config);
        smooth(&mut grid, &Kernel::default(), 4);
        assert!(grid.border_is_sealed());
    }

    #[test]
    fn test_zero_passes_runs_once() {
        let mut config = GenerationConfig::new(30, 20).with_seed("passes").with_fill_percent(45);
        let raw = generate(&mut config);

        let mut zero = raw.clone();
        let mut one = raw.clone();
        smooth(&mut zero, &Kernel::default(), 0);
        smooth(&mut one, &Kernel::default(), 1);
        assert_eq!(zero, one);
        assert_ne!(zero, raw);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let run = || {
            let mut config = GenerationConfig::new(40, 30).with_seed("determinism").with_fill_percent(48);
            let mut grid = generate(&mut config);
            smooth(&mut grid, &Kernel::default(), 3);
            grid
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_higher_kinds_contribute_their_value() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, TileKind(4));
        assert_eq!(neighbour_sum(&grid, &Kernel::default(), 1, 1), 4);
        smooth(&mut grid, &Kernel::default(), 1);
        assert_eq!(grid.get(1, 1), TileKind::OPEN);
    }

    #[test]
    fn test_tiny_grids_have_no_interior() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(smooth(&mut grid, &Kernel::default(), 3), 0);
        let mut line = Grid::new(1, 5);
        assert_eq!(smooth(&mut line, &Kernel::default(), 1), 0);
    }
}
