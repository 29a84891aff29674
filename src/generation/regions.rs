// src/generation/regions.rs

use serde::Serialize;
use std::collections::HashMap;
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::map::{Grid, TileKind};

/// Summary of the 4-connected open areas of a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionStats {
    pub open_cells: usize,
    pub wall_cells: usize,
    pub region_count: usize,
    pub largest_region: usize,
}

/// Labels open cells into connected regions (up/down/left/right).
pub fn analyze(grid: &Grid) -> RegionStats {
    let (width, height) = grid.dimensions();
    let mut uf: QuickUnionUf<UnionBySize> = UnionFind::new(grid.len());
    let key = |x: usize, y: usize| y * width + x;

    for (x, y) in grid.positions() {
        if !grid.get(x, y).is_open() {
            continue;
        }
        if x + 1 < width && grid.get(x + 1, y).is_open() {
            uf.union(key(x, y), key(x + 1, y));
        }
        if y + 1 < height && grid.get(x, y + 1).is_open() {
            uf.union(key(x, y), key(x, y + 1));
        }
    }

    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for (x, y) in grid.positions() {
        if grid.get(x, y).is_open() {
            *sizes.entry(uf.find(key(x, y))).or_insert(0) += 1;
        }
    }

    let open_cells = sizes.values().sum();
    RegionStats {
        open_cells,
        wall_cells: grid.count(TileKind::WALL),
        region_count: sizes.len(),
        largest_region: sizes.values().copied().max().unwrap_or(0),
    }
}
