// src/generation/generator.rs

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::generation::{seed, GenerationConfig};
use crate::map::{Grid, TileKind};

/// Builds the raw (unsmoothed) grid for `config`.
///
/// The seed is resolved first and may be written back into `config`. One
/// draw in `0..100` is taken per cell in column-major order, border cells
/// included, so identical seeds and dimensions always give identical grids.
pub fn generate(config: &mut GenerationConfig) -> Grid {
    let seed_value = seed::expand(seed::resolve(config));
    info!(
        "Generating {}x{} grid, fill {}%, seed {:?} ({:#018x})",
        config.width,
        config.height,
        config.fill_threshold(),
        config.seed,
        seed_value
    );
    let mut rng = Pcg64Mcg::seed_from_u64(seed_value);
    fill(&mut rng, config.width, config.height, config.fill_threshold())
}

/// Fills a grid from an already seeded generator.
pub fn fill<R: Rng>(rng: &mut R, width: usize, height: usize, threshold: u32) -> Grid {
    let mut grid = Grid::new(width, height);
    for x in 0..width {
        for y in 0..height {
            let draw: u32 = rng.random_range(0..100);
            let kind = if grid.is_border(x, y) || draw < threshold {
                TileKind::WALL
            } else {
                TileKind::OPEN
            };
            grid.set(x, y, kind);
        }
    }
    debug!("Raw grid has {} open cells", grid.count(TileKind::OPEN));
    grid
}
