// src/presentation/sync.rs

use log::{debug, info};
use serde::Serialize;

use crate::error::MapError;
use crate::map::Grid;
use crate::presentation::{Layout, Placement, Registry, TileTable};

/// Lifecycle of the displayed tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncState {
    /// No tile has been placed yet, or the first sweep has not finished.
    Uninitialized,
    /// Every coordinate holds exactly one handle.
    Populated,
}

/// What one sweep did to the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// First-time placements.
    pub created: usize,
    /// Create-then-destroy swaps for cells whose kind changed.
    pub replaced: usize,
    /// Cells left alone because the displayed kind already matched.
    pub unchanged: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncProgress {
    /// No sweep is running.
    Idle,
    /// The sweep yielded with cells still to visit.
    Pending { remaining: usize },
    /// The sweep visited its last cell.
    Done(SyncStats),
}

#[derive(Debug)]
struct Sweep {
    target: Grid,
    cursor: usize,
    stats: SyncStats,
}

/// Keeps a persistent set of placed tiles in step with successive grids.
///
/// The first sweep places one tile per cell. Later sweeps compare each cell
/// against the kind the registry says is on screen and only touch cells
/// that differ. Sweeps can run in one go ([`Synchronizer::sync`]) or be
/// paced over several calls ([`Synchronizer::begin`] + [`Synchronizer::step`]).
#[derive(Debug)]
pub struct Synchronizer<H> {
    registry: Registry<H>,
    layout: Layout,
    sweep: Option<Sweep>,
    last: Option<SyncStats>,
}

impl<H> Synchronizer<H> {
    pub fn new(layout: Layout) -> Self {
        Synchronizer {
            registry: Registry::new(),
            layout,
            sweep: None,
            last: None,
        }
    }

    pub fn registry(&self) -> &Registry<H> {
        &self.registry
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> SyncState {
        if self.registry.is_populated() {
            SyncState::Populated
        } else {
            SyncState::Uninitialized
        }
    }

    pub fn is_idle(&self) -> bool {
        self.sweep.is_none()
    }

    /// Cells left in the running sweep, zero when idle.
    pub fn remaining(&self) -> usize {
        self.sweep
            .as_ref()
            .map(|sweep| sweep.target.len() - sweep.cursor)
            .unwrap_or(0)
    }

    /// Stats of the last finished sweep.
    pub fn last_stats(&self) -> Option<SyncStats> {
        self.last
    }

    /// Starts a sweep towards `grid`. Fails while another sweep is running
    /// or when `grid` does not match the registry's dimensions.
    pub fn begin(&mut self, grid: &Grid) -> Result<(), MapError> {
        if let Some(sweep) = &self.sweep {
            return Err(MapError::SyncInProgress {
                remaining: sweep.target.len() - sweep.cursor,
            });
        }
        if grid.is_empty() {
            return Err(MapError::InvalidDimensions {
                width: grid.width(),
                height: grid.height(),
            });
        }
        self.registry.ensure_sized(grid.width(), grid.height())?;
        debug!("Sync sweep started ({:?}, {} cells)", self.state(), grid.len());
        self.sweep = Some(Sweep {
            target: grid.clone(),
            cursor: 0,
            stats: SyncStats::default(),
        });
        Ok(())
    }

    /// Visits up to `budget` cells of the running sweep.
    ///
    /// Every visited cell is fully applied before the call returns, so the
    /// registry is consistent between steps. On error the failing cell is
    /// left unvisited and the sweep can be retried or cancelled.
    pub fn step<P>(&mut self, budget: usize, tiles: &TileTable<P::Descriptor>, placement: &mut P) -> Result<SyncProgress, MapError>
    where
        P: Placement<Handle = H>,
    {
        let Some(sweep) = self.sweep.as_mut() else {
            return Ok(SyncProgress::Idle);
        };
        let total = sweep.target.len();
        let (width, height) = sweep.target.dimensions();

        let mut visited = 0;
        while sweep.cursor < total && visited < budget {
            let (x, y) = sweep.target.position_at(sweep.cursor);
            let kind = sweep.target.get(x, y);
            match self.registry.displayed_kind(x, y) {
                Some(shown) if shown == kind => sweep.stats.unchanged += 1,
                Some(_) => {
                    let handle = placement.create(tiles.get(kind)?, self.layout.position(x, y, width, height));
                    if let Some(old) = self.registry.replace(x, y, handle, kind) {
                        placement.destroy(old);
                    }
                    sweep.stats.replaced += 1;
                }
                None => {
                    let handle = placement.create(tiles.get(kind)?, self.layout.position(x, y, width, height));
                    self.registry.insert(x, y, handle, kind);
                    sweep.stats.created += 1;
                    if self.registry.is_populated() {
                        info!("Tile registry populated with {} placeholders", self.registry.total());
                    }
                }
            }
            sweep.cursor += 1;
            visited += 1;
        }

        if sweep.cursor < total {
            return Ok(SyncProgress::Pending {
                remaining: total - sweep.cursor,
            });
        }

        let stats = sweep.stats;
        self.sweep = None;
        self.last = Some(stats);
        debug!(
            "Sync sweep finished: {} created, {} replaced, {} unchanged",
            stats.created, stats.replaced, stats.unchanged
        );
        Ok(SyncProgress::Done(stats))
    }

    /// Brings the scene in line with `grid` in a single call.
    ///
    /// A failed sweep is dropped rather than left pending; cells visited
    /// before the failure keep their new tiles.
    pub fn sync<P>(&mut self, grid: &Grid, tiles: &TileTable<P::Descriptor>, placement: &mut P) -> Result<SyncStats, MapError>
    where
        P: Placement<Handle = H>,
    {
        self.begin(grid)?;
        match self.step(usize::MAX, tiles, placement) {
            Ok(SyncProgress::Done(stats)) => Ok(stats),
            Ok(_) => Ok(self.last.unwrap_or_default()),
            Err(e) => {
                self.cancel();
                Err(e)
            }
        }
    }

    /// Abandons the running sweep. Cells already visited keep their new
    /// tiles; the rest keep what they showed before. Returns the partial stats.
    pub fn cancel(&mut self) -> Option<SyncStats> {
        let sweep = self.sweep.take()?;
        info!(
            "Sync sweep cancelled with {} of {} cells visited",
            sweep.cursor,
            sweep.target.len()
        );
        Some(sweep.stats)
    }
}
