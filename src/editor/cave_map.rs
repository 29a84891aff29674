// src/editor/cave_map.rs

use log::{error, info, warn};
use serde::Serialize;

use crate::error::MapError;
use crate::generation::{self, seed, GenerationConfig, RegionStats};
use crate::map::{Grid, Kernel};
use crate::presentation::{Layout, Placement, SyncProgress, SyncState, SyncStats, Synchronizer, TileTable};

/// Everything worth knowing about one regeneration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// 1 for the first map of the process.
    pub generation: u64,
    pub seed: String,
    pub seed_value: u64,
    pub width: usize,
    pub height: usize,
    pub fill_percent: u32,
    pub passes: usize,
    /// Cell writes that changed a value during smoothing.
    pub smoothing_changes: usize,
    /// Cells that differ from the previous map (all cells for the first one).
    pub cells_changed: usize,
    pub regions: RegionStats,
    /// Filled in once the synchronisation sweep has finished.
    pub sync: Option<SyncStats>,
}

/// The generation pipeline: Generate, Smooth, then Sync onto a placement backend.
///
/// Owns the config, the current grid and the synchroniser. Regenerations
/// are serialised: a new one is refused while a paced sweep is still running.
pub struct CaveMap<P: Placement> {
    config: GenerationConfig,
    kernel: Kernel,
    grid: Option<Grid>,
    tiles: TileTable<P::Descriptor>,
    placement: P,
    synchronizer: Synchronizer<P::Handle>,
    generations: u64,
    last_report: Option<GenerationReport>,

    /// Messages or status for UI.
    pub status_message: String,
    pub error_message: Option<String>,
}

impl<P: Placement> CaveMap<P> {
    pub fn new(config: GenerationConfig, tiles: TileTable<P::Descriptor>, placement: P, layout: Layout) -> Result<Self, MapError> {
        config.validate()?;
        Ok(CaveMap {
            config,
            kernel: Kernel::default(),
            grid: None,
            tiles,
            placement,
            synchronizer: Synchronizer::new(layout),
            generations: 0,
            last_report: None,
            status_message: String::new(),
            error_message: None,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Settings may be edited between regenerations. Width and height are
    /// locked once the first map has been placed.
    pub fn config_mut(&mut self) -> &mut GenerationConfig {
        &mut self.config
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn set_kernel(&mut self, kernel: Kernel) {
        self.kernel = kernel;
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn placement(&self) -> &P {
        &self.placement
    }

    /// Host-side housekeeping on the placement backend. Tiles must only be
    /// created or destroyed through the synchroniser.
    pub fn placement_mut(&mut self) -> &mut P {
        &mut self.placement
    }

    pub fn synchronizer(&self) -> &Synchronizer<P::Handle> {
        &self.synchronizer
    }

    pub fn sync_state(&self) -> SyncState {
        self.synchronizer.state()
    }

    /// True when no sweep is pending and a regeneration may start.
    pub fn is_idle(&self) -> bool {
        self.synchronizer.is_idle()
    }

    /// Dimensions are fixed once the registry has been sized.
    pub fn dimensions_locked(&self) -> bool {
        self.synchronizer.registry().dimensions().is_some()
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// Generates, smooths and synchronises in one call.
    pub fn regenerate(&mut self) -> Result<GenerationReport, MapError> {
        let mut report = self.prepare()?;
        let grid = self.current_grid()?;
        let stats = self.synchronizer.sync(&grid, &self.tiles, &mut self.placement)?;
        report.sync = Some(stats);
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Generates and smooths, then starts a paced sweep. Drive it with [`CaveMap::advance`].
    pub fn regenerate_paced(&mut self) -> Result<GenerationReport, MapError> {
        let report = self.prepare()?;
        let grid = self.current_grid()?;
        self.synchronizer.begin(&grid)?;
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Runs up to `budget` cells of the pending sweep.
    pub fn advance(&mut self, budget: usize) -> Result<SyncProgress, MapError> {
        let progress = self.synchronizer.step(budget, &self.tiles, &mut self.placement)?;
        if let SyncProgress::Done(stats) = progress {
            if let Some(report) = self.last_report.as_mut() {
                report.sync = Some(stats);
            }
            self.status_message = format!(
                "Map #{} synced: {} placed, {} swapped",
                self.generations, stats.created, stats.replaced
            );
        }
        Ok(progress)
    }

    /// Abandons the pending sweep, if any.
    pub fn cancel_sync(&mut self) -> Option<SyncStats> {
        let partial = self.synchronizer.cancel();
        if partial.is_some() {
            self.status_message = "Tile update cancelled.".to_string();
        }
        partial
    }

    /// A convenience wrapper for the UI: regenerates (paced or not) and
    /// records the outcome in the status fields instead of returning it.
    pub fn regenerate_wrapper(&mut self, paced: bool) {
        let result = if paced {
            self.regenerate_paced()
        } else {
            self.regenerate()
        };
        match result {
            Ok(report) => {
                self.status_message = format!(
                    "Map #{} from seed {:?}: {} regions, {} cells changed",
                    report.generation, report.seed, report.regions.region_count, report.cells_changed
                );
                self.error_message = None;
            }
            Err(MapError::SyncInProgress { remaining }) => {
                warn!("Regeneration ignored, {} cells still updating", remaining);
                self.status_message = format!("Still updating tiles ({} left)...", remaining);
            }
            Err(e) => {
                error!("Regeneration failed: {}", e);
                self.error_message = Some(format!("Regeneration failed: {}", e));
            }
        }
    }

    /// Generate and smooth a new grid, replacing the current one.
    fn prepare(&mut self) -> Result<GenerationReport, MapError> {
        if !self.synchronizer.is_idle() {
            return Err(MapError::SyncInProgress {
                remaining: self.synchronizer.remaining(),
            });
        }
        self.config.validate()?;
        if let Some(expected) = self.synchronizer.registry().dimensions() {
            let found = (self.config.width, self.config.height);
            if expected != found {
                return Err(MapError::DimensionMismatch { expected, found });
            }
        }

        let mut grid = generation::generate(&mut self.config);
        let passes = self.config.pass_count();
        let smoothing_changes = generation::smooth(&mut grid, &self.kernel, passes);
        let regions = generation::analyze(&grid);
        let cells_changed = match &self.grid {
            Some(previous) => previous.diff_count(&grid),
            None => grid.len(),
        };

        self.generations += 1;
        info!(
            "Map #{} ready: {} open cells in {} regions (largest {})",
            self.generations, regions.open_cells, regions.region_count, regions.largest_region
        );

        let report = GenerationReport {
            generation: self.generations,
            seed: self.config.seed.clone(),
            seed_value: seed::expand(&self.config.seed),
            width: grid.width(),
            height: grid.height(),
            fill_percent: self.config.fill_threshold(),
            passes,
            smoothing_changes,
            cells_changed,
            regions,
            sync: None,
        };
        self.grid = Some(grid);
        Ok(report)
    }

    fn current_grid(&self) -> Result<Grid, MapError> {
        self.grid.clone().ok_or(MapError::InvalidDimensions {
            width: self.config.width,
            height: self.config.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileKind;
    use crate::presentation::scene::{ledger_tiles, LedgerScene};

    fn cave(config: GenerationConfig) -> CaveMap<LedgerScene> {
        CaveMap::new(config, ledger_tiles(2), LedgerScene::new(), Layout::default()).unwrap()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = CaveMap::new(GenerationConfig::new(0, 10), ledger_tiles(2), LedgerScene::new(), Layout::default());
        assert!(matches!(result, Err(MapError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_first_regeneration_places_every_tile() {
        let mut map = cave(GenerationConfig::new(20, 12).with_seed("first").with_fill_percent(45));
        let report = map.regenerate().unwrap();

        assert_eq!(report.generation, 1);
        assert_eq!(report.cells_changed, 240);
        assert_eq!(report.sync.map(|s| s.created), Some(240));
        assert_eq!(map.sync_state(), SyncState::Populated);
        assert_eq!(map.placement().live_count(), 240);
        assert!(map.grid().unwrap().border_is_sealed());
    }

    #[test]
    fn test_same_seed_twice_changes_nothing() {
        let mut map = cave(GenerationConfig::new(20, 12).with_seed("steady").with_fill_percent(45));
        map.regenerate().unwrap();
        let report = map.regenerate().unwrap();

        assert_eq!(report.cells_changed, 0);
        assert_eq!(report.sync, Some(SyncStats { created: 0, replaced: 0, unchanged: 240 }));
        assert_eq!(map.placement().created, 240);
        assert_eq!(map.placement().destroyed, 0);
    }

    #[test]
    fn test_new_seed_patches_only_differences() {
        let mut map = cave(GenerationConfig::new(30, 20).with_seed("alpha").with_fill_percent(45));
        map.regenerate().unwrap();
        let before = map.grid().unwrap().clone();

        map.config_mut().seed = "beta".to_string();
        let report = map.regenerate().unwrap();
        let after = map.grid().unwrap().clone();

        let k = before.diff_count(&after);
        assert_eq!(report.cells_changed, k);
        assert_eq!(report.sync.map(|s| s.replaced), Some(k));
        assert_eq!(map.placement().destroyed, k);
        assert_eq!(map.placement().live_count(), 600);

        let registry = map.synchronizer().registry();
        for (x, y) in after.positions() {
            let placed = registry.get(x, y).unwrap();
            assert_eq!(placed.kind, after.get(x, y));
            assert_eq!(map.placement().kind_of(placed.handle), Some(after.get(x, y)));
        }
    }

    #[test]
    fn test_random_seed_is_written_back() {
        let mut config = GenerationConfig::new(10, 10);
        config.use_random_seed = true;
        let mut map = cave(config);
        let report = map.regenerate().unwrap();
        assert!(!report.seed.is_empty());
        assert_eq!(map.config().seed, report.seed);
        assert_eq!(report.seed_value, seed::expand(&report.seed));
    }

    #[test]
    fn test_paced_regeneration_is_serialised() {
        let mut map = cave(GenerationConfig::new(10, 10).with_seed("paced").with_fill_percent(45));
        map.regenerate_paced().unwrap();
        assert!(!map.is_idle());
        assert!(map.last_report().unwrap().sync.is_none());

        assert!(matches!(map.advance(30).unwrap(), SyncProgress::Pending { remaining: 70 }));
        assert!(matches!(map.regenerate(), Err(MapError::SyncInProgress { remaining: 70 })));
        assert_eq!(map.generations(), 1);

        while !matches!(map.advance(30).unwrap(), SyncProgress::Done(_)) {}
        assert!(map.is_idle());
        assert_eq!(map.last_report().unwrap().sync.map(|s| s.created), Some(100));
        assert!(map.regenerate().is_ok());
    }

    #[test]
    fn test_wrapper_reports_busy_without_error() {
        let mut map = cave(GenerationConfig::new(10, 10).with_seed("busy"));
        map.regenerate_wrapper(true);
        map.regenerate_wrapper(true);
        assert!(map.error_message.is_none());
        assert!(map.status_message.starts_with("Still updating"));
    }

    #[test]
    fn test_resize_after_population_is_refused() {
        let mut map = cave(GenerationConfig::new(10, 10).with_seed("resize"));
        map.regenerate().unwrap();
        assert!(map.dimensions_locked());
        map.config_mut().width = 12;
        assert!(matches!(map.regenerate(), Err(MapError::DimensionMismatch { .. })));
        assert_eq!(map.generations(), 1);
    }

    #[test]
    fn test_cancel_then_regenerate() {
        let mut map = cave(GenerationConfig::new(8, 8).with_seed("cancel"));
        map.regenerate_paced().unwrap();
        map.advance(10).unwrap();
        assert_eq!(map.cancel_sync().map(|s| s.created), Some(10));
        assert!(map.is_idle());

        let report = map.regenerate().unwrap();
        assert_eq!(report.sync.map(|s| s.created), Some(54));
        assert_eq!(map.sync_state(), SyncState::Populated);
        assert_eq!(map.placement().live_count(), 64);
    }

    #[test]
    fn test_failed_regeneration_does_not_block_the_next() {
        // Only a wall descriptor: the first open cell fails the sweep.
        let mut map = CaveMap::new(
            GenerationConfig::new(10, 8).with_seed("short").with_fill_percent(0),
            ledger_tiles(1),
            LedgerScene::new(),
            Layout::default(),
        )
        .unwrap();
        assert!(matches!(map.regenerate(), Err(MapError::MissingTileKind { kind: TileKind::OPEN })));
        assert!(map.is_idle());

        map.config_mut().fill_percent = 100;
        let report = map.regenerate().unwrap();
        // Column 0 and (1, 0) were placed before the failure.
        assert_eq!(report.sync.map(|s| s.created), Some(80 - 9));
        assert_eq!(map.sync_state(), SyncState::Populated);
        assert_eq!(map.placement().live_count(), 80);
    }

    #[test]
    fn test_custom_kernel_drives_smoothing() {
        let mut map = cave(GenerationConfig::new(8, 8).with_seed("kernel").with_fill_percent(0));
        assert_eq!(*map.kernel(), Kernel::moore());
        map.set_kernel(Kernel::new([[0; 3]; 3]));
        map.regenerate().unwrap();
        // No neighbour counts, so every interior cell closes.
        assert_eq!(map.grid().unwrap().count(TileKind::OPEN), 0);
    }

    #[test]
    fn test_report_serialises() {
        let mut map = cave(GenerationConfig::new(6, 6).with_seed("json").with_fill_percent(0));
        let report = map.regenerate().unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "json");
        assert_eq!(json["width"], 6);
        assert_eq!(json["sync"]["created"], 36);
        assert_eq!(map.grid().unwrap().count(TileKind::WALL) + report.regions.open_cells, 36);
    }
}
