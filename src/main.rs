#![warn(non_snake_case)]
//! # Cave Generator Entry Point
//!
//! Builds a cellular-automaton cave from a seed and either opens the egui
//! viewer (press `M` to regenerate) or, with `--headless`, prints the map and
//! a JSON generation report to stdout.
//!
//! ## License
//! Licensed under the MIT License.

use clap::Parser;
use log::info;
use std::error::Error;
use std::path::PathBuf;

use cavegen::editor::CaveMap;
use cavegen::generation::GenerationConfig;
use cavegen::presentation::scene::{ledger_tiles, LedgerScene};
use cavegen::presentation::Layout;

#[derive(Debug, Parser)]
#[command(name = "cavegen", about = "Deterministic cellular-automaton cave generator")]
struct Args {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Map height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Chance (0-100) that an interior cell starts as wall
    #[arg(long)]
    fill: Option<i32>,

    /// Seed token; the same seed always yields the same map
    #[arg(long)]
    seed: Option<String>,

    /// Ignore --seed and derive a fresh one from the clock
    #[arg(long)]
    random_seed: bool,

    /// Smoothing passes (values below 1 run one pass)
    #[arg(long)]
    passes: Option<i32>,

    /// Print the map instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Cells updated per frame when the viewer paces tile changes
    #[arg(long, default_value_t = 200)]
    cells_per_frame: usize,
}

impl Args {
    /// Base settings (file or defaults) with command-line overrides applied.
    fn generation_config(&self) -> Result<GenerationConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_path(path)?,
            None => GenerationConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fill) = self.fill {
            config.fill_percent = fill;
        }
        if let Some(seed) = &self.seed {
            config.seed = seed.clone();
        }
        if let Some(passes) = self.passes {
            config.passes = passes;
        }
        config.use_random_seed |= self.random_seed;
        config.normalize();
        config.validate()?;
        Ok(config)
    }
}

/// Runs one generation against an in-memory ledger and prints the result.
fn run_headless(config: GenerationConfig) -> Result<(), Box<dyn Error>> {
    let mut cave = CaveMap::new(config, ledger_tiles(2), LedgerScene::new(), Layout::default())?;
    let report = cave.regenerate()?;
    if let Some(grid) = cave.grid() {
        print!("{}", grid);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(feature = "gui")]
fn run_viewer(config: GenerationConfig, cells_per_frame: usize) -> Result<(), Box<dyn Error>> {
    use cavegen::ui::{default_tiles, run_main_window, PaintedScene};

    let mut cave = CaveMap::new(config, default_tiles(), PaintedScene::new(), Layout::default())?;
    // The first map is placed in one go; later ones may be paced.
    cave.regenerate_wrapper(false);
    run_main_window(cave, cells_per_frame)
}

#[cfg(not(feature = "gui"))]
fn run_viewer(config: GenerationConfig, _cells_per_frame: usize) -> Result<(), Box<dyn Error>> {
    info!("Built without the gui feature, falling back to headless output.");
    run_headless(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("cavegen starting...");

    let args = Args::parse();
    let config = args.generation_config()?;

    if args.headless {
        run_headless(config)?;
    } else {
        run_viewer(config, args.cells_per_frame)?;
    }

    info!("cavegen exiting.");
    Ok(())
}
