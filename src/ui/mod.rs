// src/ui/mod.rs
pub mod central_panel;
pub mod main_window;
pub mod side_panel;
pub mod status_bar;
pub mod tile_scene;

pub use main_window::{run_main_window, MainWindow};
pub use tile_scene::{default_tiles, PaintedScene, TileStyle};
