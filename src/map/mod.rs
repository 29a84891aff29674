// src/map/mod.rs
pub mod grid;
pub mod kernel;
pub mod tile;

pub use grid::Grid;
pub use kernel::Kernel;
pub use tile::TileKind;
