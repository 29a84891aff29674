// src/lib.rs

pub mod editor;
pub mod error;
pub mod generation;
pub mod map;
pub mod presentation;
#[cfg(feature = "gui")]
pub mod ui;
pub mod utils;

pub use editor::{CaveMap, GenerationReport};
pub use error::MapError;
pub use generation::GenerationConfig;
pub use map::{Grid, Kernel, TileKind};
