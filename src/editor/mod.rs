// src/editor/mod.rs

mod cave_map;

pub use cave_map::{CaveMap, GenerationReport};
