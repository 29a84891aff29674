// src/generation/mod.rs
pub mod config;
pub mod generator;
pub mod regions;
pub mod seed;
pub mod smoothing;

pub use config::GenerationConfig;
pub use generator::generate;
pub use regions::{analyze, RegionStats};
pub use smoothing::smooth;
