// src/generation/config.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::MapError;
use crate::utils::util::clamp;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 60;
pub const DEFAULT_FILL_PERCENT: i32 = 60;

/// Settings for one generation cycle.
///
/// Fields are public so a settings panel or CLI can edit them between
/// regenerations. Out-of-range values are tolerated here and normalised by
/// [`GenerationConfig::fill_threshold`] and [`GenerationConfig::pass_count`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    /// Chance, in percent, that an interior cell starts as wall.
    pub fill_percent: i32,
    /// Seed token. Empty means "derive one from the clock".
    pub seed: String,
    /// Always derive a fresh seed, ignoring `seed`.
    pub use_random_seed: bool,
    /// Smoothing passes; anything below 1 runs one pass.
    pub passes: i32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_percent: DEFAULT_FILL_PERCENT,
            seed: String::new(),
            use_random_seed: false,
            passes: 1,
        }
    }
}

impl GenerationConfig {
    pub fn new(width: usize, height: usize) -> Self {
        GenerationConfig {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self.use_random_seed = false;
        self
    }

    pub fn with_fill_percent(mut self, fill_percent: i32) -> Self {
        self.fill_percent = fill_percent;
        self
    }

    pub fn with_passes(mut self, passes: i32) -> Self {
        self.passes = passes;
        self
    }

    /// Fill probability clamped to `0..=100`.
    pub fn fill_threshold(&self) -> u32 {
        clamp(self.fill_percent, 0, 100) as u32
    }

    /// Smoothing pass count, at least 1.
    pub fn pass_count(&self) -> usize {
        self.passes.max(1) as usize
    }

    /// True when generation must derive a fresh seed.
    pub fn wants_fresh_seed(&self) -> bool {
        self.use_random_seed || self.seed.is_empty()
    }

    /// Rewrites out-of-range values in place.
    pub fn normalize(&mut self) {
        self.fill_percent = self.fill_threshold() as i32;
        self.passes = self.pass_count() as i32;
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Parses JSON settings; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        let mut config: GenerationConfig = serde_json::from_str(text)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Reads JSON settings from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MapError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_map() {
        let config = GenerationConfig::default();
        assert_eq!((config.width, config.height), (100, 60));
        assert_eq!(config.fill_threshold(), 60);
        assert_eq!(config.pass_count(), 1);
        assert!(config.wants_fresh_seed());
    }

    #[test]
    fn test_fill_is_clamped() {
        assert_eq!(GenerationConfig::default().with_fill_percent(-20).fill_threshold(), 0);
        assert_eq!(GenerationConfig::default().with_fill_percent(250).fill_threshold(), 100);
        assert_eq!(GenerationConfig::default().with_fill_percent(100).fill_threshold(), 100);
    }

    #[test]
    fn test_non_positive_passes_run_once() {
        assert_eq!(GenerationConfig::default().with_passes(0).pass_count(), 1);
        assert_eq!(GenerationConfig::default().with_passes(-3).pass_count(), 1);
        assert_eq!(GenerationConfig::default().with_passes(4).pass_count(), 4);
    }

    #[test]
    fn test_normalize_rewrites_fields() {
        let mut config = GenerationConfig::default().with_fill_percent(140).with_passes(0);
        config.normalize();
        assert_eq!(config.fill_percent, 100);
        assert_eq!(config.passes, 1);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GenerationConfig::from_json(r#"{ "width": 40, "seed": "abc", "passes": -1 }"#).unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.seed, "abc");
        assert_eq!(config.passes, 1);
        assert!(!config.wants_fresh_seed());
    }

    #[test]
    fn test_from_json_rejects_zero_width() {
        let err = GenerationConfig::from_json(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, MapError::InvalidDimensions { width: 0, .. }));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = GenerationConfig::from_path("/nonexistent/cavegen-settings.json").unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(GenerationConfig::from_json("not json"), Err(MapError::Config(_))));
    }
}
