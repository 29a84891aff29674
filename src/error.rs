// src/error.rs

use thiserror::Error;

use crate::map::TileKind;

/// Failures surfaced by the cave pipeline.
///
/// Generation and smoothing never fail; everything here comes from the
/// presentation boundary, pipeline sequencing, or settings input.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("no tile descriptor registered for {kind}")]
    MissingTileKind { kind: TileKind },

    #[error("registry is sized {expected:?} but the grid is {found:?}; regenerating with new dimensions is unsupported")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("a synchronisation sweep is still running ({remaining} cells left)")]
    SyncInProgress { remaining: usize },

    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid settings: {0}")]
    Config(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
