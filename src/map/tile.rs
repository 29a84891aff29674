// src/map/tile.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile-kind index stored in every grid cell.
///
/// The value is an index into a tile table, so more than two kinds can be
/// represented. The generator and smoother only ever produce `WALL` and
/// `OPEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TileKind(pub u8);

impl TileKind {
    /// Solid cell. Every border cell holds this kind.
    pub const WALL: TileKind = TileKind(0);
    /// Walkable cell.
    pub const OPEN: TileKind = TileKind(1);

    /// Position of this kind in a tile table.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Numeric weight this kind contributes to a neighbour sum.
    pub fn weight(self) -> i32 {
        i32::from(self.0)
    }

    pub fn is_open(self) -> bool {
        self != TileKind::WALL
    }

    /// Glyph used by the text rendering of a grid.
    pub fn glyph(self) -> char {
        match self {
            TileKind::WALL => '#',
            TileKind::OPEN => '.',
            _ => '?',
        }
    }
}

impl From<u8> for TileKind {
    fn from(value: u8) -> Self {
        TileKind(value)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TileKind::WALL => write!(f, "wall"),
            TileKind::OPEN => write!(f, "open"),
            TileKind(other) => write!(f, "kind#{}", other),
        }
    }
}
