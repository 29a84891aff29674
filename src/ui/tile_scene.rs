// src/ui/tile_scene.rs

use egui::Color32;
use std::collections::HashMap;

use crate::map::TileKind;
use crate::presentation::{Placement, TileTable, WorldPosition};

/// How one tile kind is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileStyle {
    pub name: &'static str,
    pub color: Color32,
}

/// A placed tile as the viewer sees it.
#[derive(Debug, Clone, Copy)]
pub struct PaintedTile {
    pub position: WorldPosition,
    pub style: TileStyle,
    /// Frame counter value when the tile was created; used to flash fresh tiles.
    pub born: u64,
}

/// The viewer's scene graph: a flat set of painted tiles keyed by handle.
#[derive(Debug, Default)]
pub struct PaintedScene {
    next_id: u64,
    tiles: HashMap<u64, PaintedTile>,
    frame: u64,
    pub created: usize,
    pub destroyed: usize,
}

impl PaintedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &PaintedTile> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Called once per rendered frame.
    pub fn tick(&mut self) {
        self.frame += 1;
    }
}

impl Placement for PaintedScene {
    type Descriptor = TileStyle;
    type Handle = u64;

    fn create(&mut self, descriptor: &TileStyle, position: WorldPosition) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.tiles.insert(
            id,
            PaintedTile {
                position,
                style: *descriptor,
                born: self.frame,
            },
        );
        self.created += 1;
        id
    }

    fn destroy(&mut self, handle: u64) {
        if self.tiles.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}

/// Wall and floor styles, indexed by [`TileKind`].
pub fn default_tiles() -> TileTable<TileStyle> {
    let mut styles = vec![
        TileStyle {
            name: "wall",
            color: Color32::from_rgb(52, 48, 60),
        };
        2
    ];
    styles[TileKind::OPEN.index()] = TileStyle {
        name: "floor",
        color: Color32::from_rgb(196, 170, 120),
    };
    TileTable::new(styles)
}
