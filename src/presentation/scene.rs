// src/presentation/scene.rs
//
// The narrow boundary between the cave pipeline and whatever owns the
// visible objects. The pipeline only ever creates and destroys handles.

use log::trace;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::MapError;
use crate::map::TileKind;

/// A point in the host scene. `y` is the up axis; the grid lies in the x/z plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// External collaborator that owns visual objects.
///
/// Implementations are assumed to succeed; a failure that matters is the
/// host's business and is not recovered from here.
pub trait Placement {
    /// Whatever the host needs to instantiate one tile kind (a prefab, a colour...).
    type Descriptor;
    /// Opaque reference to a placed object.
    type Handle;

    fn create(&mut self, descriptor: &Self::Descriptor, position: WorldPosition) -> Self::Handle;
    fn destroy(&mut self, handle: Self::Handle);
}

/// Read-only mapping from tile-kind index to creation descriptor.
#[derive(Debug, Clone)]
pub struct TileTable<D> {
    descriptors: Vec<D>,
}

impl<D> TileTable<D> {
    /// `descriptors[k]` is used for cells of kind `k`.
    pub fn new(descriptors: Vec<D>) -> Self {
        TileTable { descriptors }
    }

    pub fn get(&self, kind: TileKind) -> Result<&D, MapError> {
        self.descriptors
            .get(kind.index())
            .ok_or(MapError::MissingTileKind { kind })
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Places the grid centred on `origin`, one `cell_size` step per cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub origin: WorldPosition,
    pub cell_size: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            origin: WorldPosition::default(),
            cell_size: 1.0,
        }
    }
}

impl Layout {
    /// World position of cell `(x, y)` in a `width x height` grid.
    pub fn position(&self, x: usize, y: usize, width: usize, height: usize) -> WorldPosition {
        WorldPosition {
            x: self.origin.x - width as f32 / 2.0 * self.cell_size + x as f32 * self.cell_size,
            y: self.origin.y,
            z: self.origin.z - height as f32 / 2.0 * self.cell_size + y as f32 * self.cell_size,
        }
    }
}

/// An in-memory scene that only keeps books: which objects are alive, where,
/// and how many were ever created or destroyed. Used by the headless runner.
#[derive(Debug, Default)]
pub struct LedgerScene {
    next_id: u64,
    live: HashMap<u64, (TileKind, WorldPosition)>,
    pub created: usize,
    pub destroyed: usize,
}

impl LedgerScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn kind_of(&self, handle: u64) -> Option<TileKind> {
        self.live.get(&handle).map(|(kind, _)| *kind)
    }

    pub fn position_of(&self, handle: u64) -> Option<WorldPosition> {
        self.live.get(&handle).map(|(_, pos)| *pos)
    }
}

impl Placement for LedgerScene {
    type Descriptor = TileKind;
    type Handle = u64;

    fn create(&mut self, descriptor: &TileKind, position: WorldPosition) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, (*descriptor, position));
        self.created += 1;
        trace!("ledger: create #{} {} at {:?}", id, descriptor, position);
        id
    }

    fn destroy(&mut self, handle: u64) {
        if self.live.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }
}

/// Tile table for [`LedgerScene`]: every kind describes itself.
pub fn ledger_tiles(kinds: u8) -> TileTable<TileKind> {
    TileTable::new((0..kinds).map(TileKind).collect())
}
