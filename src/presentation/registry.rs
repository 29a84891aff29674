// src/presentation/registry.rs

use crate::error::MapError;
use crate::map::TileKind;

/// What is currently on screen at one coordinate.
#[derive(Debug)]
pub struct Placed<H> {
    pub handle: H,
    pub kind: TileKind,
}

/// Per-coordinate bookkeeping of displayed tiles.
///
/// Empty until the first synchronisation sizes it; from then on the
/// dimensions are fixed and entries are only ever replaced in place.
#[derive(Debug)]
pub struct Registry<H> {
    dimensions: Option<(usize, usize)>,
    slots: Vec<Option<Placed<H>>>,
    created: usize,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Registry {
            dimensions: None,
            slots: Vec::new(),
            created: 0,
        }
    }
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    /// Sizes the registry on first use; afterwards only accepts the same size.
    pub fn ensure_sized(&mut self, width: usize, height: usize) -> Result<(), MapError> {
        match self.dimensions {
            None => {
                self.dimensions = Some((width, height));
                self.slots = (0..width * height).map(|_| None).collect();
                Ok(())
            }
            Some(expected) if expected == (width, height) => Ok(()),
            Some(expected) => Err(MapError::DimensionMismatch {
                expected,
                found: (width, height),
            }),
        }
    }

    /// Number of cells the registry expects to hold.
    pub fn total(&self) -> usize {
        self.slots.len()
    }

    /// Number of first-time placements made so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of coordinates currently holding a handle.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once every coordinate has been given a handle.
    pub fn is_populated(&self) -> bool {
        self.dimensions.is_some() && self.created == self.total()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Placed<H>> {
        self.index(x, y).and_then(|idx| self.slots[idx].as_ref())
    }

    /// Kind currently displayed at `(x, y)`, if anything is.
    pub fn displayed_kind(&self, x: usize, y: usize) -> Option<TileKind> {
        self.get(x, y).map(|placed| placed.kind)
    }

    /// Records a handle for an empty coordinate.
    pub(crate) fn insert(&mut self, x: usize, y: usize, handle: H, kind: TileKind) {
        if let Some(idx) = self.index(x, y) {
            debug_assert!(self.slots[idx].is_none(), "cell ({}, {}) already placed", x, y);
            self.slots[idx] = Some(Placed { handle, kind });
            self.created += 1;
        }
    }

    /// Swaps the handle at an occupied coordinate, returning the old one.
    pub(crate) fn replace(&mut self, x: usize, y: usize, handle: H, kind: TileKind) -> Option<H> {
        let idx = self.index(x, y)?;
        let slot = self.slots[idx].as_mut()?;
        slot.kind = kind;
        Some(std::mem::replace(&mut slot.handle, handle))
    }

    /// Iterates `(x, y, placed)` over occupied coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Placed<H>)> + '_ {
        let width = self.dimensions.map(|(w, _)| w).unwrap_or(1).max(1);
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(idx, slot)| slot.as_ref().map(|placed| (idx % width, idx / width, placed)))
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        let (width, height) = self.dimensions?;
        if x < width && y < height {
            Some(y * width + x)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry: Registry<u32> = Registry::new();
        assert!(registry.is_empty());
        assert!(!registry.is_populated());
        assert_eq!(registry.dimensions(), None);
        assert_eq!(registry.displayed_kind(0, 0), None);
    }

    #[test]
    fn test_sizing_is_fixed_after_first_call() {
        let mut registry: Registry<u32> = Registry::new();
        registry.ensure_sized(4, 3).unwrap();
        assert_eq!(registry.total(), 12);
        registry.ensure_sized(4, 3).unwrap();
        let err = registry.ensure_sized(5, 3).unwrap_err();
        assert!(matches!(
            err,
            MapError::DimensionMismatch { expected: (4, 3), found: (5, 3) }
        ));
    }

    #[test]
    fn test_population_and_replacement() {
        let mut registry: Registry<u32> = Registry::new();
        registry.ensure_sized(2, 1).unwrap();
        assert!(registry.is_empty());
        registry.insert(0, 0, 10, TileKind::WALL);
        assert!(!registry.is_empty());
        assert!(!registry.is_populated());
        registry.insert(1, 0, 11, TileKind::OPEN);
        assert!(registry.is_populated());
        assert_eq!(registry.len(), 2);

        let old = registry.replace(1, 0, 12, TileKind::WALL);
        assert_eq!(old, Some(11));
        assert_eq!(registry.displayed_kind(1, 0), Some(TileKind::WALL));
        assert_eq!(registry.get(1, 0).map(|p| p.handle), Some(12));
        assert_eq!(registry.created(), 2);
    }

    #[test]
    fn test_iter_reports_coordinates() {
        let mut registry: Registry<u32> = Registry::new();
        registry.ensure_sized(3, 2).unwrap();
        registry.insert(2, 1, 7, TileKind::OPEN);
        let entries: Vec<_> = registry.iter().map(|(x, y, p)| (x, y, p.handle)).collect();
        assert_eq!(entries, vec![(2, 1, 7)]);
    }
}
