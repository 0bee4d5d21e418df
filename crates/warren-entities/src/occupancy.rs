use hashbrown::HashMap;

use warren_world::GridPos;

use crate::{Entity, EntityId};

/// Authoritative map from world cell to occupying entity. A cell maps to
/// at most one entity at any time; the index is always exactly the union
/// of the spawned entities' footprint cells.
#[derive(Default)]
pub struct OccupancyIndex {
    cells: HashMap<GridPos, EntityId>,
}

impl OccupancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_occupied(&self, cell: GridPos) -> bool {
        self.cells.contains_key(&cell)
    }

    #[inline]
    pub fn occupant(&self, cell: GridPos) -> Option<EntityId> {
        self.cells.get(&cell).copied()
    }

    /// Claims every footprint cell of `entity`, or nothing: if any cell is
    /// already occupied the index is left untouched and `false` is
    /// returned. Check and commit run back to back with no other mutation
    /// in between (single-writer tick discipline, no internal locking).
    pub fn try_add(&mut self, entity: &Entity) -> bool {
        for cell in entity.world_cells() {
            if self.cells.contains_key(&cell) {
                return false;
            }
        }
        for cell in entity.world_cells() {
            self.cells.insert(cell, entity.id);
        }
        true
    }

    /// Releases the entity's footprint cells. Only cells whose current
    /// occupant is exactly this entity are removed, so a stale reference
    /// cannot evict a later claimant.
    pub fn remove(&mut self, entity: &Entity) {
        for cell in entity.world_cells() {
            if self.cells.get(&cell) == Some(&entity.id) {
                self.cells.remove(&cell);
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
