use std::collections::VecDeque;
use std::sync::Arc;

use hashbrown::HashMap;

use warren_world::GridPos;

use crate::{Entity, EntityDef, EntityId, OccupancyIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Spawned,
    Despawned,
}

/// Occupancy-change record for external consumers (presentation sync and
/// the like). Pulled from the catalog's outbound queue; no callbacks run
/// during mutation.
#[derive(Clone, Debug)]
pub struct OccupancyChange {
    pub kind: ChangeKind,
    pub id: EntityId,
    pub def: Arc<EntityDef>,
    pub origin: GridPos,
}

/// Owns all spawned entities and their occupancy index; the two mutate
/// together in every spawn/despawn so they can never desync.
#[derive(Default)]
pub struct EntityCatalog {
    next_id: u32,
    entities: HashMap<EntityId, Entity>,
    occupancy: OccupancyIndex,
    changes: VecDeque<OccupancyChange>,
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entities: HashMap::new(),
            occupancy: OccupancyIndex::new(),
            changes: VecDeque::new(),
        }
    }

    #[inline]
    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// All spawned entities, unspecified order.
    pub fn all(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Allocates a fresh id and claims the footprint. On an occupancy
    /// conflict nothing is registered; the id counter may still advance
    /// (ids need not be dense).
    pub fn try_spawn(&mut self, def: Arc<EntityDef>, origin: GridPos) -> Option<EntityId> {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let entity = Entity::new(id, def, origin);
        if !self.occupancy.try_add(&entity) {
            log::debug!(target: "entities", "spawn of '{}' at {:?} rejected: occupied", entity.def.name, origin);
            return None;
        }
        log::debug!(target: "entities", "spawned '{}' #{} at {:?}", entity.def.name, id, origin);
        self.changes.push_back(OccupancyChange {
            kind: ChangeKind::Spawned,
            id,
            def: Arc::clone(&entity.def),
            origin,
        });
        self.entities.insert(id, entity);
        Some(id)
    }

    /// Releases occupancy and removes the entity. Unknown ids return
    /// `false`.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.remove(&id) else {
            return false;
        };
        self.occupancy.remove(&entity);
        log::debug!(target: "entities", "despawned '{}' #{}", entity.def.name, id);
        self.changes.push_back(OccupancyChange {
            kind: ChangeKind::Despawned,
            id,
            def: Arc::clone(&entity.def),
            origin: entity.origin(),
        });
        true
    }

    /// Next unread occupancy-change record, if any. The catalog stays
    /// correct whether or not anyone drains these.
    pub fn poll_change(&mut self) -> Option<OccupancyChange> {
        self.changes.pop_front()
    }

    pub fn drain_changes(&mut self) -> Vec<OccupancyChange> {
        self.changes.drain(..).collect()
    }

    /// Discards all unread change records. Embedders with no presentation
    /// consumer call this periodically so the queue cannot grow without
    /// bound.
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Footprint, OccupancyMask};

    fn crate_def() -> Arc<EntityDef> {
        EntityDef::new("crate", Footprint::box_size(2, 1, 2), OccupancyMask::SOLID)
    }

    #[test]
    fn spawn_then_overlapping_spawn_fails() {
        let mut cat = EntityCatalog::new();
        let first = cat.try_spawn(crate_def(), GridPos::ZERO).expect("spawn");
        assert!(cat.try_spawn(crate_def(), GridPos::new(1, 0, 1)).is_none());
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.occupancy().occupant(GridPos::ZERO), Some(first));
    }

    #[test]
    fn despawn_releases_cells_and_reports_unknown_ids() {
        let mut cat = EntityCatalog::new();
        let id = cat.try_spawn(crate_def(), GridPos::ZERO).expect("spawn");
        assert!(cat.despawn(id));
        assert!(cat.occupancy().is_empty());
        assert!(!cat.despawn(id));
        assert!(!cat.despawn(EntityId(999)));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut cat = EntityCatalog::new();
        let a = cat.try_spawn(crate_def(), GridPos::ZERO).expect("spawn");
        cat.despawn(a);
        let b = cat.try_spawn(crate_def(), GridPos::ZERO).expect("spawn");
        assert_ne!(a, b);
    }

    #[test]
    fn change_queue_records_spawn_and_despawn_in_order() {
        let mut cat = EntityCatalog::new();
        let id = cat.try_spawn(crate_def(), GridPos::new(3, 0, 3)).unwrap();
        cat.despawn(id);
        let changes = cat.drain_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ChangeKind::Spawned);
        assert_eq!(changes[1].kind, ChangeKind::Despawned);
        assert_eq!(changes[1].id, id);
        assert!(cat.poll_change().is_none());
    }

    #[test]
    fn clear_changes_discards_unread_records_only() {
        let mut cat = EntityCatalog::new();
        let id = cat.try_spawn(crate_def(), GridPos::ZERO).unwrap();
        cat.try_spawn(crate_def(), GridPos::new(4, 0, 0)).unwrap();
        cat.clear_changes();
        assert!(cat.poll_change().is_none());
        // The catalog itself is untouched.
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.occupancy().occupant(GridPos::ZERO), Some(id));
        // New records accrue normally afterwards.
        cat.despawn(id);
        assert_eq!(cat.drain_changes().len(), 1);
    }

    #[test]
    fn failed_spawn_emits_no_change_record() {
        let mut cat = EntityCatalog::new();
        cat.try_spawn(crate_def(), GridPos::ZERO).unwrap();
        cat.drain_changes();
        assert!(cat.try_spawn(crate_def(), GridPos::ZERO).is_none());
        assert!(cat.poll_change().is_none());
    }
}
