//! Entity placement validation against terrain and occupancy.
#![forbid(unsafe_code)]

use std::sync::Arc;

use warren_blocks::BlockRegistry;
use warren_chunk::WorldIndex;
use warren_entities::{EntityCatalog, EntityDef, EntityId};
use warren_world::GridPos;

/// Validates and commits entity placement. Borrows the terrain side
/// read-only; spawning goes through the catalog so occupancy and entity
/// state stay transactional.
pub struct PlacementService<'a> {
    world: &'a WorldIndex,
    reg: &'a BlockRegistry,
}

impl<'a> PlacementService<'a> {
    pub fn new(world: &'a WorldIndex, reg: &'a BlockRegistry) -> Self {
        Self { world, reg }
    }

    /// A placement is allowed when no footprint cell is occupied by
    /// another entity and none sits inside solid terrain. Cells in
    /// missing chunks (or above/below the chunk slab) read as air, so the
    /// terrain rule passes there; the occupancy check is what guards
    /// world edges.
    pub fn can_place(&self, catalog: &EntityCatalog, def: &EntityDef, origin: GridPos) -> bool {
        for cell in def.footprint.world_cells(origin) {
            if catalog.occupancy().is_occupied(cell) {
                return false;
            }
        }
        for cell in def.footprint.world_cells(origin) {
            if self.reg.is_solid(self.world.block_at(cell)) {
                return false;
            }
        }
        true
    }

    /// Validates, then spawns. The spawn itself re-checks occupancy, so a
    /// conflicting mutation between the two steps still fails cleanly.
    pub fn try_place(
        &self,
        catalog: &mut EntityCatalog,
        def: &Arc<EntityDef>,
        origin: GridPos,
    ) -> Option<EntityId> {
        if !self.can_place(catalog, def, origin) {
            log::debug!(target: "place", "placement of '{}' at {:?} rejected", def.name, origin);
            return None;
        }
        catalog.try_spawn(Arc::clone(def), origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_entities::{Footprint, OccupancyMask};
    use warren_world::ChunkCoord;

    fn table_def() -> Arc<EntityDef> {
        EntityDef::new("table", Footprint::box_size(2, 1, 2), OccupancyMask::SOLID)
    }

    fn flat_world() -> (WorldIndex, BlockRegistry) {
        let mut world = WorldIndex::new();
        let reg = BlockRegistry::builtin();
        let stone = reg.id_by_name("stone1").unwrap();
        world.get_or_create(ChunkCoord::new(0, 0)).fill_bottom(4, stone);
        (world, reg)
    }

    #[test]
    fn placement_inside_solid_terrain_fails() {
        let (world, reg) = flat_world();
        let svc = PlacementService::new(&world, &reg);
        let catalog = EntityCatalog::new();
        let def = table_def();
        assert!(!svc.can_place(&catalog, &def, GridPos::new(1, 3, 1)));
        assert!(svc.can_place(&catalog, &def, GridPos::new(1, 4, 1)));
    }

    #[test]
    fn overlapping_placement_fails_without_partial_effects() {
        let (world, reg) = flat_world();
        let svc = PlacementService::new(&world, &reg);
        let mut catalog = EntityCatalog::new();
        let def = table_def();
        let first = svc
            .try_place(&mut catalog, &def, GridPos::new(0, 4, 0))
            .expect("first placement");
        assert!(svc.try_place(&mut catalog, &def, GridPos::new(1, 4, 1)).is_none());
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.occupancy().occupant(GridPos::new(1, 4, 1)),
            Some(first)
        );
    }

    #[test]
    fn missing_chunks_read_as_air_and_permit_placement() {
        let (world, reg) = flat_world();
        let svc = PlacementService::new(&world, &reg);
        let catalog = EntityCatalog::new();
        // Chunk (100, 100) was never created.
        assert!(svc.can_place(&catalog, &table_def(), GridPos::new(3200, 0, 3200)));
    }

    #[test]
    fn negative_world_cells_map_to_the_right_chunk() {
        let mut world = WorldIndex::new();
        let reg = BlockRegistry::builtin();
        let stone = reg.id_by_name("stone2").unwrap();
        // Solid cell at world (-1, 0, -1), which lives in chunk (-1, -1).
        world
            .get_or_create(ChunkCoord::new(-1, -1))
            .set(31, 0, 31, stone);
        let svc = PlacementService::new(&world, &reg);
        let catalog = EntityCatalog::new();
        let def = EntityDef::new("peg", Footprint::single(), OccupancyMask::SOLID);
        assert!(!svc.can_place(&catalog, &def, GridPos::new(-1, 0, -1)));
        assert!(svc.can_place(&catalog, &def, GridPos::new(-2, 0, -1)));
    }
}
