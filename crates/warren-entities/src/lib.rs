//! Entity definitions, footprint occupancy, and the entity catalog.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod footprint;
pub mod occupancy;

pub use catalog::{ChangeKind, EntityCatalog, OccupancyChange};
pub use footprint::Footprint;
pub use occupancy::OccupancyIndex;

use std::sync::Arc;

use warren_world::GridPos;

/// Opaque entity handle. Monotonically assigned, never reused within a
/// process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Occupancy semantics of an entity type, as bit flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OccupancyMask(u8);

impl OccupancyMask {
    pub const NONE: OccupancyMask = OccupancyMask(0);
    /// Blocks movement.
    pub const SOLID: OccupancyMask = OccupancyMask(1 << 0);
    /// Affects adjacency / room logic.
    pub const WALL: OccupancyMask = OccupancyMask(1 << 1);
    /// Can support other placements.
    pub const SUPPORT: OccupancyMask = OccupancyMask(1 << 2);
    /// Has interaction points.
    pub const INTERACTION: OccupancyMask = OccupancyMask(1 << 3);

    #[inline]
    pub fn contains(self, other: OccupancyMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for OccupancyMask {
    type Output = OccupancyMask;
    #[inline]
    fn bitor(self, rhs: OccupancyMask) -> OccupancyMask {
        OccupancyMask(self.0 | rhs.0)
    }
}

/// Immutable description of an entity type, shared by reference across all
/// instances of that type.
#[derive(Clone, Debug)]
pub struct EntityDef {
    pub name: String,
    pub footprint: Footprint,
    pub occupancy: OccupancyMask,
}

impl EntityDef {
    pub fn new(name: &str, footprint: Footprint, occupancy: OccupancyMask) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            footprint,
            occupancy,
        })
    }
}

/// A placed instance of an [`EntityDef`]. Owned by the catalog; the origin
/// moves only through [`Entity::set_origin`].
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub def: Arc<EntityDef>,
    origin: GridPos,
}

impl Entity {
    pub fn new(id: EntityId, def: Arc<EntityDef>, origin: GridPos) -> Self {
        Self { id, def, origin }
    }

    #[inline]
    pub fn origin(&self) -> GridPos {
        self.origin
    }

    pub fn set_origin(&mut self, cell: GridPos) {
        self.origin = cell;
    }

    /// World cells this instance occupies.
    pub fn world_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.def.footprint.world_cells(self.origin)
    }
}
