/// Block type identifier. One byte keeps a chunk cell at one byte; id 0 is
/// always air (non-solid, never rendered).
pub type BlockId = u8;

pub const AIR: BlockId = 0;

/// Ids assigned by [`crate::BlockRegistry::builtin`]. Config-loaded
/// registries may lay ids out differently; resolve by name in that case.
pub mod builtin_ids {
    use super::BlockId;

    pub const COBBLE1: BlockId = 1;
    pub const COBBLE2: BlockId = 2;
    pub const COBBLE3: BlockId = 3;
    pub const COBBLE4: BlockId = 4;
    pub const LAID1: BlockId = 5;
    pub const LAID2: BlockId = 6;
    pub const STONE1: BlockId = 7;
    pub const STONE2: BlockId = 8;
    pub const GRID1: BlockId = 9;
    pub const GRID2: BlockId = 10;
    pub const GRID3: BlockId = 11;
    pub const GRASS: BlockId = 12;
    pub const DIRT1: BlockId = 13;
    pub const DIRT2: BlockId = 14;
    pub const LEAVES1: BlockId = 15;
    pub const LEAVES2: BlockId = 16;
}

/// Cardinal block face. The numeric value doubles as the index into
/// [`BlockDef::tiles`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    /// +Z
    North = 0,
    /// -Z
    South = 1,
    /// +X
    East = 2,
    /// -X
    West = 3,
    /// +Y
    Up = 4,
    /// -Y
    Down = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::North,
        Face::South,
        Face::East,
        Face::West,
        Face::Up,
        Face::Down,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::North => (0, 0, 1),
            Face::South => (0, 0, -1),
            Face::East => (1, 0, 0),
            Face::West => (-1, 0, 0),
            Face::Up => (0, 1, 0),
            Face::Down => (0, -1, 0),
        }
    }
}

/// Immutable description of one block type: solidity plus one atlas tile
/// index per face. Air's tiles are unused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockDef {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub tiles: [u16; 6],
}

impl BlockDef {
    pub fn air() -> Self {
        Self {
            id: AIR,
            name: "air".to_string(),
            solid: false,
            tiles: [0; 6],
        }
    }

    /// Solid block with the same tile on every face.
    pub fn solid_all_faces(id: BlockId, name: &str, tile: u16) -> Self {
        Self {
            id,
            name: name.to_string(),
            solid: true,
            tiles: [tile; 6],
        }
    }

    #[inline]
    pub fn tile(&self, face: Face) -> u16 {
        self.tiles[face.index()]
    }
}
