//! World-space coordinates, chunk dimensions, and terrain parameters.
#![forbid(unsafe_code)]

pub mod terrain;

pub use terrain::{TerrainConfig, TerrainParams};

/// Chunk dimensions, fixed for the process. A chunk is a 32x16x32 slab
/// addressed by a 2D chunk coordinate; the vertical axis is not chunked.
pub const CHUNK_SIZE_X: usize = 32;
pub const CHUNK_SIZE_Y: usize = 16;
pub const CHUNK_SIZE_Z: usize = 32;

/// 2D chunk-grid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// World-space x of this chunk's first column.
    #[inline]
    pub fn base_x(self) -> i32 {
        self.cx * CHUNK_SIZE_X as i32
    }

    /// World-space z of this chunk's first column.
    #[inline]
    pub fn base_z(self) -> i32 {
        self.cz * CHUNK_SIZE_Z as i32
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    /// Chunk containing the given world cell (floor division, so negative
    /// coordinates map correctly).
    #[inline]
    pub fn containing(cell: GridPos) -> Self {
        Self {
            cx: cell.x.div_euclid(CHUNK_SIZE_X as i32),
            cz: cell.z.div_euclid(CHUNK_SIZE_Z as i32),
        }
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// Integer world-cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    pub const ZERO: GridPos = GridPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    #[inline]
    pub fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    #[inline]
    pub fn down(self) -> Self {
        self.offset(0, -1, 0)
    }
}

impl std::ops::Add for GridPos {
    type Output = GridPos;
    #[inline]
    fn add(self, rhs: GridPos) -> GridPos {
        GridPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
