//! Dense chunk voxel storage, terrain generation, and the lazy world index.
#![forbid(unsafe_code)]

use hashbrown::HashMap;

use warren_blocks::types::{AIR, BlockId};
use warren_world::terrain::TerrainParams;
use warren_world::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkCoord, GridPos};

const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Fixed-size voxel slab addressed by a 2D chunk coordinate. Out-of-range
/// reads return air; out-of-range writes are no-ops.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    blocks: Vec<BlockId>,
}

impl Chunk {
    /// New chunk, all air.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![AIR; CHUNK_VOLUME],
        }
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (x as u32) < CHUNK_SIZE_X as u32
            && (y as u32) < CHUNK_SIZE_Y as u32
            && (z as u32) < CHUNK_SIZE_Z as u32
    }

    // Flattened layout: x varies fastest, then z, then y.
    #[inline]
    fn idx(x: usize, y: usize, z: usize) -> usize {
        x + CHUNK_SIZE_X * (z + CHUNK_SIZE_Z * y)
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockId {
        if !Self::in_bounds(x, y, z) {
            return AIR;
        }
        self.blocks[Self::idx(x as usize, y as usize, z as usize)]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        if !Self::in_bounds(x, y, z) {
            return;
        }
        self.blocks[Self::idx(x as usize, y as usize, z as usize)] = id;
    }

    pub fn fill(&mut self, id: BlockId) {
        self.blocks.fill(id);
    }

    /// Fills all layers strictly below `bottom_y_exclusive`.
    pub fn fill_bottom(&mut self, bottom_y_exclusive: i32, id: BlockId) {
        let top = bottom_y_exclusive.clamp(0, CHUNK_SIZE_Y as i32);
        for y in 0..top {
            for z in 0..CHUNK_SIZE_Z as i32 {
                for x in 0..CHUNK_SIZE_X as i32 {
                    self.set(x, y, z, id);
                }
            }
        }
    }

    /// Clears everything strictly above `max_y_inclusive` to air.
    pub fn chop_above_y(&mut self, max_y_inclusive: i32) {
        let max_y = max_y_inclusive.clamp(-1, CHUNK_SIZE_Y as i32 - 1);
        for y in (max_y + 1)..CHUNK_SIZE_Y as i32 {
            for z in 0..CHUNK_SIZE_Z as i32 {
                for x in 0..CHUNK_SIZE_X as i32 {
                    self.set(x, y, z, AIR);
                }
            }
        }
    }

    /// Topmost non-air cell of a local column, if any.
    pub fn top_non_air(&self, x: i32, z: i32) -> Option<i32> {
        (0..CHUNK_SIZE_Y as i32).rev().find(|&y| self.get(x, y, z) != AIR)
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|&b| b == AIR)
    }

    /// Raw cell array, for determinism diffs and bulk consumers.
    #[inline]
    pub fn cells(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Deterministic heightfield fill. Every chunk built from the same
    /// params samples one continuous world-space noise field, so adjacent
    /// chunks share edge heights. Per column, from the surface down: one
    /// surface block, two near-surface layers in a per-column variant, and
    /// a deep band split at its midpoint.
    pub fn generate_terrain(&mut self, params: &TerrainParams) {
        let noise = params.make_noise();
        for x in 0..CHUNK_SIZE_X as i32 {
            for z in 0..CHUNK_SIZE_Z as i32 {
                let wx = self.coord.base_x() + x;
                let wz = self.coord.base_z() + z;
                let h = params.column_height(&noise, wx, wz);
                let near = params.near_surface_variant(wx, wz);

                // Deep band: top index h-3, split in half; the lower half
                // takes deep_low, the upper deep_high.
                let deep_top = h - 3;
                let deep_split = if deep_top >= 0 { deep_top / 2 } else { -1 };

                for y in 0..CHUNK_SIZE_Y as i32 {
                    let id = if y > h {
                        AIR
                    } else if y == h {
                        params.surface
                    } else if y >= h - 2 {
                        near
                    } else if deep_top < 0 {
                        // Very low columns have no room for the split band.
                        params.deep_high
                    } else if y <= deep_split {
                        params.deep_low
                    } else {
                        params.deep_high
                    };
                    self.set(x, y, z, id);
                }
            }
        }
    }
}

/// Lazily-populated map of chunk coordinate to chunk.
#[derive(Default)]
pub struct WorldIndex {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl WorldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, coord: ChunkCoord) -> &mut Chunk {
        self.chunks
            .entry(coord)
            .or_insert_with(|| Chunk::new(coord))
    }

    pub fn try_get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn try_get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// All known chunks, unspecified order.
    pub fn all(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Terrain block at a world cell. A missing chunk or out-of-bounds
    /// local cell reads as air.
    pub fn block_at(&self, cell: GridPos) -> BlockId {
        let coord = ChunkCoord::containing(cell);
        let Some(chunk) = self.try_get(coord) else {
            return AIR;
        };
        let lx = cell.x - coord.base_x();
        let lz = cell.z - coord.base_z();
        chunk.get(lx, cell.y, lz)
    }
}
