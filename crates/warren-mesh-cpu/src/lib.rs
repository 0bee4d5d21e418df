//! CPU surface extraction: chunk voxels to renderable quad geometry.
#![forbid(unsafe_code)]

pub mod mesh_build;

pub use mesh_build::{IndexFormat, MeshBuild};

use warren_blocks::{BlockRegistry, Face};
use warren_chunk::Chunk;
use warren_geom::{Aabb, Vec3};
use warren_world::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkCoord};

/// Surface mesh for one chunk. Positions are chunk-local (the host
/// translates by the chunk's world origin); `bbox` covers the local cell
/// volume.
pub struct ChunkMeshCpu {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub build: MeshBuild,
    pub index_format: IndexFormat,
}

#[inline]
fn face_normal(face: Face) -> Vec3 {
    let (dx, dy, dz) = face.delta();
    Vec3::new(dx as f32, dy as f32, dz as f32)
}

/// Quad corners for the given face of the unit cell at `p`, in the fixed
/// winding the index pattern assumes (counter-clockwise seen from outside).
#[inline]
fn face_corners(face: Face, p: Vec3) -> [Vec3; 4] {
    match face {
        Face::North => [
            p + Vec3::new(0.0, 0.0, 1.0),
            p + Vec3::new(1.0, 0.0, 1.0),
            p + Vec3::new(1.0, 1.0, 1.0),
            p + Vec3::new(0.0, 1.0, 1.0),
        ],
        Face::South => [
            p + Vec3::new(1.0, 0.0, 0.0),
            p + Vec3::new(0.0, 0.0, 0.0),
            p + Vec3::new(0.0, 1.0, 0.0),
            p + Vec3::new(1.0, 1.0, 0.0),
        ],
        Face::East => [
            p + Vec3::new(1.0, 0.0, 1.0),
            p + Vec3::new(1.0, 0.0, 0.0),
            p + Vec3::new(1.0, 1.0, 0.0),
            p + Vec3::new(1.0, 1.0, 1.0),
        ],
        Face::West => [
            p + Vec3::new(0.0, 0.0, 0.0),
            p + Vec3::new(0.0, 0.0, 1.0),
            p + Vec3::new(0.0, 1.0, 1.0),
            p + Vec3::new(0.0, 1.0, 0.0),
        ],
        Face::Up => [
            p + Vec3::new(0.0, 1.0, 1.0),
            p + Vec3::new(1.0, 1.0, 1.0),
            p + Vec3::new(1.0, 1.0, 0.0),
            p + Vec3::new(0.0, 1.0, 0.0),
        ],
        Face::Down => [
            p + Vec3::new(0.0, 0.0, 0.0),
            p + Vec3::new(1.0, 0.0, 0.0),
            p + Vec3::new(1.0, 0.0, 1.0),
            p + Vec3::new(0.0, 0.0, 1.0),
        ],
    }
}

/// Atlas UVs for a tile index: row-major grid, rows flipped top-to-bottom,
/// with a small inward inset against bleeding from neighboring tiles.
#[inline]
fn tile_uvs(tile: u16, tiles_per_row: u32, inset_frac: f32) -> [(f32, f32); 4] {
    let tpr = tiles_per_row;
    let step = 1.0 / tpr as f32;
    let inset = step * inset_frac;
    let tx = (tile as u32 % tpr) as f32;
    let ty = ((tpr - 1).saturating_sub(tile as u32 / tpr)) as f32;
    let u0 = tx * step + inset;
    let v0 = ty * step + inset;
    let u1 = (tx + 1.0) * step - inset;
    let v1 = (ty + 1.0) * step - inset;
    [(u0, v0), (u1, v0), (u1, v1), (u0, v1)]
}

/// Naive face-culled surface extraction: one quad for every solid voxel
/// face whose neighbor is non-solid. Neighbor reads go through
/// [`Chunk::get`], which returns air past the chunk boundary, so the
/// exterior shell is always closed and internal faces are never emitted.
pub fn build_chunk_mesh(
    chunk: &Chunk,
    reg: &BlockRegistry,
    atlas_tiles_per_row: u32,
) -> ChunkMeshCpu {
    let tpr = atlas_tiles_per_row.max(1);
    let mut build = MeshBuild::default();
    build.reserve_quads(1024);

    for y in 0..CHUNK_SIZE_Y as i32 {
        for z in 0..CHUNK_SIZE_Z as i32 {
            for x in 0..CHUNK_SIZE_X as i32 {
                let id = chunk.get(x, y, z);
                if !reg.is_solid(id) {
                    continue;
                }
                let def = reg.get(id);
                let p = Vec3::new(x as f32, y as f32, z as f32);
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    if reg.is_solid(chunk.get(x + dx, y + dy, z + dz)) {
                        continue;
                    }
                    build.add_quad(
                        face_corners(face, p),
                        face_normal(face),
                        tile_uvs(def.tile(face), tpr, 0.02),
                    );
                }
            }
        }
    }

    let index_format = IndexFormat::for_vertex_count(build.vertex_count());
    log::debug!(
        target: "mesh",
        "chunk ({},{}) surface: {} verts, {} indices, {:?}",
        chunk.coord.cx,
        chunk.coord.cz,
        build.vertex_count(),
        build.idx.len(),
        index_format
    );
    ChunkMeshCpu {
        coord: chunk.coord,
        bbox: Aabb::new(
            Vec3::ZERO,
            Vec3::new(
                CHUNK_SIZE_X as f32,
                CHUNK_SIZE_Y as f32,
                CHUNK_SIZE_Z as f32,
            ),
        ),
        build,
        index_format,
    }
}
