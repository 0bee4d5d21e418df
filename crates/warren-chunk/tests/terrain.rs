use warren_blocks::types::AIR;
use warren_chunk::Chunk;
use warren_world::terrain::TerrainParams;
use warren_world::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkCoord};

#[test]
fn generation_is_deterministic_for_same_seed_and_coord() {
    let params = TerrainParams::with_seed(42);
    let mut a = Chunk::new(ChunkCoord::new(2, -3));
    let mut b = Chunk::new(ChunkCoord::new(2, -3));
    a.generate_terrain(&params);
    b.generate_terrain(&params);
    assert_eq!(a.cells(), b.cells());
}

#[test]
fn different_seeds_differ_somewhere() {
    let mut a = Chunk::new(ChunkCoord::new(0, 0));
    let mut b = Chunk::new(ChunkCoord::new(0, 0));
    a.generate_terrain(&TerrainParams::with_seed(1));
    b.generate_terrain(&TerrainParams::with_seed(2));
    assert_ne!(a.cells(), b.cells());
}

#[test]
fn adjacent_chunks_sample_one_continuous_heightfield() {
    let params = TerrainParams::with_seed(42);
    let noise = params.make_noise();
    for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(1, 0), ChunkCoord::new(0, 1)] {
        let mut chunk = Chunk::new(coord);
        chunk.generate_terrain(&params);
        // Every border column's surface height must equal the global
        // heightfield sampled at its world coordinates.
        for lz in 0..CHUNK_SIZE_Z as i32 {
            for lx in [0, CHUNK_SIZE_X as i32 - 1] {
                let wx = coord.base_x() + lx;
                let wz = coord.base_z() + lz;
                let expect = params.column_height(&noise, wx, wz);
                assert_eq!(
                    chunk.top_non_air(lx, lz),
                    Some(expect),
                    "column ({wx},{wz}) in chunk {coord:?}"
                );
            }
        }
    }
}

#[test]
fn column_banding_matches_layer_rules() {
    let params = TerrainParams::with_seed(7);
    let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
    chunk.generate_terrain(&params);
    for x in 0..CHUNK_SIZE_X as i32 {
        for z in 0..CHUNK_SIZE_Z as i32 {
            let h = chunk.top_non_air(x, z).expect("column has terrain");
            assert_eq!(chunk.get(x, h, z), params.surface);
            let near = params.near_surface_variant(x, z);
            for y in (h - 2).max(0)..h {
                assert_eq!(chunk.get(x, y, z), near, "near band at ({x},{y},{z})");
            }
            let deep_top = h - 3;
            if deep_top >= 0 {
                let split = deep_top / 2;
                for y in 0..=deep_top {
                    let want = if y <= split {
                        params.deep_low
                    } else {
                        params.deep_high
                    };
                    assert_eq!(chunk.get(x, y, z), want, "deep band at ({x},{y},{z})");
                }
            }
        }
    }
}

#[test]
fn chop_above_y_clears_everything_above() {
    let params = TerrainParams::with_seed(42);
    let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
    chunk.generate_terrain(&params);
    chunk.chop_above_y(7);
    for y in 8..CHUNK_SIZE_Y as i32 {
        for z in 0..CHUNK_SIZE_Z as i32 {
            for x in 0..CHUNK_SIZE_X as i32 {
                assert_eq!(chunk.get(x, y, z), AIR, "voxel ({x},{y},{z}) not air");
            }
        }
    }
    // The layers at and below the chop line keep their terrain.
    assert!(!chunk.is_all_air());
}

#[test]
fn fill_bottom_fills_exactly_the_requested_layers() {
    let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
    chunk.fill_bottom(4, 3);
    assert_eq!(chunk.get(0, 3, 0), 3);
    assert_eq!(chunk.get(0, 4, 0), AIR);
    // Clamped rather than rejected.
    chunk.fill_bottom(1000, 2);
    assert_eq!(chunk.get(5, CHUNK_SIZE_Y as i32 - 1, 5), 2);
}
