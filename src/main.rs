//! Headless driver: generates a block of terrain, meshes it, places a few
//! entities, and runs the simulation clock for a fixed number of ticks.
use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use warren_blocks::BlockRegistry;
use warren_chunk::WorldIndex;
use warren_entities::{EntityCatalog, EntityDef, Footprint, OccupancyMask};
use warren_mesh_cpu::build_chunk_mesh;
use warren_place::PlacementService;
use warren_sim::{
    Actor, GridDir, GridMover, MoveCtx, MoverRules, PatrolBehavior, Playfield, SimClock,
};
use warren_world::{
    CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkCoord, GridPos, TerrainParams, terrain,
};

#[derive(Parser, Debug)]
#[command(name = "warren", about = "Headless grid-world backend demo")]
struct Cli {
    /// Terrain seed (ignored when --world is given).
    #[arg(long, default_value_t = 12221345)]
    seed: i32,
    /// Chunk radius around the origin; generates (2r+1)^2 chunks.
    #[arg(long, default_value_t = 1)]
    radius: u32,
    /// Remove all terrain strictly above this layer.
    #[arg(long)]
    chop: Option<i32>,
    /// Texture atlas tiles per row, for mesh UVs.
    #[arg(long, default_value_t = 4)]
    atlas_tiles: u32,
    /// Simulation ticks to run before exiting.
    #[arg(long, default_value_t = 120)]
    ticks: u64,
    /// Simulation rate in ticks per second.
    #[arg(long, default_value_t = 60)]
    tps: u32,
    /// Block registry TOML; omitted means the builtin set.
    #[arg(long)]
    blocks: Option<PathBuf>,
    /// Terrain parameters TOML.
    #[arg(long)]
    world: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    let cli = Cli::parse();

    let reg = match &cli.blocks {
        Some(path) => BlockRegistry::load_from_path(path)?,
        None => BlockRegistry::builtin(),
    };
    let params = match &cli.world {
        Some(path) => terrain::load_params_from_path(path)?,
        None => TerrainParams::with_seed(cli.seed),
    };
    log::info!(
        target: "app",
        "registry: {} blocks; seed={} radius={}",
        reg.len(),
        cli.seed,
        cli.radius
    );

    let r = cli.radius as i32;
    let mut world = WorldIndex::new();
    for cz in -r..=r {
        for cx in -r..=r {
            let chunk = world.get_or_create(ChunkCoord::new(cx, cz));
            chunk.generate_terrain(&params);
            if let Some(max_y) = cli.chop {
                chunk.chop_above_y(max_y);
            }
        }
    }
    log::info!(target: "app", "generated {} chunks", world.len());

    let mut total_quads = 0usize;
    let mut total_verts = 0usize;
    for chunk in world.all() {
        let mesh = build_chunk_mesh(chunk, &reg, cli.atlas_tiles);
        total_quads += mesh.build.idx.len() / 6;
        total_verts += mesh.build.vertex_count();
    }
    log::info!(
        target: "mesh",
        "meshed {} chunks: {} quads, {} vertices",
        world.len(),
        total_quads,
        total_verts
    );

    let mut catalog = EntityCatalog::new();
    {
        let place = PlacementService::new(&world, &reg);
        let table = EntityDef::new("table", Footprint::box_size(2, 1, 2), OccupancyMask::SOLID);
        let lamp = EntityDef::new(
            "lamp",
            Footprint::single(),
            OccupancyMask::SOLID | OccupancyMask::INTERACTION,
        );
        for (def, x, z) in [(&table, 10, 10), (&lamp, 14, 12), (&lamp, 18, 20)] {
            if let Some(feet) = surface_feet(&world, &reg, x, z) {
                match place.try_place(&mut catalog, def, feet) {
                    Some(id) => {
                        log::info!(target: "app", "placed '{}' #{id} at {:?}", def.name, feet)
                    }
                    None => log::warn!(target: "app", "no room for '{}' at {:?}", def.name, feet),
                }
            }
        }
    }

    let bounds = Playfield::new(
        GridPos::new(-r * CHUNK_SIZE_X as i32, 0, -r * CHUNK_SIZE_Z as i32),
        GridPos::new(
            (r + 1) * CHUNK_SIZE_X as i32,
            CHUNK_SIZE_Y as i32,
            (r + 1) * CHUNK_SIZE_Z as i32,
        ),
    );
    let spawn =
        surface_feet(&world, &reg, 5, 5).unwrap_or(GridPos::new(5, CHUNK_SIZE_Y as i32 - 1, 5));
    let mut actor = Actor::new(GridMover::new(spawn, MoverRules::default()));
    actor.set_behavior(Some(Box::new(PatrolBehavior::new(vec![
        GridDir::East,
        GridDir::East,
        GridDir::North,
        GridDir::West,
        GridDir::West,
        GridDir::South,
    ]))));

    let mut clock = SimClock::new();
    clock.configure(cli.tps, 1.0, 8);
    let ctx = MoveCtx::new(&world, &reg, catalog.occupancy(), bounds);
    let behavior_dt = clock.tick_dt();
    let frame_dt = 1.0 / 60.0;
    while clock.tick_count() < cli.ticks {
        clock.advance(frame_dt, |_tick| {
            actor.tick_behavior(behavior_dt);
            actor.mover.tick(&ctx);
        });
    }
    log::info!(
        target: "sim",
        "ran {} ticks at {} tps; actor at {:?}, {} entities placed",
        clock.tick_count(),
        cli.tps,
        actor.mover.feet(),
        catalog.len()
    );

    Ok(())
}

/// First open feet cell above the topmost solid block in a column.
fn surface_feet(world: &WorldIndex, reg: &BlockRegistry, x: i32, z: i32) -> Option<GridPos> {
    for y in (0..CHUNK_SIZE_Y as i32).rev() {
        if reg.is_solid(world.block_at(GridPos::new(x, y, z))) {
            let feet = GridPos::new(x, y + 1, z);
            return (feet.y < CHUNK_SIZE_Y as i32).then_some(feet);
        }
    }
    None
}
