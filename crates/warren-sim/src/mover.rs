use std::collections::VecDeque;

use warren_blocks::BlockRegistry;
use warren_chunk::WorldIndex;
use warren_entities::OccupancyIndex;
use warren_world::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, GridPos};

/// Cardinal grid direction on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridDir {
    North,
    South,
    East,
    West,
}

impl GridDir {
    /// Horizontal cell delta for one move in this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            GridDir::North => (0, 1),
            GridDir::South => (0, -1),
            GridDir::East => (1, 0),
            GridDir::West => (-1, 0),
        }
    }
}

/// Movement tuning for a grid-bound actor. Degenerate values are clamped
/// on construction rather than rejected.
#[derive(Clone, Copy, Debug)]
pub struct MoverRules {
    /// Cells of vertical clearance the actor body needs, feet included.
    pub actor_height: i32,
    /// Maximum rise a single move may climb.
    pub step_height: i32,
    pub gravity: bool,
    /// Cells an unsupported actor drops per tick.
    pub max_fall_per_tick: i32,
}

impl Default for MoverRules {
    fn default() -> Self {
        Self {
            actor_height: 2,
            step_height: 1,
            gravity: true,
            max_fall_per_tick: 1,
        }
    }
}

impl MoverRules {
    pub fn clamped(self) -> Self {
        Self {
            actor_height: self.actor_height.max(1),
            step_height: self.step_height.max(0),
            gravity: self.gravity,
            max_fall_per_tick: self.max_fall_per_tick.max(1),
        }
    }
}

/// Axis-aligned cell bounds the resolver confines actors to.
/// `min` is inclusive, `max` exclusive.
#[derive(Clone, Copy, Debug)]
pub struct Playfield {
    pub min: GridPos,
    pub max: GridPos,
}

impl Playfield {
    pub fn new(min: GridPos, max: GridPos) -> Self {
        Self { min, max }
    }

    /// Bounds covering the chunk at the origin.
    pub fn single_chunk() -> Self {
        Self {
            min: GridPos::ZERO,
            max: GridPos::new(CHUNK_SIZE_X as i32, CHUNK_SIZE_Y as i32, CHUNK_SIZE_Z as i32),
        }
    }

    #[inline]
    pub fn contains(&self, p: GridPos) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }
}

/// Read-only view of everything movement resolution consults.
pub struct MoveCtx<'a> {
    pub world: &'a WorldIndex,
    pub reg: &'a BlockRegistry,
    pub occupancy: &'a OccupancyIndex,
    pub bounds: Playfield,
}

impl<'a> MoveCtx<'a> {
    pub fn new(
        world: &'a WorldIndex,
        reg: &'a BlockRegistry,
        occupancy: &'a OccupancyIndex,
        bounds: Playfield,
    ) -> Self {
        Self {
            world,
            reg,
            occupancy,
            bounds,
        }
    }

    /// A cell is blocked when it lies outside the playfield, holds solid
    /// terrain, or is claimed by any entity.
    pub fn blocked(&self, cell: GridPos) -> bool {
        if !self.bounds.contains(cell) {
            return true;
        }
        if self.reg.is_solid(self.world.block_at(cell)) {
            return true;
        }
        self.occupancy.is_occupied(cell)
    }
}

/// One grid-bound actor: a feet cell, movement rules, and a FIFO of
/// pending move intents. One tick resolves gravity first and then at
/// most one intent; intents that cannot resolve are dropped silently.
pub struct GridMover {
    feet: GridPos,
    rules: MoverRules,
    queue: VecDeque<GridDir>,
}

impl GridMover {
    pub fn new(feet: GridPos, rules: MoverRules) -> Self {
        Self {
            feet,
            rules: rules.clamped(),
            queue: VecDeque::new(),
        }
    }

    #[inline]
    pub fn feet(&self) -> GridPos {
        self.feet
    }

    #[inline]
    pub fn rules(&self) -> &MoverRules {
        &self.rules
    }

    pub fn queue_move(&mut self, dir: GridDir) {
        self.queue.push_back(dir);
    }

    pub fn has_queued_move(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn clear_intents(&mut self) {
        self.queue.clear();
    }

    /// Resolves one simulation tick. A tick spent falling consumes no
    /// intent; the queued move retries once the actor has landed.
    pub fn tick(&mut self, ctx: &MoveCtx<'_>) {
        if self.rules.gravity && self.try_fall(ctx) {
            return;
        }
        if let Some(dir) = self.queue.pop_front() {
            if !self.try_move(ctx, dir) {
                log::debug!(target: "sim", "move {:?} from {:?} blocked, intent dropped", dir, self.feet);
            }
        }
    }

    /// Drops up to `max_fall_per_tick` cells, one at a time, stopping at
    /// the first cell that cannot hold the actor. Returns whether any
    /// drop happened.
    fn try_fall(&mut self, ctx: &MoveCtx<'_>) -> bool {
        let mut fell = false;
        for _ in 0..self.rules.max_fall_per_tick {
            let below = self.feet.down();
            if !ctx.bounds.contains(below) {
                break;
            }
            if ctx.blocked(below) {
                break;
            }
            if !self.has_body_clearance(ctx, below) {
                break;
            }
            self.feet = below;
            fell = true;
        }
        fell
    }

    fn try_move(&mut self, ctx: &MoveCtx<'_>, dir: GridDir) -> bool {
        let (dx, dz) = dir.delta();
        let target = self.feet.offset(dx, 0, dz);

        // Level move onto supported ground.
        if self.can_stand_at(ctx, target) {
            self.feet = target;
            return true;
        }
        // Ledge move: step out over air and let gravity resolve later.
        if ctx.bounds.contains(target) && self.has_body_clearance(ctx, target) {
            self.feet = target;
            return true;
        }
        // Step-up onto higher ground within reach.
        for rise in 1..=self.rules.step_height {
            let raised = target.offset(0, rise, 0);
            if self.can_stand_at(ctx, raised) {
                self.feet = raised;
                return true;
            }
        }
        false
    }

    /// Standing requires the feet cell and the cell beneath it in
    /// bounds, solid support below, and full body clearance.
    fn can_stand_at(&self, ctx: &MoveCtx<'_>, feet: GridPos) -> bool {
        let ground = feet.down();
        if !ctx.bounds.contains(feet) || !ctx.bounds.contains(ground) {
            return false;
        }
        if !ctx.blocked(ground) {
            return false;
        }
        self.has_body_clearance(ctx, feet)
    }

    /// Every cell the body would occupy, feet upward, must be in bounds
    /// and unblocked.
    fn has_body_clearance(&self, ctx: &MoveCtx<'_>, feet: GridPos) -> bool {
        for i in 0..self.rules.actor_height {
            let cell = feet.offset(0, i, 0);
            if !ctx.bounds.contains(cell) || ctx.blocked(cell) {
                return false;
            }
        }
        true
    }
}
