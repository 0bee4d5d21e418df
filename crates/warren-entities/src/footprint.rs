use warren_world::GridPos;

/// Ordered set of local cell offsets an entity type occupies relative to
/// its origin. Enumeration order is deterministic (construction order).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footprint {
    cells: Vec<GridPos>,
}

impl Footprint {
    pub fn new(cells: Vec<GridPos>) -> Self {
        Self { cells }
    }

    /// Single-cell footprint at the origin.
    pub fn single() -> Self {
        Self {
            cells: vec![GridPos::ZERO],
        }
    }

    /// Solid box of `sx * sy * sz` cells with its minimum corner at the
    /// origin. Offsets enumerate x fastest, then z, then y.
    pub fn box_size(sx: i32, sy: i32, sz: i32) -> Self {
        let (sx, sy, sz) = (sx.max(0), sy.max(0), sz.max(0));
        // Saturating so degenerate sizes cannot overflow the capacity
        // arithmetic.
        let cap = (sx as usize)
            .saturating_mul(sy as usize)
            .saturating_mul(sz as usize);
        let mut cells = Vec::with_capacity(cap);
        for y in 0..sy {
            for z in 0..sz {
                for x in 0..sx {
                    cells.push(GridPos::new(x, y, z));
                }
            }
        }
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[GridPos] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// World cells covered when placed at `origin`. Finite and restartable.
    pub fn world_cells(&self, origin: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        self.cells.iter().map(move |&c| origin + c)
    }
}
