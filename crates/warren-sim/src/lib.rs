//! Discrete-tick simulation: fixed-timestep clock, grid-cell movement
//! resolution, and pluggable actor behaviors.
#![forbid(unsafe_code)]

pub mod behavior;
pub mod clock;
pub mod mover;

pub use behavior::{Actor, Behavior, PatrolBehavior};
pub use clock::SimClock;
pub use mover::{GridDir, GridMover, MoveCtx, MoverRules, Playfield};
