//! Block identifiers, definitions, and the block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::BlockRegistry;
pub use types::{AIR, BlockDef, BlockId, Face, builtin_ids};
