use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::types::{AIR, BlockDef, BlockId, builtin_ids};

/// Fixed catalog of block definitions, constructed once at startup and
/// passed by reference to every consumer. Slot 0 is always air.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<BlockDef>,
    by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    /// The default catalog: air plus sixteen solid blocks with atlas tiles
    /// assigned left-to-right, top-down (0..=15).
    pub fn builtin() -> Self {
        use builtin_ids as b;
        let defs = [
            (b::COBBLE1, "cobble1", 0u16),
            (b::COBBLE2, "cobble2", 1),
            (b::COBBLE3, "cobble3", 2),
            (b::COBBLE4, "cobble4", 3),
            (b::LAID1, "laid1", 4),
            (b::LAID2, "laid2", 5),
            (b::STONE1, "stone1", 6),
            (b::STONE2, "stone2", 7),
            (b::GRID1, "grid1", 8),
            (b::GRID2, "grid2", 9),
            (b::GRID3, "grid3", 10),
            (b::GRASS, "grass", 11),
            (b::DIRT1, "dirt1", 12),
            (b::DIRT2, "dirt2", 13),
            (b::LEAVES1, "leaves1", 14),
            (b::LEAVES2, "leaves2", 15),
        ];
        let mut blocks = vec![BlockDef::air()];
        for (id, name, tile) in defs {
            debug_assert_eq!(id as usize, blocks.len());
            blocks.push(BlockDef::solid_all_faces(id, name, tile));
        }
        Self::from_defs(blocks)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut blocks = vec![BlockDef::air()];
        for def in cfg.blocks.into_iter() {
            // Next free slot when no explicit id; explicit ids are
            // last-wins so a config can shadow earlier entries.
            let id = def.id.unwrap_or_else(|| blocks.len().min(255) as u8);
            if id == AIR {
                return Err(format!("block '{}' claims reserved id 0 (air)", def.name).into());
            }
            let tiles = match (def.tiles, def.tile) {
                (Some(t), _) => t,
                (None, Some(t)) => [t; 6],
                (None, None) => [0; 6],
            };
            let slot = id as usize;
            if blocks.len() <= slot {
                blocks.resize_with(slot + 1, BlockDef::air);
            }
            blocks[slot] = BlockDef {
                id,
                name: def.name,
                solid: def.solid,
                tiles,
            };
        }
        Ok(Self::from_defs(blocks))
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        let cfg: BlocksConfig = toml::from_str(&s)?;
        Self::from_config(cfg)
    }

    fn from_defs(blocks: Vec<BlockDef>) -> Self {
        let by_name = blocks
            .iter()
            .filter(|d| !d.name.is_empty())
            .map(|d| (d.name.clone(), d.id))
            .collect();
        Self { blocks, by_name }
    }

    /// Definition lookup. Ids outside the catalog resolve to air, keeping
    /// the lookup total.
    #[inline]
    pub fn get(&self, id: BlockId) -> &BlockDef {
        self.blocks.get(id as usize).unwrap_or(&self.blocks[0])
    }

    #[inline]
    pub fn is_solid(&self, id: BlockId) -> bool {
        self.get(id).solid
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_air_is_slot_zero_and_non_solid() {
        let reg = BlockRegistry::builtin();
        assert!(!reg.is_solid(AIR));
        assert_eq!(reg.get(AIR).name, "air");
    }

    #[test]
    fn builtin_has_sixteen_solid_blocks() {
        let reg = BlockRegistry::builtin();
        assert_eq!(reg.len(), 17);
        let solid = (0..=255u8).filter(|&id| reg.is_solid(id)).count();
        assert_eq!(solid, 16);
    }

    #[test]
    fn out_of_catalog_id_falls_back_to_air() {
        let reg = BlockRegistry::builtin();
        assert!(!reg.is_solid(200));
        assert_eq!(reg.get(200).id, AIR);
    }

    #[test]
    fn builtin_tiles_match_catalog_order() {
        use crate::types::{Face, builtin_ids as b};
        let reg = BlockRegistry::builtin();
        assert_eq!(reg.get(b::GRASS).tile(Face::Up), 11);
        assert_eq!(reg.get(b::STONE2).tile(Face::Down), 7);
    }
}
