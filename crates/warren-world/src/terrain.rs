use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use warren_blocks::types::{BlockId, builtin_ids};

use crate::CHUNK_SIZE_Y;

/// TOML-facing terrain settings. Out-of-range values are clamped when the
/// config is flattened into [`TerrainParams`], never rejected.
#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f32,
    #[serde(default = "default_base_height")]
    pub base_height: i32,
    #[serde(default = "default_height_variation")]
    pub height_variation: i32,
    #[serde(default)]
    pub blocks: TerrainBlocks,
}

/// Block ids used by the generator bands. Numeric ids so generation never
/// needs a registry; the defaults match [`warren_blocks::BlockRegistry::builtin`].
#[derive(Clone, Debug, Deserialize)]
pub struct TerrainBlocks {
    #[serde(default = "default_surface")]
    pub surface: BlockId,
    #[serde(default = "default_near_surface")]
    pub near_surface: [BlockId; 2],
    #[serde(default = "default_deep_low")]
    pub deep_low: BlockId,
    #[serde(default = "default_deep_high")]
    pub deep_high: BlockId,
}

fn default_seed() -> i32 {
    12221345
}
fn default_noise_scale() -> f32 {
    0.08
}
fn default_base_height() -> i32 {
    4
}
fn default_height_variation() -> i32 {
    6
}
fn default_surface() -> BlockId {
    builtin_ids::GRASS
}
fn default_near_surface() -> [BlockId; 2] {
    [builtin_ids::DIRT1, builtin_ids::DIRT2]
}
fn default_deep_low() -> BlockId {
    builtin_ids::STONE2
}
fn default_deep_high() -> BlockId {
    builtin_ids::STONE1
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            noise_scale: default_noise_scale(),
            base_height: default_base_height(),
            height_variation: default_height_variation(),
            blocks: TerrainBlocks::default(),
        }
    }
}

impl Default for TerrainBlocks {
    fn default() -> Self {
        Self {
            surface: default_surface(),
            near_surface: default_near_surface(),
            deep_low: default_deep_low(),
            deep_high: default_deep_high(),
        }
    }
}

/// Flattened, clamped parameters used by the generator's inner loops.
#[derive(Clone, Debug)]
pub struct TerrainParams {
    pub seed: i32,
    pub noise_scale: f32,
    pub base_height: i32,
    pub height_variation: i32,
    pub surface: BlockId,
    pub near_surface: [BlockId; 2],
    pub deep_low: BlockId,
    pub deep_high: BlockId,
}

impl TerrainParams {
    pub fn from_config(cfg: &TerrainConfig) -> Self {
        Self {
            seed: cfg.seed,
            noise_scale: if cfg.noise_scale > 0.0 {
                cfg.noise_scale
            } else {
                default_noise_scale()
            },
            base_height: cfg.base_height.clamp(1, CHUNK_SIZE_Y as i32 - 1),
            height_variation: cfg.height_variation.max(0),
            surface: cfg.blocks.surface,
            near_surface: cfg.blocks.near_surface,
            deep_low: cfg.blocks.deep_low,
            deep_high: cfg.blocks.deep_high,
        }
    }

    pub fn with_seed(seed: i32) -> Self {
        Self::from_config(&TerrainConfig {
            seed,
            ..TerrainConfig::default()
        })
    }

    /// 2D coherent heightfield noise for world-space column coordinates.
    /// All chunks built from the same seed sample one continuous field.
    pub fn make_noise(&self) -> FastNoiseLite {
        let mut n = FastNoiseLite::with_seed(self.seed);
        n.set_noise_type(Some(NoiseType::OpenSimplex2));
        n.set_frequency(Some(self.noise_scale));
        n
    }

    /// Column height for a world column, given a noise sampler from
    /// [`Self::make_noise`]. Clamped to `[1, CHUNK_SIZE_Y - 1]`.
    #[inline]
    pub fn column_height(&self, noise: &FastNoiseLite, wx: i32, wz: i32) -> i32 {
        // get_noise_2d returns [-1, 1]; remap to [0, 1] before scaling.
        let n01 = (noise.get_noise_2d(wx as f32, wz as f32) + 1.0) * 0.5;
        let h = self.base_height + (n01 * self.height_variation as f32).round() as i32;
        h.clamp(1, CHUNK_SIZE_Y as i32 - 1)
    }

    /// Deterministic per-column near-surface variant. The whole column gets
    /// one variant so the dirt band is uniform within a column.
    #[inline]
    pub fn near_surface_variant(&self, wx: i32, wz: i32) -> BlockId {
        let col = column_hash(self.seed, wx, wz);
        self.near_surface[(col & 1) as usize]
    }
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self::from_config(&TerrainConfig::default())
    }
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: TerrainConfig = toml::from_str(&s)?;
    Ok(TerrainParams::from_config(&cfg))
}

/// Seed/column hash with a splitmix-style finisher so the low bit is well
/// mixed. Must stay stable: generated terrain is required to be
/// reproducible for identical seed + coordinates.
#[inline]
pub fn column_hash(seed: i32, wx: i32, wz: i32) -> u64 {
    let col = (seed as u64)
        ^ (wx as u64).wrapping_mul(73_428_767)
        ^ (wz as u64).wrapping_mul(91_278_341);
    let mut h = col.wrapping_add(0x9E37_79B9_7F4A_7C15);
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_bad_values() {
        let cfg = TerrainConfig {
            noise_scale: -1.0,
            base_height: 999,
            height_variation: -5,
            ..TerrainConfig::default()
        };
        let p = TerrainParams::from_config(&cfg);
        assert!(p.noise_scale > 0.0);
        assert_eq!(p.base_height, CHUNK_SIZE_Y as i32 - 1);
        assert_eq!(p.height_variation, 0);
    }

    #[test]
    fn column_height_stays_in_range() {
        let p = TerrainParams::with_seed(7);
        let noise = p.make_noise();
        for wx in -40..40 {
            for wz in -40..40 {
                let h = p.column_height(&noise, wx, wz);
                assert!((1..CHUNK_SIZE_Y as i32).contains(&h), "h={h} out of range");
            }
        }
    }

    #[test]
    fn column_hash_is_stable_and_coordinate_sensitive() {
        assert_eq!(column_hash(42, 3, -9), column_hash(42, 3, -9));
        assert_ne!(column_hash(42, 3, -9), column_hash(42, 4, -9));
        assert_ne!(column_hash(42, 3, -9), column_hash(43, 3, -9));
    }

    #[test]
    fn toml_overrides_band_blocks() {
        let cfg: TerrainConfig = toml::from_str(
            r#"
            seed = 5
            [blocks]
            surface = 9
            near_surface = [10, 11]
            "#,
        )
        .unwrap();
        let p = TerrainParams::from_config(&cfg);
        assert_eq!(p.surface, 9);
        assert_eq!(p.near_surface, [10, 11]);
        assert_eq!(p.deep_low, default_deep_low());
    }
}
