use serde::Deserialize;

/// TOML catalog of block definitions.
///
/// ```toml
/// [[blocks]]
/// name = "grass"
/// id = 12
/// tile = 11
///
/// [[blocks]]
/// name = "crate"
/// solid = true
/// tiles = [3, 3, 3, 3, 4, 5]
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDefCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDefCfg {
    pub name: String,
    /// Explicit id; defaults to the next free slot.
    #[serde(default)]
    pub id: Option<u8>,
    #[serde(default = "default_solid")]
    pub solid: bool,
    /// Uniform tile for all six faces.
    #[serde(default)]
    pub tile: Option<u16>,
    /// Per-face tiles in north/south/east/west/up/down order. Wins over
    /// `tile` when both are present.
    #[serde(default)]
    pub tiles: Option<[u16; 6]>,
}

fn default_solid() -> bool {
    true
}
