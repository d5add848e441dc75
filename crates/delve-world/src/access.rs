//! World accessor and palette traits.

use delve_core::{BlockId, BlockState, WorldPos};
use serde::{Deserialize, Serialize};

/// Read/write access to blocks of a voxel world.
///
/// No transactional guarantees: the last write to a position wins.
pub trait BlockAccess {
    /// Get the block at a position
    fn get_block(&self, pos: WorldPos) -> BlockState;

    /// Overwrite the block at a position
    fn set_block(&mut self, pos: WorldPos, block: BlockState);
}

/// Block palette consulted while carving and placing ores.
pub trait Palette {
    /// The block written into carved space
    fn air_block(&self) -> BlockState;

    /// Whether a block counts as non-solid (ores never replace these)
    fn is_transparent(&self, block: BlockState) -> bool;
}

/// Palette loaded from a cave style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePalette {
    /// Block written into carved space
    #[serde(default = "default_air")]
    pub air: BlockState,
    /// Blocks treated as transparent, matched fuzzily
    #[serde(default = "default_transparent")]
    pub transparent: Vec<BlockState>,
}

fn default_air() -> BlockState {
    BlockState::AIR
}

fn default_transparent() -> Vec<BlockState> {
    vec![
        BlockState::new(BlockId::WATER),
        BlockState::new(BlockId::LAVA),
        BlockState::new(BlockId::GLASS),
    ]
}

impl Default for StylePalette {
    fn default() -> Self {
        Self {
            air: default_air(),
            transparent: default_transparent(),
        }
    }
}

impl Palette for StylePalette {
    fn air_block(&self) -> BlockState {
        self.air
    }

    fn is_transparent(&self, block: BlockState) -> bool {
        block.is_air()
            || self.air.matches_fuzzy(&block)
            || self.transparent.iter().any(|t| t.matches_fuzzy(&block))
    }
}
