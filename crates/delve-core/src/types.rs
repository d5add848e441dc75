//! Core block types.

use serde::{Deserialize, Serialize};

/// Unique identifier for a block type.
///
/// Block ID 0 is reserved for air (empty space).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    /// Air block (empty space)
    pub const AIR: Self = Self(0);
    /// Stone block
    pub const STONE: Self = Self(1);
    /// Dirt block
    pub const DIRT: Self = Self(2);
    /// Gravel block
    pub const GRAVEL: Self = Self(3);
    /// Water block
    pub const WATER: Self = Self(4);
    /// Lava block
    pub const LAVA: Self = Self(5);
    /// Coal ore block
    pub const COAL_ORE: Self = Self(6);
    /// Iron ore block
    pub const IRON_ORE: Self = Self(7);
    /// Gold ore block
    pub const GOLD_ORE: Self = Self(8);
    /// Diamond ore block
    pub const DIAMOND_ORE: Self = Self(9);
    /// Glass block
    pub const GLASS: Self = Self(10);

    /// Returns true if this block is air (empty)
    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }
}

/// A block type together with its state metadata (orientation, variant, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BlockStateRepr")]
pub struct BlockState {
    /// The block type
    pub block_id: BlockId,
    /// Additional metadata; 0 means "default state"
    pub metadata: u16,
}

impl BlockState {
    /// Air in its default state
    pub const AIR: Self = Self::new(BlockId::AIR);
    /// Stone in its default state
    pub const STONE: Self = Self::new(BlockId::STONE);

    /// Create a new block state with default metadata
    #[inline]
    pub const fn new(block_id: BlockId) -> Self {
        Self {
            block_id,
            metadata: 0,
        }
    }

    /// Create a new block state with block ID and metadata
    #[inline]
    pub const fn with_metadata(block_id: BlockId, metadata: u16) -> Self {
        Self { block_id, metadata }
    }

    /// Returns true if this is air
    #[inline]
    pub const fn is_air(&self) -> bool {
        self.block_id.is_air()
    }

    /// Fuzzy comparison used when matching a block against a pattern.
    ///
    /// `self` is the pattern: the block types must be equal, and the metadata
    /// must be equal unless the pattern leaves it at the default state.
    #[inline]
    pub const fn matches_fuzzy(&self, other: &BlockState) -> bool {
        self.block_id.0 == other.block_id.0
            && (self.metadata == 0 || self.metadata == other.metadata)
    }
}

impl From<BlockId> for BlockState {
    fn from(block_id: BlockId) -> Self {
        Self::new(block_id)
    }
}

/// Config representation: either a bare block id or `{ id, metadata }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockStateRepr {
    Id(BlockId),
    Full {
        #[serde(alias = "block_id")]
        id: BlockId,
        #[serde(default)]
        metadata: u16,
    },
}

impl From<BlockStateRepr> for BlockState {
    fn from(repr: BlockStateRepr) -> Self {
        match repr {
            BlockStateRepr::Id(id) => Self::new(id),
            BlockStateRepr::Full { id, metadata } => Self::with_metadata(id, metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_air() {
        assert!(BlockId::AIR.is_air());
        assert!(!BlockId::STONE.is_air());
        assert!(BlockState::default().is_air());
    }

    #[test]
    fn fuzzy_match_ignores_default_metadata() {
        let pattern = BlockState::new(BlockId::STONE);
        assert!(pattern.matches_fuzzy(&BlockState::with_metadata(BlockId::STONE, 3)));
        assert!(pattern.matches_fuzzy(&BlockState::STONE));
        assert!(!pattern.matches_fuzzy(&BlockState::new(BlockId::DIRT)));
    }

    #[test]
    fn fuzzy_match_respects_explicit_metadata() {
        let pattern = BlockState::with_metadata(BlockId::STONE, 2);
        assert!(pattern.matches_fuzzy(&BlockState::with_metadata(BlockId::STONE, 2)));
        assert!(!pattern.matches_fuzzy(&BlockState::with_metadata(BlockId::STONE, 1)));
        assert!(!pattern.matches_fuzzy(&BlockState::STONE));
    }
}
