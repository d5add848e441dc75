//! Chunk data structure for voxel world storage.

use delve_core::constants::CHUNK_SIZE_CUBED;
use delve_core::coords::{ChunkPos, LocalPos};
use delve_core::BlockState;

/// A single chunk of voxel data (32x32x32 voxels), stored flat.
#[derive(Clone)]
pub struct Chunk {
    /// Position in chunk coordinates.
    pub pos: ChunkPos,
    /// Block data indexed by [`LocalPos::to_index`].
    blocks: Box<[BlockState]>,
    /// Whether the chunk was written since it was created or last cleaned.
    pub dirty: bool,
}

impl Chunk {
    /// Create a chunk filled with a single block.
    pub fn filled(pos: ChunkPos, fill: BlockState) -> Self {
        Self {
            pos,
            blocks: vec![fill; CHUNK_SIZE_CUBED].into_boxed_slice(),
            dirty: false,
        }
    }

    /// Get the block at a local position.
    #[inline]
    pub fn get(&self, local: LocalPos) -> BlockState {
        self.blocks[local.to_index()]
    }

    /// Set the block at a local position, returning the previous block.
    #[inline]
    pub fn set(&mut self, local: LocalPos, block: BlockState) -> BlockState {
        self.dirty = true;
        std::mem::replace(&mut self.blocks[local.to_index()], block)
    }

    /// Count blocks matching a predicate.
    pub fn count(&self, mut pred: impl FnMut(BlockState) -> bool) -> usize {
        self.blocks.iter().filter(|b| pred(**b)).count()
    }

    /// Iterate over all blocks with their local positions.
    pub fn iter(&self) -> impl Iterator<Item = (LocalPos, BlockState)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (LocalPos::from_index(i), *b))
    }

    /// Get memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.blocks.len() * std::mem::size_of::<BlockState>()
    }
}
