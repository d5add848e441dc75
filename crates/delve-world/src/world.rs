//! In-memory chunked voxel world.

use delve_core::coords::{ChunkPos, WorldPos};
use delve_core::math::BlockBounds;
use delve_core::BlockState;
use hashbrown::HashMap;
use tracing::trace;

use crate::access::BlockAccess;
use crate::chunk::Chunk;

/// Sparse voxel world backed by lazily created chunks.
///
/// Positions that were never written read as the fill block, so an empty
/// world behaves like an infinite block of solid rock.
pub struct VoxelWorld {
    /// Loaded chunks indexed by position.
    chunks: HashMap<ChunkPos, Chunk>,
    /// Block reported for untouched space.
    fill: BlockState,
    /// Total number of `set_block` calls.
    writes: usize,
    /// Bounds of every written position.
    bounds: Option<BlockBounds>,
}

impl VoxelWorld {
    /// Create a world whose untouched space reads as `fill`.
    pub fn new(fill: BlockState) -> Self {
        Self {
            chunks: HashMap::new(),
            fill,
            writes: 0,
            bounds: None,
        }
    }

    /// Create a world of solid stone.
    pub fn stone() -> Self {
        Self::new(BlockState::STONE)
    }

    /// The block reported for untouched space.
    pub fn fill(&self) -> BlockState {
        self.fill
    }

    /// Number of `set_block` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Bounds of all written positions, if anything was written.
    pub fn bounds(&self) -> Option<BlockBounds> {
        self.bounds
    }

    /// Number of materialized chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if no chunk has been materialized.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Check if a chunk has been materialized at the given position.
    pub fn contains_chunk(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Count materialized blocks matching a predicate.
    ///
    /// Untouched space is not counted.
    pub fn count(&self, mut pred: impl FnMut(BlockState) -> bool) -> usize {
        self.chunks.values().map(|c| c.count(&mut pred)).sum()
    }

    /// Collect every materialized position holding a block matching `pred`.
    pub fn positions_where(&self, mut pred: impl FnMut(BlockState) -> bool) -> Vec<WorldPos> {
        let mut out = Vec::new();
        for chunk in self.chunks.values() {
            for (local, block) in chunk.iter() {
                if pred(block) {
                    out.push(WorldPos::from_chunk_local(chunk.pos, local));
                }
            }
        }
        out
    }

    /// Get memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.chunks.values().map(Chunk::memory_usage).sum()
    }

    fn chunk_mut(&mut self, pos: ChunkPos) -> &mut Chunk {
        let fill = self.fill;
        self.chunks.entry(pos).or_insert_with(|| {
            trace!(x = pos.x, y = pos.y, z = pos.z, "materializing chunk");
            Chunk::filled(pos, fill)
        })
    }
}

impl Default for VoxelWorld {
    fn default() -> Self {
        Self::stone()
    }
}

impl BlockAccess for VoxelWorld {
    fn get_block(&self, pos: WorldPos) -> BlockState {
        let (chunk_pos, local) = pos.split();
        self.chunks
            .get(&chunk_pos)
            .map_or(self.fill, |chunk| chunk.get(local))
    }

    fn set_block(&mut self, pos: WorldPos, block: BlockState) {
        let (chunk_pos, local) = pos.split();
        self.chunk_mut(chunk_pos).set(local, block);
        self.writes += 1;
        self.bounds
            .get_or_insert(BlockBounds::point(pos))
            .expand_to_include(pos);
    }
}
