//! Block coordinates and their split into chunk and in-chunk parts.
//!
//! A [`WorldPos`] names one block. The sparse world stores blocks in cubic
//! chunks of `CHUNK_SIZE` blocks per side, so every world position maps to
//! a [`ChunkPos`] plus a [`LocalPos`] inside that chunk. Negative
//! coordinates round towards negative infinity: block `-1` lives in chunk
//! `-1` at local offset `CHUNK_SIZE - 1`.

use crate::constants::{CHUNK_BITS, CHUNK_SIZE};
use glam::DVec3;
use serde::{Deserialize, Serialize};

const LOCAL_MASK: i64 = CHUNK_SIZE as i64 - 1;

/// Block offset inside a chunk, each axis in `0..CHUNK_SIZE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl LocalPos {
    #[inline]
    pub const fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!((x as usize) < CHUNK_SIZE);
        debug_assert!((y as usize) < CHUNK_SIZE);
        debug_assert!((z as usize) < CHUNK_SIZE);
        Self { x, y, z }
    }

    /// Slot in a chunk's flat block array; x varies fastest, then y, then z.
    #[inline]
    pub const fn to_index(self) -> usize {
        (self.z as usize * CHUNK_SIZE + self.y as usize) * CHUNK_SIZE + self.x as usize
    }

    /// Inverse of [`LocalPos::to_index`].
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        let x = index % CHUNK_SIZE;
        let rest = index / CHUNK_SIZE;
        Self::new(
            x as u8,
            (rest % CHUNK_SIZE) as u8,
            (rest / CHUNK_SIZE) as u8,
        )
    }
}

/// Chunk index along each axis; chunk `c` covers blocks
/// `c * CHUNK_SIZE .. (c + 1) * CHUNK_SIZE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Absolute block coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl WorldPos {
    #[inline]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The block `dx, dy, dz` away from this one.
    #[inline]
    pub const fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Chunk holding this block.
    #[inline]
    pub const fn chunk_pos(self) -> ChunkPos {
        ChunkPos::new(
            (self.x >> CHUNK_BITS) as i32,
            (self.y >> CHUNK_BITS) as i32,
            (self.z >> CHUNK_BITS) as i32,
        )
    }

    /// Offset of this block inside its chunk.
    #[inline]
    pub const fn local_pos(self) -> LocalPos {
        LocalPos::new(
            (self.x & LOCAL_MASK) as u8,
            (self.y & LOCAL_MASK) as u8,
            (self.z & LOCAL_MASK) as u8,
        )
    }

    #[inline]
    pub const fn split(self) -> (ChunkPos, LocalPos) {
        (self.chunk_pos(), self.local_pos())
    }

    /// Inverse of [`WorldPos::split`].
    #[inline]
    pub const fn from_chunk_local(chunk: ChunkPos, local: LocalPos) -> Self {
        Self::new(
            ((chunk.x as i64) << CHUNK_BITS) | local.x as i64,
            ((chunk.y as i64) << CHUNK_BITS) | local.y as i64,
            ((chunk.z as i64) << CHUNK_BITS) | local.z as i64,
        )
    }
}

/// Block containing a point: each component is floored.
impl From<DVec3> for WorldPos {
    fn from(v: DVec3) -> Self {
        Self::new(v.x.floor() as i64, v.y.floor() as i64, v.z.floor() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_index_covers_whole_chunk() {
        for index in [0, 1, 31, 32, 1023, 1024, 32767] {
            assert_eq!(LocalPos::from_index(index).to_index(), index);
        }
        assert_eq!(LocalPos::new(1, 0, 0).to_index(), 1);
        assert_eq!(LocalPos::new(0, 1, 0).to_index(), CHUNK_SIZE);
        assert_eq!(LocalPos::new(0, 0, 1).to_index(), CHUNK_SIZE * CHUNK_SIZE);
    }

    #[test]
    fn split_and_rejoin() {
        for world in [
            WorldPos::new(100, -50, 200),
            WorldPos::new(0, 0, 0),
            WorldPos::new(-33, 64, -32),
        ] {
            let (chunk, local) = world.split();
            assert_eq!(WorldPos::from_chunk_local(chunk, local), world);
        }
    }

    #[test]
    fn negative_blocks_round_down() {
        let world = WorldPos::new(-1, -32, -33);
        assert_eq!(world.chunk_pos(), ChunkPos::new(-1, -1, -2));
        assert_eq!(world.local_pos(), LocalPos::new(31, 0, 31));
    }

    #[test]
    fn from_dvec3_floors() {
        assert_eq!(
            WorldPos::from(DVec3::new(0.5, -0.5, 2.999)),
            WorldPos::new(0, -1, 2)
        );
    }
}
