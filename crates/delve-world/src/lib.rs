//! Voxel world collaborators for cave generation.
//!
//! Generation only ever touches the world through [`BlockAccess`] and asks a
//! [`Palette`] which block is air and which blocks count as transparent.
//! [`VoxelWorld`] is an in-memory chunked implementation used by the CLI and
//! by tests.

pub mod access;
pub mod chunk;
pub mod world;

pub use access::{BlockAccess, Palette, StylePalette};
pub use chunk::Chunk;
pub use world::VoxelWorld;
