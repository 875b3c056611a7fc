//! Terrain: pure procedural chunk generation.
//!
//! # Invariants
//! - `generate_chunk` is total over every `ChunkCoord`.
//! - Identical seed and coordinate always yield an identical grid, regardless
//!   of call order or prior history.
//! - Vegetation never writes outside its own chunk.

mod chunk;
mod generator;

pub use chunk::Chunk;
pub use generator::{TerrainGenerator, chunk_seed};
