//! Shared types for the tileworld engine.
//!
//! # Invariants
//! - Tile to chunk translation uses Euclidean division, so local indices are
//!   always within `0..CHUNK_SIZE`.
//! - Item kinds form a closed set; inventories cannot record unknown kinds.

mod block;
mod coords;
mod types;

pub use block::{Block, ItemKind};
pub use coords::{CHUNK_SIZE, ChunkCoord, LocalPos, TilePos};
pub use types::{Aabb, EntityId};
