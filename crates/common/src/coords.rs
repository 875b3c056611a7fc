use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Width and height of a chunk, in tiles.
pub const CHUNK_SIZE: usize = 16;

const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;

/// Integer world-cell coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Tile containing a world-space point (tile units, floored).
    pub fn containing(point: Vec2) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
        }
    }

    /// Chunk this tile belongs to.
    pub fn chunk(self) -> ChunkCoord {
        ChunkCoord {
            x: self.x.div_euclid(CHUNK_SIZE_I32),
            y: self.y.div_euclid(CHUNK_SIZE_I32),
        }
    }

    /// Position of this tile inside its chunk.
    pub fn local(self) -> LocalPos {
        LocalPos {
            x: self.x.rem_euclid(CHUNK_SIZE_I32) as usize,
            y: self.y.rem_euclid(CHUNK_SIZE_I32) as usize,
        }
    }

    /// Offset this tile by a delta, wrapping at the i32 boundary.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    /// World-space position of the tile's top-left corner.
    pub fn to_world(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl From<IVec2> for TilePos {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<TilePos> for IVec2 {
    fn from(t: TilePos) -> Self {
        IVec2::new(t.x, t.y)
    }
}

/// A chunk coordinate: `floor(tile / CHUNK_SIZE)` on each axis.
///
/// Ordered so chunk maps iterate deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Max of absolute coordinate differences.
    pub fn chebyshev(self, other: ChunkCoord) -> u32 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dy = (self.y as i64 - other.y as i64).unsigned_abs();
        dx.max(dy) as u32
    }

    /// Tile at this chunk's local origin.
    pub fn origin(self) -> TilePos {
        TilePos::new(
            self.x.wrapping_mul(CHUNK_SIZE_I32),
            self.y.wrapping_mul(CHUNK_SIZE_I32),
        )
    }

    /// Every chunk within Chebyshev distance `radius` of `self`, row-major.
    ///
    /// `radius` must fit in an `i32`; larger values are clamped.
    pub fn square(self, radius: u32) -> impl Iterator<Item = ChunkCoord> {
        debug_assert!(i32::try_from(radius).is_ok(), "radius {radius} out of range");
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        (-r..=r).flat_map(move |dy| {
            (-r..=r).map(move |dx| {
                ChunkCoord::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
            })
        })
    }
}

/// A cell index inside a chunk. Both components are `< CHUNK_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
}
