use serde::{Deserialize, Serialize};
use tileworld_common::{Block, CHUNK_SIZE, ChunkCoord, LocalPos, TilePos};

/// A `CHUNK_SIZE` x `CHUNK_SIZE` grid of blocks, indexed `[y][x]`.
///
/// Local `y` grows downward: row 0 is the sky side of the chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    coord: ChunkCoord,
    cells: [[Block; CHUNK_SIZE]; CHUNK_SIZE],
}

impl Chunk {
    /// A chunk filled with air.
    pub fn empty(coord: ChunkCoord) -> Self {
        Self {
            coord,
            cells: [[Block::Air; CHUNK_SIZE]; CHUNK_SIZE],
        }
    }

    pub(crate) fn from_cells(coord: ChunkCoord, cells: [[Block; CHUNK_SIZE]; CHUNK_SIZE]) -> Self {
        Self { coord, cells }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn get(&self, local: LocalPos) -> Block {
        self.cells[local.y][local.x]
    }

    pub fn set(&mut self, local: LocalPos, block: Block) {
        self.cells[local.y][local.x] = block;
    }

    /// Rows of the grid, sky side first.
    pub fn rows(&self) -> &[[Block; CHUNK_SIZE]; CHUNK_SIZE] {
        &self.cells
    }

    /// Iterate every cell with its world tile position.
    pub fn tiles(&self) -> impl Iterator<Item = (TilePos, Block)> + '_ {
        let origin = self.coord.origin();
        self.cells.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, b)| (origin.offset(x as i32, y as i32), *b))
        })
    }

    /// Number of cells holding `block`.
    pub fn count(&self, block: Block) -> usize {
        self.cells.iter().flatten().filter(|b| **b == block).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chunk_is_all_air() {
        let chunk = Chunk::empty(ChunkCoord::new(0, 0));
        assert_eq!(chunk.count(Block::Air), CHUNK_SIZE * CHUNK_SIZE);
    }

    #[test]
    fn set_then_get() {
        let mut chunk = Chunk::empty(ChunkCoord::new(2, -1));
        let local = LocalPos { x: 3, y: 15 };
        chunk.set(local, Block::Stone);
        assert_eq!(chunk.get(local), Block::Stone);
        assert_eq!(chunk.rows()[15][3], Block::Stone);
    }

    #[test]
    fn tiles_carry_world_positions() {
        let mut chunk = Chunk::empty(ChunkCoord::new(-1, 1));
        chunk.set(LocalPos { x: 0, y: 0 }, Block::Dirt);
        let (pos, block) = chunk.tiles().next().unwrap();
        assert_eq!(pos, TilePos::new(-16, 16));
        assert_eq!(block, Block::Dirt);
        assert_eq!(chunk.tiles().count(), CHUNK_SIZE * CHUNK_SIZE);
    }
}
