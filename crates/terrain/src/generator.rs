use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tileworld_common::{Block, CHUNK_SIZE, ChunkCoord};

use crate::chunk::Chunk;

/// Below this sample a cell is stone.
const STONE_BELOW: f64 = 0.1;
/// Below this sample (and at or above `STONE_BELOW`) a cell is dirt.
const DIRT_BELOW: f64 = 0.2;
const WATER_CHANCE: f64 = 0.02;
const TREE_CHANCE: f64 = 0.05;
const TRUNK_MIN: usize = 2;
const TRUNK_MAX: usize = 4;
/// Rows above this index are sky.
const SKY_ROWS: usize = CHUNK_SIZE / 2;

/// Deterministic chunk generator.
///
/// Output depends only on the world seed and the chunk coordinate. Every call
/// builds its own RNG, so generation order and history have no effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainGenerator {
    seed: u64,
}

impl TerrainGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the pristine layout of a chunk. Total over all coordinates.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        let mut rng = ChaCha8Rng::seed_from_u64(chunk_seed(self.seed, coord));
        let mut cells = [[Block::Air; CHUNK_SIZE]; CHUNK_SIZE];

        for x in 0..CHUNK_SIZE {
            for (y, row) in cells.iter_mut().enumerate() {
                let r: f64 = rng.r#gen();
                let mut block = if r < STONE_BELOW {
                    Block::Stone
                } else if r < DIRT_BELOW {
                    Block::Dirt
                } else {
                    Block::Grass
                };
                if y < SKY_ROWS {
                    block = Block::Air;
                }
                if block == Block::Grass && rng.gen_bool(WATER_CHANCE) {
                    block = Block::Water;
                }
                row[x] = block;
            }
        }

        for x in 0..CHUNK_SIZE {
            // Ground is the first solid cell scanning up from the bottom row.
            let Some(ground) = (0..CHUNK_SIZE).rev().find(|&y| !cells[y][x].is_air()) else {
                continue;
            };
            if cells[ground][x] != Block::Grass || !rng.gen_bool(TREE_CHANCE) {
                continue;
            }
            let height = rng.gen_range(TRUNK_MIN..=TRUNK_MAX);
            plant_tree(&mut cells, x, ground, height);
        }

        tracing::trace!(?coord, seed = self.seed, "generated chunk");
        Chunk::from_cells(coord, cells)
    }
}

/// Trunk of `height` wood cells above `ground`, crowned by a 3x3 leaf patch
/// that only fills air. Nothing is written outside the chunk.
fn plant_tree(
    cells: &mut [[Block; CHUNK_SIZE]; CHUNK_SIZE],
    x: usize,
    ground: usize,
    height: usize,
) {
    for h in 1..=height {
        if let Some(y) = ground.checked_sub(h) {
            cells[y][x] = Block::Wood;
        }
    }

    let top = ground as i32 - height as i32;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let lx = x as i32 + dx;
            let ly = top + dy;
            if !(0..CHUNK_SIZE as i32).contains(&lx) || !(0..CHUNK_SIZE as i32).contains(&ly) {
                continue;
            }
            let cell = &mut cells[ly as usize][lx as usize];
            if cell.is_air() {
                *cell = Block::Leaf;
            }
        }
    }
}

/// Stable per-chunk seed: both coordinates packed into one word, mixed with
/// the world seed.
pub fn chunk_seed(world_seed: u64, coord: ChunkCoord) -> u64 {
    let packed = ((coord.x as u32 as u64) << 32) | coord.y as u32 as u64;
    splitmix64(world_seed ^ splitmix64(packed))
}

/// Splitmix64 finalizer.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_common::LocalPos;

    fn sample_coords() -> Vec<ChunkCoord> {
        let mut coords = vec![
            ChunkCoord::new(i32::MIN, i32::MIN),
            ChunkCoord::new(i32::MAX, i32::MIN),
            ChunkCoord::new(i32::MIN, i32::MAX),
            ChunkCoord::new(i32::MAX, i32::MAX),
        ];
        coords.extend(ChunkCoord::new(0, 0).square(4));
        coords
    }

    #[test]
    fn generation_is_deterministic() {
        let generator = TerrainGenerator::new(0);
        for coord in sample_coords() {
            assert_eq!(generator.generate_chunk(coord), generator.generate_chunk(coord));
        }
    }

    #[test]
    fn independent_generators_agree() {
        let a = TerrainGenerator::new(99);
        let b = TerrainGenerator::new(99);
        // Generate in different orders to rule out shared state.
        let forward: Vec<_> = sample_coords().into_iter().map(|c| a.generate_chunk(c)).collect();
        let backward: Vec<_> = sample_coords()
            .into_iter()
            .rev()
            .map(|c| b.generate_chunk(c))
            .collect();
        let backward: Vec<_> = backward.into_iter().rev().collect();
        assert_eq!(forward, backward);
    }

    #[test]
    fn world_seed_changes_layout() {
        let coord = ChunkCoord::new(3, 7);
        let differs = (1..8).any(|s| {
            TerrainGenerator::new(0).generate_chunk(coord)
                != TerrainGenerator::new(s).generate_chunk(coord)
        });
        assert!(differs);
    }

    #[test]
    fn neighbouring_chunks_differ() {
        let generator = TerrainGenerator::new(0);
        let a = generator.generate_chunk(ChunkCoord::new(0, 0));
        let b = generator.generate_chunk(ChunkCoord::new(0, 1));
        let c = generator.generate_chunk(ChunkCoord::new(1, 0));
        assert_ne!(a.rows(), b.rows());
        assert_ne!(a.rows(), c.rows());
    }

    #[test]
    fn lower_half_is_solid() {
        let generator = TerrainGenerator::new(5);
        for coord in sample_coords() {
            let chunk = generator.generate_chunk(coord);
            for y in SKY_ROWS..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let block = chunk.get(LocalPos { x, y });
                    assert!(
                        !block.is_air() && block != Block::Leaf,
                        "unexpected {block} at ({x},{y}) in {coord:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn upper_half_is_sky() {
        let generator = TerrainGenerator::new(5);
        for coord in sample_coords() {
            let chunk = generator.generate_chunk(coord);
            for y in 0..SKY_ROWS {
                for x in 0..CHUNK_SIZE {
                    assert_eq!(chunk.get(LocalPos { x, y }), Block::Air);
                }
            }
        }
    }

    #[test]
    fn trunks_rise_from_bottom_row_grass() {
        let generator = TerrainGenerator::new(0);
        let bottom = CHUNK_SIZE - 1;
        let mut trunks = 0;
        for coord in ChunkCoord::new(0, 0).square(6) {
            let chunk = generator.generate_chunk(coord);
            for x in 0..CHUNK_SIZE {
                if chunk.get(LocalPos { x, y: bottom - 1 }) == Block::Wood {
                    trunks += 1;
                    assert_eq!(chunk.get(LocalPos { x, y: bottom }), Block::Grass);
                    // Shortest trunk is two cells tall.
                    assert_eq!(chunk.get(LocalPos { x, y: bottom - 2 }), Block::Wood);
                }
            }
            // The crown lands inside solid strata, so generated chunks hold no
            // leaves and no wood above the tallest trunk.
            assert_eq!(chunk.count(Block::Leaf), 0);
            for x in 0..CHUNK_SIZE {
                for y in 0..bottom - TRUNK_MAX {
                    assert_ne!(chunk.get(LocalPos { x, y }), Block::Wood);
                }
            }
        }
        assert!(trunks > 0, "expected at least one tree across 169 chunks");
    }

    #[test]
    fn leaves_never_replace_wood_or_terrain() {
        let mut cells = [[Block::Air; CHUNK_SIZE]; CHUNK_SIZE];
        for row in cells.iter_mut().skip(SKY_ROWS) {
            *row = [Block::Stone; CHUNK_SIZE];
        }
        cells[SKY_ROWS][0] = Block::Grass;
        plant_tree(&mut cells, 0, SKY_ROWS, 4);

        let top = SKY_ROWS - 4;
        assert_eq!(cells[top][0], Block::Wood);
        assert_eq!(cells[top - 1][0], Block::Leaf);
        assert_eq!(cells[top][1], Block::Leaf);
        assert_eq!(cells[top + 1][0], Block::Wood);
        assert_eq!(cells[SKY_ROWS][1], Block::Stone);
    }

    #[test]
    fn tree_at_chunk_corner_stays_in_bounds() {
        let mut cells = [[Block::Air; CHUNK_SIZE]; CHUNK_SIZE];
        cells[2][CHUNK_SIZE - 1] = Block::Grass;
        // Trunk taller than the space above ground: clipped, no panic.
        plant_tree(&mut cells, CHUNK_SIZE - 1, 2, 4);
        assert_eq!(cells[1][CHUNK_SIZE - 1], Block::Wood);
        assert_eq!(cells[0][CHUNK_SIZE - 1], Block::Wood);
        assert_eq!(cells[0][CHUNK_SIZE - 2], Block::Air);
    }

    #[test]
    fn chunk_seed_separates_swapped_coordinates() {
        assert_ne!(
            chunk_seed(0, ChunkCoord::new(1, 2)),
            chunk_seed(0, ChunkCoord::new(2, 1))
        );
    }
}
