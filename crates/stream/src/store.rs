use std::collections::BTreeMap;
use std::time::Instant;

use tileworld_common::{Block, ChunkCoord, TilePos};
use tileworld_terrain::{Chunk, TerrainGenerator};

use crate::config::{StreamConfig, StreamStats};

/// Chunks materialized and evicted by one streaming pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub loaded: Vec<ChunkCoord>,
    pub unloaded: Vec<ChunkCoord>,
}

/// Owns every currently materialized chunk.
///
/// Reads and writes through tile coordinates generate missing chunks on
/// demand. Uses BTreeMap so iteration order is deterministic.
#[derive(Debug, Clone)]
pub struct WorldStore {
    generator: TerrainGenerator,
    chunks: BTreeMap<ChunkCoord, Chunk>,
    stats: StreamStats,
}

impl WorldStore {
    pub fn new(generator: TerrainGenerator) -> Self {
        Self {
            generator,
            chunks: BTreeMap::new(),
            stats: StreamStats::default(),
        }
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Read a tile, generating its chunk first if absent.
    pub fn get_block(&mut self, tile: TilePos) -> Block {
        self.ensure(tile.chunk()).get(tile.local())
    }

    /// Write a tile, generating its chunk first if absent.
    pub fn set_block(&mut self, tile: TilePos, block: Block) {
        self.ensure(tile.chunk()).set(tile.local(), block);
    }

    /// Read a tile without generating. `None` if its chunk is not loaded.
    pub fn peek_block(&self, tile: TilePos) -> Option<Block> {
        self.chunks.get(&tile.chunk()).map(|c| c.get(tile.local()))
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunks(&self) -> &BTreeMap<ChunkCoord, Chunk> {
        &self.chunks
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Statistics from the last [`WorldStore::stream`] pass.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }

    /// Materialize every chunk within Chebyshev distance `radius` of
    /// `center`. Returns the chunks that were newly generated.
    pub fn load_nearby(&mut self, center: ChunkCoord, radius: u32) -> Vec<ChunkCoord> {
        let mut loaded = Vec::new();
        for coord in center.square(radius) {
            if self.chunks.contains_key(&coord) {
                continue;
            }
            tracing::debug!(?coord, "loading chunk");
            self.chunks.insert(coord, self.generator.generate_chunk(coord));
            loaded.push(coord);
        }
        loaded
    }

    /// Evict every chunk farther than `radius` from `center`. Returns the
    /// evicted coordinates in ascending order.
    pub fn unload_far(&mut self, center: ChunkCoord, radius: u32) -> Vec<ChunkCoord> {
        let unloaded: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|c| c.chebyshev(center) > radius)
            .copied()
            .collect();
        for coord in &unloaded {
            tracing::debug!(?coord, "unloading chunk");
            self.chunks.remove(coord);
        }
        unloaded
    }

    /// One streaming pass around `center`: load, then unload.
    pub fn stream(&mut self, center: ChunkCoord, config: &StreamConfig) -> StreamReport {
        let _span = tracing::info_span!("stream_update").entered();
        debug_assert!(
            config.is_valid(),
            "invalid stream radii: load {} unload {}",
            config.load_radius,
            config.unload_radius
        );
        let start = Instant::now();

        let loaded = self.load_nearby(center, config.load_radius);
        let unloaded = self.unload_far(center, config.unload_radius);

        self.stats = StreamStats {
            chunks_loaded_this_tick: loaded.len(),
            chunks_unloaded_this_tick: unloaded.len(),
            total_loaded_chunks: self.chunks.len(),
            stream_time: start.elapsed(),
        };

        tracing::trace!(
            loaded = loaded.len(),
            unloaded = unloaded.len(),
            total = self.chunks.len(),
            "stream update complete"
        );

        StreamReport { loaded, unloaded }
    }

    fn ensure(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let generator = self.generator;
        self.chunks.entry(coord).or_insert_with(|| {
            tracing::debug!(?coord, "generating chunk on access");
            generator.generate_chunk(coord)
        })
    }
}
