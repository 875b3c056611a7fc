use std::collections::BTreeMap;
use tileworld_common::{Block, ChunkCoord, ItemKind, TilePos};
use tileworld_terrain::Chunk;

use crate::entities::{Agent, Pickup, Projectile};
use crate::player::{Inventory, Player};

/// Read-only view of one tick, handed to presentation.
///
/// Borrows the world, so it cannot outlive the next `step` and nothing
/// holding it can mutate simulation state.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub chunks: &'a BTreeMap<ChunkCoord, Chunk>,
    pub player: &'a Player,
    pub agents: &'a [Agent],
    pub projectiles: &'a [Projectile],
    pub pickups: &'a [Pickup],
    pub daylight: f32,
    pub ambient: [u8; 3],
}

impl<'a> Snapshot<'a> {
    pub fn inventory(&self) -> &'a Inventory {
        &self.player.inventory
    }

    pub fn selected(&self) -> ItemKind {
        self.player.selected()
    }

    /// Block at `tile`, or `None` if its chunk is not loaded. Never generates.
    pub fn block_at(&self, tile: TilePos) -> Option<Block> {
        self.chunks.get(&tile.chunk()).map(|c| c.get(tile.local()))
    }

    /// Loaded chunks overlapping the inclusive tile rectangle `min..=max`.
    pub fn chunks_in_view(
        &self,
        min: TilePos,
        max: TilePos,
    ) -> impl Iterator<Item = &'a Chunk> + 'a {
        let (a, b) = (min.chunk(), max.chunk());
        let lo = ChunkCoord::new(a.x.min(b.x), a.y.min(b.y));
        let hi = ChunkCoord::new(a.x.max(b.x), a.y.max(b.y));
        self.chunks
            .range(ChunkCoord::new(lo.x, i32::MIN)..=ChunkCoord::new(hi.x, i32::MAX))
            .filter(move |(c, _)| c.y >= lo.y && c.y <= hi.y)
            .map(|(_, chunk)| chunk)
    }
}
