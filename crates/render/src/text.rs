use tileworld_common::{Block, TilePos};
use tileworld_kernel::{PickupKind, Snapshot};

use crate::renderer::{RenderView, Renderer, hud_line};

/// One-character rendering of a block.
pub fn block_glyph(block: Block) -> char {
    match block {
        Block::Air => '.',
        Block::Grass => '"',
        Block::Dirt => '#',
        Block::Stone => '%',
        Block::Wood => '|',
        Block::Leaf => '&',
        Block::Water => '~',
    }
}

/// Glyph for tiles whose chunk is not loaded.
pub const UNLOADED_GLYPH: char = ' ';

/// ASCII viewport centered on the player, plus the HUD line.
///
/// Each entity is drawn at the tile under its center. Where several share a
/// tile the later layer wins: pickups, projectiles, agents, then the player
/// as `@`.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// Viewport width in tiles.
    pub columns: u32,
    /// Viewport height in tiles.
    pub rows: u32,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self {
            columns: 40,
            rows: 20,
        }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, snapshot: &Snapshot<'_>, _view: &RenderView) -> String {
        let (cols, rows) = (self.columns as i32, self.rows as i32);
        let origin = snapshot.player.tile().offset(-cols / 2, -rows / 2);

        let mut grid: Vec<Vec<char>> = (0..rows)
            .map(|y| {
                (0..cols)
                    .map(|x| {
                        snapshot
                            .block_at(origin.offset(x, y))
                            .map_or(UNLOADED_GLYPH, block_glyph)
                    })
                    .collect()
            })
            .collect();

        let mut plot = |tile: TilePos, glyph: char| {
            let (x, y) = (tile.x.wrapping_sub(origin.x), tile.y.wrapping_sub(origin.y));
            if (0..cols).contains(&x) && (0..rows).contains(&y) {
                grid[y as usize][x as usize] = glyph;
            }
        };
        for pickup in snapshot.pickups {
            let glyph = match pickup.kind {
                PickupKind::Sword => 's',
                PickupKind::Gun => 'g',
            };
            plot(TilePos::containing(pickup.bounds().center()), glyph);
        }
        for projectile in snapshot.projectiles {
            plot(TilePos::containing(projectile.bounds().center()), '+');
        }
        for agent in snapshot.agents {
            plot(TilePos::containing(agent.bounds().center()), 'Z');
        }
        plot(snapshot.player.tile(), '@');

        let mut out = format!(
            "=== tick={} daylight={:.2} agents={} projectiles={} pickups={} ===\n",
            snapshot.tick,
            snapshot.daylight,
            snapshot.agents.len(),
            snapshot.projectiles.len(),
            snapshot.pickups.len()
        );
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&hud_line(snapshot));
        out.push('\n');
        out
    }
}
