use glam::{UVec2, Vec2};
use tileworld_common::{Block, TilePos};
use tileworld_kernel::Snapshot;

/// An RGB color.
pub type Rgb = [u8; 3];

pub const PLAYER_COLOR: Rgb = [0, 100, 255];
pub const AGENT_COLOR: Rgb = [100, 200, 100];
pub const SWORD_COLOR: Rgb = [150, 150, 150];
pub const GUN_COLOR: Rgb = [80, 80, 80];
pub const PROJECTILE_COLOR: Rgb = [255, 220, 0];

/// Fill color for a block, or `None` for air (nothing is drawn).
pub fn block_color(block: Block) -> Option<Rgb> {
    match block {
        Block::Air => None,
        Block::Grass => Some([50, 200, 50]),
        Block::Dirt => Some([139, 69, 19]),
        Block::Stone => Some([100, 100, 100]),
        Block::Wood => Some([160, 82, 45]),
        Block::Leaf => Some([34, 139, 34]),
        Block::Water => Some([65, 105, 225]),
    }
}

/// Screen and tile geometry for one frame.
///
/// The camera keeps the player's top-left corner at the center of the screen.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Surface size in pixels.
    pub screen: UVec2,
    /// Pixels per world tile.
    pub tile_px: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            screen: UVec2::new(800, 600),
            tile_px: 32.0,
        }
    }
}

impl RenderView {
    /// Pixel offset subtracted from world pixels to get screen pixels.
    pub fn camera_offset(&self, player_position: Vec2) -> Vec2 {
        player_position * self.tile_px - (self.screen / 2).as_vec2()
    }

    /// Screen pixel position of a world point, in tiles.
    pub fn to_screen(&self, world: Vec2, offset: Vec2) -> Vec2 {
        world * self.tile_px - offset
    }

    /// Inclusive tile rectangle covering the screen, with one tile of margin
    /// on every side.
    pub fn visible_tiles(&self, player_position: Vec2) -> (TilePos, TilePos) {
        let tiles = (self.screen.as_vec2() / self.tile_px).floor().as_ivec2() + 2;
        let start = TilePos::containing(player_position).offset(-tiles.x / 2, -tiles.y / 2);
        (start, start.offset(tiles.x - 1, tiles.y - 1))
    }
}

/// Presentation adapter. Reads a snapshot and produces output; there is no
/// path back into the simulation.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given snapshot and view.
    fn render(&self, snapshot: &Snapshot<'_>, view: &RenderView) -> Self::Output;
}

/// `Selected: dirt | Inventory: {dirt: 10, stone: 5}`
pub fn hud_line(snapshot: &Snapshot<'_>) -> String {
    format!(
        "Selected: {} | Inventory: {}",
        snapshot.selected(),
        snapshot.inventory()
    )
}
