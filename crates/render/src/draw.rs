use glam::Vec2;
use tileworld_common::{Aabb, TilePos};
use tileworld_kernel::{PickupKind, Snapshot};

use crate::renderer::{
    AGENT_COLOR, GUN_COLOR, PLAYER_COLOR, PROJECTILE_COLOR, RenderView, Renderer, Rgb,
    SWORD_COLOR, block_color, hud_line,
};

/// A filled screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub min: Vec2,
    pub size: Vec2,
    pub color: Rgb,
}

/// One frame as an ordered list of fills: clear color, then rectangles back
/// to front, then the HUD text.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    pub clear: Rgb,
    pub rects: Vec<DrawRect>,
    pub hud: String,
}

/// Emits pixel rectangles for any 2D rasterizer to fill.
///
/// Draw order: visible blocks, pickups, projectiles, agents, player.
#[derive(Debug, Default)]
pub struct DrawListRenderer;

impl DrawListRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DrawListRenderer {
    type Output = DrawList;

    fn render(&self, snapshot: &Snapshot<'_>, view: &RenderView) -> DrawList {
        let offset = view.camera_offset(snapshot.player.position);
        let rect = |bounds: Aabb, color: Rgb| DrawRect {
            min: view.to_screen(bounds.min, offset),
            size: bounds.size * view.tile_px,
            color,
        };

        let mut rects = Vec::new();
        let (min, max) = view.visible_tiles(snapshot.player.position);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                let tile = TilePos::new(x, y);
                let Some(color) = snapshot.block_at(tile).and_then(block_color) else {
                    continue;
                };
                rects.push(rect(Aabb::new(tile.to_world(), Vec2::ONE), color));
            }
        }
        for pickup in snapshot.pickups {
            let color = match pickup.kind {
                PickupKind::Sword => SWORD_COLOR,
                PickupKind::Gun => GUN_COLOR,
            };
            rects.push(rect(pickup.bounds(), color));
        }
        for projectile in snapshot.projectiles {
            rects.push(rect(projectile.bounds(), PROJECTILE_COLOR));
        }
        for agent in snapshot.agents {
            rects.push(rect(agent.bounds(), AGENT_COLOR));
        }
        rects.push(rect(snapshot.player.bounds(), PLAYER_COLOR));

        tracing::trace!(tick = snapshot.tick, rects = rects.len(), "draw list built");
        DrawList {
            clear: snapshot.ambient,
            rects,
            hud: hud_line(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_common::{Block, ItemKind};
    use tileworld_input::TickInput;
    use tileworld_kernel::{SimConfig, World};

    fn stepped_world() -> World {
        let mut config = SimConfig::with_seed(5);
        config.day.spawn_chance = 0.0;
        let mut world = World::new(config);
        world.step(&TickInput::idle());
        world
    }

    #[test]
    fn clears_with_ambient_sky() {
        let world = stepped_world();
        let list = DrawListRenderer::new().render(&world.snapshot(), &RenderView::default());
        assert_eq!(list.clear, world.day().ambient_color());
        assert!(list.hud.starts_with("Selected: dirt"));
    }

    #[test]
    fn player_is_drawn_last_at_screen_center() {
        let world = stepped_world();
        let list = DrawListRenderer::new().render(&world.snapshot(), &RenderView::default());
        let last = list.rects.last().copied().unwrap();
        assert_eq!(last.color, PLAYER_COLOR);
        assert_eq!(last.min, Vec2::new(400.0, 300.0));
        assert_eq!(last.size, Vec2::splat(32.0));
    }

    #[test]
    fn blocks_map_to_tile_sized_rects() {
        let mut world = stepped_world();
        let tile = TilePos::new(2, -1);
        world.store_mut().set_block(tile, Block::Water);
        let list = DrawListRenderer::new().render(&world.snapshot(), &RenderView::default());
        let water = DrawRect {
            min: Vec2::new(400.0 + 64.0, 300.0 - 32.0),
            size: Vec2::splat(32.0),
            color: block_color(Block::Water).unwrap(),
        };
        assert!(list.rects.contains(&water));
    }

    #[test]
    fn air_produces_no_rects() {
        let mut world = stepped_world();
        let (min, max) = RenderView::default().visible_tiles(world.player().position);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                world.store_mut().set_block(TilePos::new(x, y), Block::Air);
            }
        }
        let list = DrawListRenderer::new().render(&world.snapshot(), &RenderView::default());
        assert_eq!(list.rects.len(), 1);
    }

    #[test]
    fn entities_use_their_colors() {
        let mut world = stepped_world();
        world
            .entities_mut()
            .spawn_agent(Vec2::new(3.0, 3.0), Vec2::ONE, 3);
        world
            .entities_mut()
            .spawn_pickup(Vec2::new(-3.0, 3.0), Vec2::splat(0.5), PickupKind::Gun);
        world.player_mut().inventory.add(ItemKind::Gun, 1);
        world.player_mut().inventory.add(ItemKind::Ammo, 1);
        world.fire(Vec2::Y);

        let list = DrawListRenderer::new().render(&world.snapshot(), &RenderView::default());
        let colors: Vec<_> = list.rects.iter().rev().take(4).map(|r| r.color).collect();
        assert_eq!(colors, vec![PLAYER_COLOR, AGENT_COLOR, PROJECTILE_COLOR, GUN_COLOR]);
    }
}
