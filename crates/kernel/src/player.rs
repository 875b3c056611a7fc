use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use tileworld_common::{Aabb, Block, ItemKind, TilePos};
use tileworld_input::{HeldDirections, HotbarSlot};
use tileworld_stream::WorldStore;

/// Counts for every [`ItemKind`], each starting at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u32; ItemKind::COUNT],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.count(kind) > 0
    }

    /// Add `amount`, saturating at `u32::MAX`.
    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Remove one unit if any is held. Returns whether a unit was removed.
    pub fn take_one(&mut self, kind: ItemKind) -> bool {
        let slot = &mut self.counts[kind.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// All kinds with their counts, in [`ItemKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        ItemKind::ALL.iter().map(|k| (*k, self.count(*k)))
    }
}

impl FromIterator<(ItemKind, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (ItemKind, u32)>>(iter: I) -> Self {
        let mut inv = Inventory::new();
        for (kind, amount) in iter {
            inv.add(kind, amount);
        }
        inv
    }
}

/// Non-zero entries, e.g. `{dirt: 9, stone: 5}`.
impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (kind, count) in self.iter().filter(|(_, c)| *c > 0) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{kind}: {count}")?;
            first = false;
        }
        f.write_str("}")
    }
}

/// The player: a box in world tile units plus an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the bounding box.
    pub position: Vec2,
    pub size: Vec2,
    pub inventory: Inventory,
    selected: ItemKind,
}

impl Player {
    pub fn new(position: Vec2, size: Vec2, inventory: Inventory) -> Self {
        Self {
            position,
            size,
            inventory,
            selected: HotbarSlot::One.item(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    /// Tile under the player's center. Place and break default to it.
    pub fn tile(&self) -> TilePos {
        TilePos::containing(self.center())
    }

    pub fn selected(&self) -> ItemKind {
        self.selected
    }

    pub fn select(&mut self, slot: HotbarSlot) {
        self.selected = slot.item();
    }

    /// Shift by `speed` per held direction. Diagonals are not normalized.
    pub fn apply_movement(&mut self, held: HeldDirections, speed: f32) {
        self.position += held.axis() * speed;
    }

    /// Write the selected material at `tile` if one is held and the tile is
    /// air. Returns the placed block.
    pub fn place_block(&mut self, store: &mut WorldStore, tile: TilePos) -> Option<Block> {
        let block = self.selected.as_block()?;
        if !self.inventory.has(self.selected) || !store.get_block(tile).is_air() {
            return None;
        }
        store.set_block(tile, block);
        self.inventory.take_one(self.selected);
        Some(block)
    }

    /// Clear `tile` and credit its kind, whatever it was. Returns the
    /// removed block, or `None` if the tile was already air.
    pub fn break_block(&mut self, store: &mut WorldStore, tile: TilePos) -> Option<Block> {
        let block = store.get_block(tile);
        let kind = ItemKind::from_block(block)?;
        store.set_block(tile, Block::Air);
        self.inventory.add(kind, 1);
        Some(block)
    }
}
