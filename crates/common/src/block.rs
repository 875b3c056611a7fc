use serde::{Deserialize, Serialize};
use std::fmt;

/// A single world cell. No per-block metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaf,
    Water,
}

impl Block {
    pub const ALL: [Block; 7] = [
        Block::Air,
        Block::Grass,
        Block::Dirt,
        Block::Stone,
        Block::Wood,
        Block::Leaf,
        Block::Water,
    ];

    pub fn is_air(self) -> bool {
        self == Block::Air
    }

    pub fn name(self) -> &'static str {
        match self {
            Block::Air => "air",
            Block::Grass => "grass",
            Block::Dirt => "dirt",
            Block::Stone => "stone",
            Block::Wood => "wood",
            Block::Leaf => "leaf",
            Block::Water => "water",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything an inventory can count.
///
/// Terrain kinds mirror [`Block`] minus air; `Sword`, `Gun` and `Ammo` are
/// only obtainable through pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaf,
    Water,
    Sword,
    Gun,
    Ammo,
}

impl ItemKind {
    pub const COUNT: usize = 9;

    pub const ALL: [ItemKind; Self::COUNT] = [
        ItemKind::Grass,
        ItemKind::Dirt,
        ItemKind::Stone,
        ItemKind::Wood,
        ItemKind::Leaf,
        ItemKind::Water,
        ItemKind::Sword,
        ItemKind::Gun,
        ItemKind::Ammo,
    ];

    /// Dense index in `0..COUNT`, matching the order of [`ItemKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The inventory kind a broken block yields. Air yields nothing.
    pub fn from_block(block: Block) -> Option<ItemKind> {
        match block {
            Block::Air => None,
            Block::Grass => Some(ItemKind::Grass),
            Block::Dirt => Some(ItemKind::Dirt),
            Block::Stone => Some(ItemKind::Stone),
            Block::Wood => Some(ItemKind::Wood),
            Block::Leaf => Some(ItemKind::Leaf),
            Block::Water => Some(ItemKind::Water),
        }
    }

    /// The block written when this kind is placed, if it is a terrain kind.
    pub fn as_block(self) -> Option<Block> {
        match self {
            ItemKind::Grass => Some(Block::Grass),
            ItemKind::Dirt => Some(Block::Dirt),
            ItemKind::Stone => Some(Block::Stone),
            ItemKind::Wood => Some(Block::Wood),
            ItemKind::Leaf => Some(Block::Leaf),
            ItemKind::Water => Some(Block::Water),
            ItemKind::Sword | ItemKind::Gun | ItemKind::Ammo => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Grass => "grass",
            ItemKind::Dirt => "dirt",
            ItemKind::Stone => "stone",
            ItemKind::Wood => "wood",
            ItemKind::Leaf => "leaf",
            ItemKind::Water => "water",
            ItemKind::Sword => "sword",
            ItemKind::Gun => "gun",
            ItemKind::Ammo => "ammo",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_block_is_air() {
        assert!(Block::default().is_air());
    }

    #[test]
    fn item_indices_are_dense() {
        for (i, kind) in ItemKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn every_solid_block_maps_back_to_itself() {
        for block in Block::ALL {
            match ItemKind::from_block(block) {
                Some(kind) => assert_eq!(kind.as_block(), Some(block)),
                None => assert!(block.is_air()),
            }
        }
    }

    #[test]
    fn equipment_is_not_placeable() {
        assert_eq!(ItemKind::Sword.as_block(), None);
        assert_eq!(ItemKind::Gun.as_block(), None);
        assert_eq!(ItemKind::Ammo.as_block(), None);
    }

    #[test]
    fn names_are_lowercase() {
        assert_eq!(Block::Water.to_string(), "water");
        assert_eq!(ItemKind::Sword.to_string(), "sword");
    }
}
