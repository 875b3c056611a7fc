use glam::Vec2;
use tileworld_common::{ItemKind, TilePos};

/// Material hotkeys. Only terrain kinds are selectable; sword and gun have
/// their own actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotbarSlot {
    One,
    Two,
    Three,
}

impl HotbarSlot {
    pub fn item(self) -> ItemKind {
        match self {
            HotbarSlot::One => ItemKind::Dirt,
            HotbarSlot::Two => ItemKind::Stone,
            HotbarSlot::Three => ItemKind::Wood,
        }
    }
}

/// Directions held down during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Unnormalized step direction in world axes (y grows downward). Each
    /// held key contributes one unit, so diagonals have length sqrt(2).
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }
}

/// A discrete action decoded from any input device.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Pick the material used by [`Intent::Place`].
    Select(HotbarSlot),
    /// One melee swing around the player.
    Attack,
    /// Fire toward `aim` (any non-zero vector; normalized by the kernel).
    Fire { aim: Vec2 },
    /// Place the selected material. `None` targets the player's tile.
    Place { target: Option<TilePos> },
    /// Break a block. `None` targets the player's tile.
    Break { target: Option<TilePos> },
    /// Stop the simulation loop.
    Quit,
}

/// Everything the player did during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub held: HeldDirections,
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_intent(intent: Intent) -> Self {
        Self {
            held: HeldDirections::default(),
            intents: vec![intent],
        }
    }

    pub fn holding(held: HeldDirections) -> Self {
        Self {
            held,
            intents: Vec::new(),
        }
    }
}
