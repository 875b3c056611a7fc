//! World Kernel: authoritative simulation state and per-tick stepping.
//!
//! # Invariants
//! - Given the same config and input sequence, [`World::step`] evolves the
//!   world identically. The only randomness is a seeded ChaCha8 stream.
//! - All state mutations flow through explicit [`World`] operations and are
//!   recorded in its event log.
//! - Presentation only ever sees a borrowed [`Snapshot`].

pub mod config;
pub mod daycycle;
pub mod entities;
pub mod player;
pub mod snapshot;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use daycycle::DayCycle;
pub use entities::{Agent, EntityRegistry, Hit, Pickup, PickupKind, Projectile};
pub use player::{Inventory, Player};
pub use snapshot::Snapshot;
pub use world::{TickStatus, World, WorldEvent};
