//! Input: decoded player intents.
//!
//! # Invariants
//! - The kernel consumes intents, never raw device events.
//! - A [`TickInput`] describes exactly one simulation tick.

pub mod intent;
pub mod script;

pub use intent::{HeldDirections, HotbarSlot, Intent, TickInput};
pub use script::{MAX_REPEAT, MAX_SCRIPT_TICKS, ScriptError, parse_script};
