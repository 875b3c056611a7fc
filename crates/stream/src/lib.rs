//! Streaming: the in-memory chunk store and its load/unload policy.
//!
//! # Invariants
//! - A chunk is present iff it was requested (directly or by streaming) and
//!   has not been evicted since.
//! - Eviction drops in-memory edits; re-entry regenerates the pristine chunk.
//! - Streaming loads before it unloads, so chunks inside the load radius are
//!   never evicted by the same pass.

mod config;
mod store;

pub use config::{StreamConfig, StreamStats};
pub use store::{StreamReport, WorldStore};
