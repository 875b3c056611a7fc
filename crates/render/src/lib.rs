//! Rendering Adapter: presentation over kernel snapshots.
//!
//! # Invariants
//! - Renderers cannot mutate world truth; they only see a [`Snapshot`].
//! - Screen rectangles are derived per frame from tile-unit positions and
//!   the camera offset.
//!
//! [`Snapshot`]: tileworld_kernel::Snapshot

mod draw;
mod renderer;
mod text;

pub use draw::{DrawList, DrawListRenderer, DrawRect};
pub use renderer::{Renderer, RenderView, Rgb, block_color, hud_line};
pub use text::{DebugTextRenderer, UNLOADED_GLYPH, block_glyph};
