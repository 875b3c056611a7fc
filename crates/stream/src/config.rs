use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Streaming radii, in chunks, measured as Chebyshev distance from the
/// viewer's chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Every chunk within this radius is materialized each tick.
    pub load_radius: u32,
    /// Chunks beyond this radius are evicted. Must be `>= load_radius`; the
    /// gap forms a retained ring that absorbs back-and-forth movement.
    pub unload_radius: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            load_radius: 2,
            unload_radius: 3,
        }
    }
}

impl StreamConfig {
    /// Largest radius a config may request.
    pub const MAX_RADIUS: u32 = 64;

    pub fn is_valid(&self) -> bool {
        self.unload_radius >= self.load_radius && self.unload_radius <= Self::MAX_RADIUS
    }

    /// Size of the unload square: the most chunks a streaming pass can
    /// leave resident.
    pub fn max_resident(&self) -> usize {
        let side = 2 * self.unload_radius as usize + 1;
        side * side
    }
}

/// Per-tick streaming statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub chunks_loaded_this_tick: usize,
    pub chunks_unloaded_this_tick: usize,
    pub total_loaded_chunks: usize,
    pub stream_time: Duration,
}
