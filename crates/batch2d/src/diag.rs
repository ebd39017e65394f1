//! Per-frame batching statistics.
//!
//! The batcher keeps two sets of counters: the frame in progress and the last
//! frame closed by [`render`]. With the `diagnostics` feature the closed frame
//! is also traced as one line of JSON.
//!
//! [`render`]: crate::batch::SpriteBatch::render

use serde::Serialize;

/// What the batcher did since the last `render()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    /// Backend draw calls issued.
    pub draw_calls: u32,
    /// Vertices submitted across all draws.
    pub vertices: u32,
    /// Indices submitted across all draws.
    pub indices: u32,
    /// Flushes forced by a texture change.
    pub texture_flushes: u32,
    /// Flushes forced by the vertex limit.
    pub overflow_flushes: u32,
    /// Draw calls that produced no geometry.
    pub degenerate_primitives: u32,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact one-line JSON, for piping into external tools.
    #[cfg(feature = "diagnostics")]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(all(test, feature = "diagnostics"))]
mod tests {
    use super::*;

    #[test]
    fn serializes_every_counter() {
        let stats = BatchStats {
            draw_calls: 2,
            vertices: 8,
            ..BatchStats::new()
        };
        let json = stats.to_json();
        assert!(json.contains("\"draw_calls\":2"));
        assert!(json.contains("\"degenerate_primitives\":0"));
    }
}
