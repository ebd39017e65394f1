//! Batcher configuration.
//!
//! Everything has a sensible default, so a config file only needs the fields
//! it wants to change:
//!
//! ```json
//! { "circle_steps": 32, "clear_color": [0.0, 0.0, 0.0, 1.0] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};

/// Tunables for a [`SpriteBatch`](crate::batch::SpriteBatch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Vertices reserved up front. The buffer still grows past this.
    pub vertex_capacity: usize,
    /// Indices reserved up front. The buffer still grows past this.
    pub index_capacity: usize,
    /// Angular samples used by the circle helpers that take no explicit
    /// step count.
    pub circle_steps: u32,
    /// Pending vertices that force a flush before the next primitive. The
    /// default keeps every index representable as `u32`.
    pub max_batch_vertices: u32,
    /// Background color for backends that clear the target.
    pub clear_color: [f64; 4],
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            vertex_capacity: 4096,
            index_capacity: 6144,
            circle_steps: 15,
            max_batch_vertices: u32::MAX,
            clear_color: [0.1, 0.1, 0.15, 1.0],
        }
    }
}

impl BatchConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| BatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded batch config from {}", path.display());
        Ok(config)
    }
}
