//! Convenience re-exports — `use batch2d::prelude::*` for the common items.

pub use crate::backend::{RecordingBackend, RenderBackend, RenderCall};
pub use crate::batch::{Sprite, SpriteBatch};
pub use crate::color::{Color, ColorMix};
pub use crate::config::BatchConfig;
pub use crate::diag::BatchStats;
pub use crate::error::{BatchError, Result};
pub use crate::math::{IntRect, Rect, Transform2d, Vec2};
pub use crate::texture::{Texture, TextureId, TextureRegion};
pub use crate::transform::TransformStack;
pub use crate::vertex::Vertex;
#[cfg(feature = "wgpu")]
pub use crate::gpu::{GpuContext, TextureStore, WgpuBackend};
