//! # batch2d — Immediate-Mode 2D Sprite and Shape Batching
//!
//! Issue draw calls for sprites, rectangles, triangles, circles, arcs and
//! thick lines every frame; the batcher tessellates them on the spot, applies
//! the current transform, and accumulates everything into one vertex buffer
//! and one index buffer. A batch is only broken when the bound texture
//! changes, so a frame of mixed sprites and shapes typically costs one draw
//! call per texture switch.
//!
//! ```text
//!  draw_*() ──► tessellate ──► transform stack ──► pending vertices/indices
//!                                                         │
//!                        set_texture(other) / render() ───┤ flush
//!                                                         ▼
//!                                                  RenderBackend
//!                                           (WgpuBackend, RecordingBackend)
//! ```
//!
//! Start with `use batch2d::prelude::*` and a [`SpriteBatch`](batch::SpriteBatch).

pub mod backend;
pub mod batch;
pub mod color;
pub mod config;
pub mod diag;
pub mod error;
pub mod math;
pub mod prelude;
pub mod tessellate;
pub mod texture;
pub mod transform;
pub mod vertex;

#[cfg(feature = "wgpu")]
pub mod gpu;

pub use error::{BatchError, Result};
