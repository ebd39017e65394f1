//! # Vertex — Per-Corner Data Sent to the GPU
//!
//! Every primitive the batcher emits ends up as a run of [`Vertex`] values in
//! one growing buffer. A vertex carries a position (already transformed by
//! the transform stack), a texture coordinate, the primary color and the
//! [`ColorMix`](crate::color::ColorMix) weights.
//!
//! ## Memory Layout
//!
//! `#[repr(C)]` plus `bytemuck::Pod` lets a `&[Vertex]` be cast straight to
//! `&[u8]` for upload. All fields are `f32`, so there is no padding.
//!
//! ```text
//! Vertex (44 bytes per vertex)
//! ┌──────────────┬──────────────┬────────────────────┬────────────────┐
//! │ position     │ uv           │ color              │ mix            │
//! │ [f32; 2]     │ [f32; 2]     │ [f32; 4]           │ [f32; 3]       │
//! │ offset 0     │ offset 8     │ offset 16          │ offset 32      │
//! │ location(0)  │ location(1)  │ location(2)        │ location(3)    │
//! └──────────────┴──────────────┴────────────────────┴────────────────┘
//! ```
//!
//! Positions are in the caller's coordinate space after the transform stack
//! has been applied. The shader only adds the camera projection, which is
//! what lets differently transformed primitives share one draw call.

use bytemuck::{Pod, Zeroable};

use crate::color::{Color, ColorMix};
use crate::math::Vec2;

/// Per-vertex data for every batched primitive.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
    pub mix: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec2, uv: Vec2, color: Color, mix: ColorMix) -> Self {
        Self {
            position: position.to_array(),
            uv: uv.to_array(),
            color: color.to_array(),
            mix: mix.to_array(),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

#[cfg(feature = "wgpu")]
impl Vertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 16,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
            // mix
            wgpu::VertexAttribute {
                offset: 32,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };
}
