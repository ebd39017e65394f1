//! # wgpu Backend — Flushes as Recorded Draws
//!
//! [`SpriteBatch`](crate::batch::SpriteBatch) flushes at arbitrary points in
//! the frame, but wgpu draws have to be recorded inside a render pass. The
//! backend bridges the two: every flush uploads its vertices and indices into
//! fresh buffers right away and remembers a [`GpuDraw`]. At the end of the
//! frame [`WgpuBackend::encode`] replays the remembered draws, in order, in a
//! single pass.
//!
//! ```text
//!  flush ─► create_buffer_init(vertices) ┐
//!        ─► create_buffer_init(indices)  ├─► GpuDraw ─┐
//!        ─► draw_indexed(count, tex)     ┘            │
//!  flush ─► ...                          ───► GpuDraw ─┤
//!                                                      ▼
//!  encode(encoder, view) ─► one render pass, one draw_indexed per GpuDraw
//! ```
//!
//! Buffers are per flush rather than one shared ring. A typical frame has a
//! handful of flushes, and wgpu keeps each buffer alive until the submitted
//! commands are done with it.

use wgpu::util::DeviceExt;

use super::context::GpuContext;
use super::pipeline::SpritePipeline;
use super::texture::TextureStore;
use crate::backend::RenderBackend;
use crate::error::Result;
use crate::texture::{Texture, TextureId};
use crate::vertex::Vertex;

/// One flushed batch, ready to replay.
struct GpuDraw {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    texture: Option<TextureId>,
}

/// A [`RenderBackend`] that draws with wgpu.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: SpritePipeline,
    textures: TextureStore,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    draws: Vec<GpuDraw>,
}

impl WgpuBackend {
    /// Build the pipeline and texture store for the context's surface.
    pub fn new(gpu: &GpuContext) -> Self {
        let pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format());
        let (width, height) = gpu.surface_size();
        pipeline.set_viewport(&gpu.queue, width, height);
        let textures = TextureStore::new(&gpu.device, &gpu.queue, &pipeline);
        log::info!("wgpu backend ready ({width}x{height})");

        Self {
            device: gpu.device.clone(),
            queue: gpu.queue.clone(),
            pipeline,
            textures,
            vertex_buffer: None,
            index_buffer: None,
            draws: Vec::new(),
        }
    }

    /// Follow a surface resize. Positions stay in pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pipeline.set_viewport(&self.queue, width, height);
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    /// Upload raw RGBA8 pixels as a new texture.
    pub fn create_texture_from_rgba(&mut self, label: &str, width: u32, height: u32, data: &[u8]) -> Result<Texture> {
        self.textures
            .create_texture_from_rgba(&self.pipeline, label, width, height, data)
    }

    /// Load an image file as a new texture (cached by path).
    pub fn load_texture(&mut self, path: impl AsRef<std::path::Path>) -> Result<Texture> {
        self.textures.load_texture(&self.pipeline, path)
    }

    /// Draws recorded since the last `encode`.
    pub fn pending_draws(&self) -> usize {
        self.draws.len()
    }

    /// Record one render pass onto `view` replaying every pending draw, then
    /// forget them. With `clear` set the target is cleared first.
    pub fn encode(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, clear: Option<wgpu::Color>) {
        let load = match clear {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("batch2d pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline.pipeline);
        pass.set_bind_group(0, &self.pipeline.camera_bind_group, &[]);
        for draw in &self.draws {
            pass.set_bind_group(1, self.textures.bind_group(draw.texture), &[]);
            pass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
            pass.set_index_buffer(draw.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
        drop(pass);

        self.draws.clear();
    }

    /// Encode, submit and present one frame on the context's surface.
    ///
    /// When no surface texture can be acquired the frame is dropped: its
    /// draws are discarded with it, so the next present starts clean.
    pub fn present(&mut self, gpu: &GpuContext, clear: [f64; 4]) -> Result<(), wgpu::SurfaceError> {
        let output = acquire_or_discard(gpu.surface.get_current_texture(), &mut self.draws)?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("batch2d frame encoder"),
            });

        let [r, g, b, a] = clear;
        self.encode(&mut encoder, &view, Some(wgpu::Color { r, g, b, a }));

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Pass an acquired frame through, or clear `draws` if there is none.
fn acquire_or_discard<T, E: std::fmt::Display, D>(acquired: Result<T, E>, draws: &mut Vec<D>) -> Result<T, E> {
    acquired.inspect_err(|err| {
        if !draws.is_empty() {
            log::warn!("surface unavailable ({err}), dropping {} draw(s)", draws.len());
        }
        draws.clear();
    })
}

impl RenderBackend for WgpuBackend {
    fn upload_vertices(&mut self, vertices: &[Vertex]) {
        self.vertex_buffer = Some(self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("batch2d vertex buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn upload_indices(&mut self, indices: &[u32]) {
        self.index_buffer = Some(self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("batch2d index buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn draw_indexed(&mut self, index_count: u32, texture: Option<&Texture>) {
        let (Some(vertex_buffer), Some(index_buffer)) = (self.vertex_buffer.take(), self.index_buffer.take()) else {
            log::warn!("draw_indexed without uploaded buffers, skipped");
            return;
        };
        self.draws.push(GpuDraw {
            vertex_buffer,
            index_buffer,
            index_count,
            texture: texture.map(Texture::id),
        });
    }
}
