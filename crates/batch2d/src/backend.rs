//! # Backend — Where Flushed Batches Go
//!
//! The batcher knows nothing about GPUs. When it flushes it hands a
//! [`RenderBackend`] three things, in this order and exactly once each:
//!
//! ```text
//! flush()
//!   ├── upload_vertices(&[Vertex])      whole pending vertex buffer
//!   ├── upload_indices(&[u32])          whole pending index buffer
//!   └── draw_indexed(count, texture)    one indexed draw of `count` indices
//! ```
//!
//! The slices are only borrowed for the duration of the call; the batcher
//! clears them right after. A backend that needs the data later (to replay
//! it inside a render pass, say) must copy it.
//!
//! Two backends ship with the crate:
//!
//! - [`WgpuBackend`](crate::gpu::WgpuBackend) (feature `wgpu`) uploads to GPU
//!   buffers and replays the draws in a render pass.
//! - [`RecordingBackend`] keeps everything in memory. Tests use it to look at
//!   exactly what was submitted; headless tools can use it to capture frames.

use crate::texture::{Texture, TextureId};
use crate::vertex::Vertex;

/// Receives the contents of each flushed batch.
pub trait RenderBackend {
    /// Upload the vertices referenced by the next draw.
    fn upload_vertices(&mut self, vertices: &[Vertex]);

    /// Upload the indices referenced by the next draw.
    fn upload_indices(&mut self, indices: &[u32]);

    /// Draw `index_count` indices from the uploaded buffers, sampling
    /// `texture` (or the backend's default white texture for `None`).
    fn draw_indexed(&mut self, index_count: u32, texture: Option<&Texture>);
}

impl<B: RenderBackend + ?Sized> RenderBackend for &mut B {
    fn upload_vertices(&mut self, vertices: &[Vertex]) {
        (**self).upload_vertices(vertices);
    }

    fn upload_indices(&mut self, indices: &[u32]) {
        (**self).upload_indices(indices);
    }

    fn draw_indexed(&mut self, index_count: u32, texture: Option<&Texture>) {
        (**self).draw_indexed(index_count, texture);
    }
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    UploadVertices { count: usize },
    UploadIndices { count: usize },
    DrawIndexed { index_count: u32, texture: Option<TextureId> },
}

/// One submitted batch with copies of the data it drew.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub index_count: u32,
    pub texture: Option<TextureId>,
}

/// A backend that stores everything it is given.
///
/// # Example
///
/// ```
/// use batch2d::backend::{RecordingBackend, RenderCall};
/// use batch2d::batch::SpriteBatch;
/// use batch2d::color::Color;
/// use batch2d::math::Rect;
///
/// let mut batch = SpriteBatch::new(RecordingBackend::new());
/// batch.draw_rect_fill(Rect::new(0.0, 0.0, 8.0, 8.0), Color::RED);
/// batch.render();
///
/// let backend = batch.backend();
/// assert_eq!(backend.draws().len(), 1);
/// assert_eq!(
///     backend.calls().last(),
///     Some(&RenderCall::DrawIndexed { index_count: 6, texture: None })
/// );
/// ```
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<RenderCall>,
    draws: Vec<RecordedDraw>,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in the order it was made.
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Every draw, each with the buffers that were uploaded for it.
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.draws.clear();
        self.vertices.clear();
        self.indices.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn upload_vertices(&mut self, vertices: &[Vertex]) {
        self.calls.push(RenderCall::UploadVertices {
            count: vertices.len(),
        });
        self.vertices = vertices.to_vec();
    }

    fn upload_indices(&mut self, indices: &[u32]) {
        self.calls.push(RenderCall::UploadIndices {
            count: indices.len(),
        });
        self.indices = indices.to_vec();
    }

    fn draw_indexed(&mut self, index_count: u32, texture: Option<&Texture>) {
        let texture = texture.map(Texture::id);
        self.calls.push(RenderCall::DrawIndexed {
            index_count,
            texture,
        });
        self.draws.push(RecordedDraw {
            vertices: std::mem::take(&mut self.vertices),
            indices: std::mem::take(&mut self.indices),
            index_count,
            texture,
        });
    }
}
