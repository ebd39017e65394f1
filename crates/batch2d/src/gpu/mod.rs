//! wgpu submission: the GPU context, the sprite pipeline, the texture store
//! and the [`WgpuBackend`] that turns batch flushes into draw calls.

mod backend;
mod context;
mod pipeline;
mod texture;

pub use backend::WgpuBackend;
pub use context::GpuContext;
pub use pipeline::SpritePipeline;
pub use texture::TextureStore;
