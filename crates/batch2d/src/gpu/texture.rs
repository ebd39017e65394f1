//! # Texture Store — Image Data on the GPU
//!
//! The batcher only ever sees [`Texture`] handles. The store owns the GPU
//! side: one `wgpu::Texture` plus bind group per handle, addressed by the
//! handle's [`TextureId`].
//!
//! ```text
//! TextureStore
//! ┌───────────────────────────────────────────────┐
//! │ entries: Vec<TextureEntry>                    │
//! │   [0] 1x1 white (default)   ◄── always here   │
//! │   [1] "player.png"                            │
//! │   [2] "tileset.png"                           │
//! │   ...                                         │
//! │                                               │
//! │ path_cache: HashMap<PathBuf, Texture>         │
//! │   "player.png"  → Texture(1)                  │
//! │   "tileset.png" → Texture(2)                  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## The 1x1 White Default Texture
//!
//! Entry 0 is a single white pixel. A draw submitted with no texture binds it,
//! so untextured sprites sample white and come out as their tint color, and
//! shapes (which ignore the sample) need no separate pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use wgpu::util::DeviceExt;

use super::pipeline::SpritePipeline;
use crate::error::{BatchError, Result};
use crate::texture::{Texture, TextureId};

pub(crate) struct TextureEntry {
    pub bind_group: wgpu::BindGroup,
}

/// All uploaded GPU textures and their bind groups.
pub struct TextureStore {
    device: wgpu::Device,
    queue: wgpu::Queue,
    entries: Vec<TextureEntry>,
    path_cache: HashMap<PathBuf, Texture>,
}

impl TextureStore {
    /// Create a store holding only the 1x1 white default texture.
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, pipeline: &SpritePipeline) -> Self {
        let mut store = Self {
            device: device.clone(),
            queue: queue.clone(),
            entries: Vec::new(),
            path_cache: HashMap::new(),
        };
        let white = store.upload(pipeline, "white 1x1", 1, 1, &[255u8, 255, 255, 255]);
        store.entries.push(white);
        store
    }

    /// Number of textures including the default.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bind group to sample for `texture`. `None`, or a handle this store
    /// did not issue, falls back to white.
    pub(crate) fn bind_group(&self, texture: Option<TextureId>) -> &wgpu::BindGroup {
        let index = match texture {
            Some(id) if (id.0 as usize) < self.entries.len() => id.0 as usize,
            Some(id) => {
                log::warn!("unknown texture {id:?}, drawing with white");
                0
            }
            None => 0,
        };
        &self.entries[index].bind_group
    }

    /// Upload raw RGBA8 pixel data and return its handle.
    pub fn create_texture_from_rgba(
        &mut self,
        pipeline: &SpritePipeline,
        label: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<Texture> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 4 {
            return Err(BatchError::TextureData {
                label: label.to_owned(),
                width,
                height,
                len: data.len(),
            });
        }
        let entry = self.upload(pipeline, label, width, height, data);
        let texture = Texture::new(TextureId(self.entries.len() as u64), width, height);
        self.entries.push(entry);
        log::debug!("texture '{label}' uploaded as {:?} ({width}x{height})", texture.id());
        Ok(texture)
    }

    /// Load a PNG/JPEG from disk and return its handle.
    ///
    /// Cached by path: loading the same path twice returns the same handle
    /// without a second upload.
    pub fn load_texture(&mut self, pipeline: &SpritePipeline, path: impl AsRef<Path>) -> Result<Texture> {
        let path = path.as_ref();
        if let Some(&texture) = self.path_cache.get(path) {
            return Ok(texture);
        }

        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        let texture = self.create_texture_from_rgba(pipeline, &path.to_string_lossy(), width, height, &img.into_raw())?;
        self.path_cache.insert(path.to_path_buf(), texture);
        log::info!("loaded texture {}", path.display());
        Ok(texture)
    }

    fn upload(&self, pipeline: &SpritePipeline, label: &str, width: u32, height: u32, data: &[u8]) -> TextureEntry {
        let texture = self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        TextureEntry {
            bind_group: pipeline.texture_bind_group(&self.device, label, &view),
        }
    }
}
