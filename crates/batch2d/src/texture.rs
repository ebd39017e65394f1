//! # Texture — Handles and UV Regions
//!
//! The batcher never owns GPU textures. Whoever creates them (the wgpu
//! [`TextureStore`](crate::gpu::TextureStore), or a test backend) hands out a
//! [`Texture`]: a small `Copy` handle carrying an opaque [`TextureId`] and the
//! pixel size. The batcher only needs three things from it:
//!
//! - the pixel size, to turn source rectangles into UVs,
//! - an identity, to decide whether a texture switch breaks the batch,
//! - a way to hand it back to the backend at submission time.
//!
//! The handle must stay valid until the next `render()`; the batcher cannot
//! detect a texture that was destroyed underneath it.
//!
//! ## UV Regions
//!
//! A [`TextureRegion`] maps a pixel rectangle of a texture to its four
//! normalized corners:
//!
//! ```text
//!   uv[0] ─────── uv[1]        (x, y)       (x+w, y)
//!     │             │             TL ─────── TR
//!     │             │             │           │
//!   uv[3] ─────── uv[2]           BL ─────── BR
//!                              (x, y+h)     (x+w, y+h)
//! ```
//!
//! With no texture bound every UV is zero. Solid-color shapes rely on that:
//! they ignore the sample anyway, and a fixed UV keeps them batchable with
//! whatever texture happens to be current.

use crate::math::{Rect, Vec2};

/// Opaque texture identity assigned by the backend that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// A borrowed texture: identity plus pixel dimensions.
///
/// Equality compares identity only.
#[derive(Debug, Clone, Copy)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole texture as a pixel rectangle.
    pub fn full_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Texture {}

/// A pixel sub-rectangle of a texture, resolved to corner UVs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    pub texture: Option<Texture>,
    /// Corner UVs in TL, TR, BR, BL order.
    pub uv: [Vec2; 4],
    /// Source width in pixels.
    pub w: f32,
    /// Source height in pixels.
    pub h: f32,
}

impl TextureRegion {
    pub fn new(texture: Option<&Texture>, src: Rect) -> Self {
        let mut region = Self {
            texture: texture.copied(),
            uv: [Vec2::ZERO; 4],
            w: 0.0,
            h: 0.0,
        };
        region.set_src(src);
        region
    }

    /// The whole texture.
    pub fn full(texture: &Texture) -> Self {
        Self::new(Some(texture), texture.full_rect())
    }

    /// Recompute the UVs for a new source rectangle.
    ///
    /// A zero-sized texture is treated like no texture at all rather than
    /// producing infinite UVs.
    pub fn set_src(&mut self, src: Rect) {
        self.w = src.w;
        self.h = src.h;

        match self.texture {
            Some(tex) if tex.width > 0 && tex.height > 0 => {
                let tw = tex.width as f32;
                let th = tex.height as f32;
                let u0 = src.x / tw;
                let v0 = src.y / th;
                let u1 = (src.x + src.w) / tw;
                let v1 = (src.y + src.h) / th;
                self.uv = [
                    Vec2::new(u0, v0), // top-left
                    Vec2::new(u1, v0), // top-right
                    Vec2::new(u1, v1), // bottom-right
                    Vec2::new(u0, v1), // bottom-left
                ];
            }
            _ => self.uv = [Vec2::ZERO; 4],
        }
    }
}
