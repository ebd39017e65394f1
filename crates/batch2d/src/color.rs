//! Vertex colors.
//!
//! Every vertex carries two colors: the primary [`Color`] and a [`ColorMix`]
//! that tells the fragment shader how to combine that color with the texture
//! sample. Sprites multiply, solid shapes fill, and the wash mode paints the
//! vertex color through the texture's alpha (handy for hit flashes and
//! silhouettes).

use serde::{Deserialize, Serialize};

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Self = Self { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Self = Self { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Secondary per-vertex tint: how much of each blend mode to apply.
///
/// The shader computes
///
/// ```text
/// out = mult * (texel * color)
///     + wash * vec4(color.rgb, texel.a * color.a)
///     + fill * color
/// ```
///
/// so exactly one channel at 255 selects a pure mode, and mixed values
/// crossfade between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMix {
    pub mult: u8,
    pub wash: u8,
    pub fill: u8,
}

impl ColorMix {
    /// Texture sample times vertex color. Used by sprite draws.
    pub const MULTIPLY: Self = Self { mult: 255, wash: 0, fill: 0 };
    /// Vertex rgb, texture alpha.
    pub const WASH: Self = Self { mult: 0, wash: 255, fill: 0 };
    /// Vertex color only, texture ignored. Used by solid shapes.
    pub const FILL: Self = Self { mult: 0, wash: 0, fill: 255 };

    pub const fn new(mult: u8, wash: u8, fill: u8) -> Self {
        Self { mult, wash, fill }
    }

    /// Normalized floats, the form uploaded in each vertex.
    pub fn to_array(self) -> [f32; 3] {
        [
            self.mult as f32 / 255.0,
            self.wash as f32 / 255.0,
            self.fill as f32 / 255.0,
        ]
    }
}

impl Default for ColorMix {
    fn default() -> Self {
        Self::MULTIPLY
    }
}
