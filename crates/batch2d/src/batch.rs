//! # Batch — Accumulate Primitives, Flush on Texture Change
//!
//! [`SpriteBatch`] is the immediate-mode front end. Every draw call is
//! tessellated on the spot, pushed through the current transform, and
//! appended to one growing vertex buffer plus one growing index buffer.
//! Nothing reaches the backend until a flush.
//!
//! ## Why Batching Matters
//!
//! Every `draw_indexed` call carries CPU overhead: the driver validates state,
//! the GPU may stall between draws. A frame with 500 sprites and 500 draw
//! calls is much slower than the same 500 sprites in a handful of draws.
//! Consecutive primitives that sample the same texture can share a draw, so
//! the batcher only breaks a batch when it has to.
//!
//! ## When a Flush Happens
//!
//! ```text
//!  set_texture(A)  draw  draw  set_texture(B)  draw  render()
//!                  └─────────┘ │               └──┘  │
//!                   pending    ▼                     ▼
//!                          flush(A): 1 draw      flush(B): 1 draw
//! ```
//!
//! 1. `set_texture` with a *different* texture while geometry is pending.
//!    Setting the same texture again is free.
//! 2. Before a primitive that would push the pending vertex count past
//!    [`BatchConfig::max_batch_vertices`]. A single primitive is never split.
//! 3. `render()`, which also closes out the frame's statistics.
//!
//! A flush with nothing pending is a no-op: no backend calls at all.
//!
//! ## Vertex Indices
//!
//! Indices are absolute into the pending vertex buffer. Each primitive grabs
//! `base = vertices.len()` before appending and offsets its local pattern:
//!
//! ```text
//!  quad       base+{0,1,2, 0,2,3}
//!  triangle   base+{0,1,2}
//!  fan        base+{0,k,k+1} for each rim step k (wraps when closed)
//!  polygon    base+{0,k,k+1} for k in 1..n-1
//! ```
//!
//! ## Colors
//!
//! Sprite draws use white with [`ColorMix::MULTIPLY`], so the texture shows
//! through untinted; [`Sprite`] lets a caller pick both. Shapes use the
//! caller's color with [`ColorMix::FILL`] and zero UVs, which is why they can
//! share a batch with whatever texture is bound.
//!
//! ## Comparison
//!
//! - **Love2D**: `SpriteBatch` plus automatic batching of consecutive
//!   same-texture draws. Closest to this design.
//! - **Macroquad**: Immediate-mode draws into a CPU buffer, flushed on
//!   texture or pipeline change.
//! - **Bevy**: Retained sprites, sorted and instanced. Far more machinery.

use crate::backend::RenderBackend;
use crate::color::{Color, ColorMix};
use crate::config::BatchConfig;
use crate::diag::BatchStats;
use crate::error::Result;
use crate::math::{Rect, Transform2d, Vec2};
use crate::tessellate::{self, Fan, Quad, SpriteQuad, Triangle};
use crate::texture::{Texture, TextureRegion};
use crate::transform::TransformStack;
use crate::vertex::Vertex;

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];
const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

/// Parameters for one sprite draw.
///
/// Defaults to the full unscaled source at the origin, white, multiplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Source rectangle in texture pixels.
    pub src: Rect,
    /// Top-left of the unrotated sprite.
    pub position: Vec2,
    pub scale: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Rotate about the center instead of the top-left corner.
    pub centered: bool,
    pub color: Color,
    pub mix: ColorMix,
}

impl Sprite {
    pub fn new(src: Rect) -> Self {
        Self {
            src,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            centered: false,
            color: Color::WHITE,
            mix: ColorMix::MULTIPLY,
        }
    }

    /// The whole texture as the source.
    pub fn full(texture: &Texture) -> Self {
        Self::new(texture.full_rect())
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Set the tint color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn mix(mut self, mix: ColorMix) -> Self {
        self.mix = mix;
        self
    }
}

/// An immediate-mode 2D batcher that submits to `B`.
///
/// Not thread-safe by contract: one frame, one thread.
pub struct SpriteBatch<B: RenderBackend> {
    backend: B,
    config: BatchConfig,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    transforms: TransformStack,
    texture: Option<Texture>,
    /// Counters for the frame in progress.
    frame: BatchStats,
    /// Counters for the last completed frame.
    last_frame: BatchStats,
}

impl<B: RenderBackend> SpriteBatch<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, BatchConfig::default())
    }

    pub fn with_config(backend: B, config: BatchConfig) -> Self {
        log::debug!(
            "sprite batch: reserving {} vertices, {} indices",
            config.vertex_capacity,
            config.index_capacity
        );
        Self {
            backend,
            vertices: Vec::with_capacity(config.vertex_capacity),
            indices: Vec::with_capacity(config.index_capacity),
            config,
            transforms: TransformStack::new(),
            texture: None,
            frame: BatchStats::new(),
            last_frame: BatchStats::new(),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Default step count for circles, from the config.
    pub fn circle_steps(&self) -> u32 {
        self.config.circle_steps
    }

    // ── State ───────────────────────────────────────────────────────────

    /// Bind `texture` for the draws that follow.
    ///
    /// Pending geometry is flushed first, but only if the texture actually
    /// changes.
    pub fn set_texture(&mut self, texture: Option<&Texture>) {
        let texture = texture.copied();
        if texture == self.texture {
            return;
        }
        if !self.indices.is_empty() {
            self.frame.texture_flushes += 1;
            self.flush();
        }
        self.texture = texture;
    }

    /// The currently bound texture.
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Nest `transform` inside the current frame for subsequent draws.
    pub fn push_transform(&mut self, transform: Transform2d) {
        self.transforms.push(transform);
    }

    /// Return to the parent frame. Fails, changing nothing, if no transform
    /// is pushed.
    pub fn pop_transform(&mut self) -> Result<Transform2d> {
        self.transforms.pop().inspect_err(|err| log::warn!("{err}"))
    }

    pub fn current_transform(&self) -> Transform2d {
        self.transforms.current()
    }

    pub fn transform_depth(&self) -> usize {
        self.transforms.depth()
    }

    // ── Sprites ─────────────────────────────────────────────────────────

    /// Draw `src` of the bound texture at its own size, top-left at `position`.
    pub fn draw(&mut self, src: Rect, position: Vec2) {
        self.push_sprite(&SpriteQuad::at(src, position), src, Color::WHITE, ColorMix::MULTIPLY);
    }

    /// Draw `src` scaled by `scale`, rotated by `rotation` radians about the
    /// top-left corner or (`centered`) the center.
    pub fn draw_scaled(&mut self, src: Rect, position: Vec2, scale: Vec2, rotation: f32, centered: bool) {
        let quad = SpriteQuad::scaled(src, position, scale, rotation, centered);
        self.push_sprite(&quad, src, Color::WHITE, ColorMix::MULTIPLY);
    }

    /// Draw `src` stretched over `dst`.
    pub fn draw_to(&mut self, src: Rect, dst: Rect, rotation: f32, centered: bool) {
        let quad = SpriteQuad::into_rect(dst, rotation, centered);
        self.push_sprite(&quad, src, Color::WHITE, ColorMix::MULTIPLY);
    }

    pub fn draw_sprite(&mut self, sprite: &Sprite) {
        let quad = SpriteQuad::scaled(sprite.src, sprite.position, sprite.scale, sprite.rotation, sprite.centered);
        self.push_sprite(&quad, sprite.src, sprite.color, sprite.mix);
    }

    // ── Shapes ──────────────────────────────────────────────────────────

    pub fn draw_rect_fill(&mut self, rect: Rect, color: Color) {
        self.push_quad(&tessellate::rect_fill(rect), color, ColorMix::FILL);
    }

    /// Rectangle outline: four lines of `thickness` along the edges.
    pub fn draw_rect_line(&mut self, rect: Rect, color: Color, thickness: f32) {
        let quads = tessellate::rect_outline(rect, thickness);
        self.push_quads("rect outline", &quads, color);
    }

    pub fn draw_triangle_fill(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        self.push_triangle(&tessellate::triangle_fill(p0, p1, p2), color, ColorMix::FILL);
    }

    pub fn draw_triangle_line(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color, thickness: f32) {
        let quads = tessellate::triangle_outline(p0, p1, p2, thickness);
        self.push_quads("triangle outline", &quads, color);
    }

    /// Filled convex polygon, fanned from the first point.
    pub fn draw_polygon_fill(&mut self, points: &[Vec2], color: Color) {
        match tessellate::polygon_fill(points) {
            Some(points) => self.push_polygon(&points, color),
            None => self.degenerate("polygon"),
        }
    }

    /// Full circle approximated by `steps` triangles.
    pub fn draw_circle_fill(&mut self, center: Vec2, radius: f32, color: Color, steps: u32) {
        let fan = tessellate::arc_fill(center, radius, 0.0, std::f32::consts::TAU, steps);
        self.push_arc_fill("circle", fan, color);
    }

    /// Circle outline of `steps` line segments.
    pub fn draw_circle_line(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color, steps: u32) {
        let quads = tessellate::arc_outline(center, radius, 0.0, std::f32::consts::TAU, steps, thickness);
        self.push_quads("circle outline", &quads, color);
    }

    /// Filled arc from `radians_start` to `radians_end`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_semi_circle_fill(
        &mut self,
        center: Vec2,
        radius: f32,
        radians_start: f32,
        radians_end: f32,
        color: Color,
        steps: u32,
    ) {
        let fan = tessellate::arc_fill(center, radius, radians_start, radians_end, steps);
        self.push_arc_fill("arc", fan, color);
    }

    /// Arc outline. No segment closes the arc back to its start.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_semi_circle_line(
        &mut self,
        center: Vec2,
        radius: f32,
        radians_start: f32,
        radians_end: f32,
        thickness: f32,
        color: Color,
        steps: u32,
    ) {
        let quads = tessellate::arc_outline(center, radius, radians_start, radians_end, steps, thickness);
        self.push_quads("arc outline", &quads, color);
    }

    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color, thickness: f32) {
        match tessellate::line(start, end, thickness) {
            Some(quad) => self.push_quad(&quad, color, ColorMix::FILL),
            None => self.degenerate("line"),
        }
    }

    // ── Submission ──────────────────────────────────────────────────────

    /// Submit everything pending and close the frame.
    ///
    /// With nothing pending no draw is issued. The bound texture and the
    /// transform stack carry over to the next frame; a non-empty stack is
    /// reported since it usually means a missing `pop_transform`.
    ///
    /// [`stats`](Self::stats) only moves on when the frame recorded
    /// something, so an empty `render()` leaves it as it was.
    pub fn render(&mut self) {
        if !self.transforms.is_empty() {
            log::warn!(
                "render() with {} transform(s) still pushed",
                self.transforms.depth()
            );
        }
        self.flush();

        #[cfg(feature = "diagnostics")]
        log::trace!("frame stats: {}", self.frame.to_json());

        if self.frame != BatchStats::default() {
            self.last_frame = std::mem::take(&mut self.frame);
        }
    }

    /// Vertices waiting for the next flush.
    pub fn pending_vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Indices waiting for the next flush.
    pub fn pending_indices(&self) -> &[u32] {
        &self.indices
    }

    /// Counters for the last completed frame.
    pub fn stats(&self) -> &BatchStats {
        &self.last_frame
    }

    /// Counters for the frame in progress.
    pub fn frame_stats(&self) -> &BatchStats {
        &self.frame
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Drop the batcher and hand back the backend. Pending geometry is
    /// discarded.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn flush(&mut self) {
        if self.indices.is_empty() {
            return;
        }
        let index_count = self.indices.len() as u32;

        self.backend.upload_vertices(&self.vertices);
        self.backend.upload_indices(&self.indices);
        self.backend.draw_indexed(index_count, self.texture.as_ref());

        log::debug!(
            "flush: {} vertices, {} indices, texture {:?}",
            self.vertices.len(),
            index_count,
            self.texture.map(|t| t.id())
        );

        self.frame.draw_calls += 1;
        self.frame.vertices += self.vertices.len() as u32;
        self.frame.indices += index_count;

        self.vertices.clear();
        self.indices.clear();
    }

    // ── Emission ────────────────────────────────────────────────────────

    fn degenerate(&mut self, what: &str) {
        log::warn!("{what}: degenerate input, nothing drawn");
        self.frame.degenerate_primitives += 1;
    }

    /// Flush first if `vertex_count` more vertices would exceed the limit.
    fn make_room(&mut self, vertex_count: usize) {
        let limit = self.config.max_batch_vertices as usize;
        if !self.vertices.is_empty() && self.vertices.len() + vertex_count > limit {
            self.frame.overflow_flushes += 1;
            self.flush();
        }
    }

    /// Append transformed vertices and base-offset indices.
    fn push_geometry(
        &mut self,
        corners: impl ExactSizeIterator<Item = (Vec2, Vec2)>,
        local_indices: impl IntoIterator<Item = u32>,
        color: Color,
        mix: ColorMix,
    ) {
        self.make_room(corners.len());
        let base = self.vertices.len() as u32;
        let transform = self.transforms.current();

        self.vertices.extend(
            corners.map(|(position, uv)| Vertex::new(transform.transform_point(position), uv, color, mix)),
        );
        self.indices.extend(local_indices.into_iter().map(|i| base + i));
    }

    fn push_sprite(&mut self, quad: &SpriteQuad, src: Rect, color: Color, mix: ColorMix) {
        let region = TextureRegion::new(self.texture.as_ref(), src);
        self.push_quad(&tessellate::sprite(quad, &region), color, mix);
    }

    fn push_quad(&mut self, quad: &Quad, color: Color, mix: ColorMix) {
        let corners = quad.positions.into_iter().zip(quad.uvs);
        self.push_geometry(corners, QUAD_INDICES, color, mix);
    }

    fn push_quads(&mut self, what: &str, quads: &[Quad], color: Color) {
        if quads.is_empty() {
            self.degenerate(what);
            return;
        }
        for quad in quads {
            self.push_quad(quad, color, ColorMix::FILL);
        }
    }

    fn push_triangle(&mut self, triangle: &Triangle, color: Color, mix: ColorMix) {
        let corners = triangle.positions.into_iter().zip(triangle.uvs);
        self.push_geometry(corners, TRIANGLE_INDICES, color, mix);
    }

    fn push_polygon(&mut self, points: &[Vec2], color: Color) {
        let n = points.len() as u32;
        let corners = points.iter().map(|&p| (p, Vec2::ZERO));
        let indices = (1..n - 1).flat_map(|k| [0, k, k + 1]);
        self.push_geometry(corners, indices, color, ColorMix::FILL);
    }

    fn push_arc_fill(&mut self, what: &str, fan: Option<Fan>, color: Color) {
        let Some(fan) = fan else {
            self.degenerate(what);
            return;
        };
        let rim = fan.rim.len() as u32;
        let corners = std::iter::once(fan.center)
            .chain(fan.rim.iter().copied())
            .map(|p| (p, Vec2::ZERO))
            .collect::<Vec<_>>();
        // Rim vertex k sits at local index k + 1; the modulo wraps a closed
        // fan's last triangle back to the first rim vertex.
        let indices = (0..fan.triangle_count() as u32).flat_map(|k| [0, 1 + k, 1 + (k + 1) % rim]);
        self.push_geometry(corners.into_iter(), indices, color, ColorMix::FILL);
    }
}
