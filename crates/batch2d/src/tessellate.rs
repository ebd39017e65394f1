//! # Tessellate — Shapes to Triangles
//!
//! Each draw call describes a shape in the caller's own terms (a rectangle, a
//! line with a thickness, an arc with a step count). This module turns those
//! descriptions into the handful of corner positions and UVs the batcher
//! actually emits. Everything here is pure: no buffers, no transform, no
//! texture state. The batcher applies the current transform as it appends.
//!
//! ## Primitive Shapes
//!
//! ```text
//!  Quad (sprite, rect, line)      Triangle           Fan (circle, arc)
//!
//!   0 ─────────── 1                  0                   r1   r2
//!   │ ╲           │                 ╱ ╲               r0 ╲  │  ╱ r3
//!   │    ╲        │                ╱   ╲                 ╲ │ ╱
//!   │       ╲     │               ╱     ╲             ──── c ────
//!   3 ─────────── 2              2 ───── 1
//!
//!   indices 0,1,2  0,2,3          indices 0,1,2      (c, r_k, r_k+1) per step
//! ```
//!
//! Outlines reuse the line quad: a rectangle outline is four lines, a
//! triangle outline three, and an arc outline one line per step.
//!
//! ## Winding
//!
//! Every triangle comes out clockwise on a y-down screen, i.e. the cross
//! product `(b - a) × (c - a)` is non-negative. Sprites, rects, lines and fans
//! get that from the order their corners are generated in; filled triangles
//! and polygons are reordered when the caller hands them in the other
//! direction. Negative extents (mirrored sprites) flip the winding along with
//! the geometry; that is the caller's call.
//!
//! ## Degenerate Input
//!
//! Zero-length lines, non-positive thickness, zero step counts and zero
//! sweeps produce no geometry at all (`None` or an empty `Vec`) instead of
//! NaN positions.

use std::f32::consts::TAU;

use crate::math::{Rect, Vec2};
use crate::texture::TextureRegion;

/// Sweeps within this many radians of a full turn are treated as closed.
const FULL_TURN_EPSILON: f32 = 1e-4;

/// Four corners, emitted as two triangles sharing the 0–2 diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub positions: [Vec2; 4],
    pub uvs: [Vec2; 4],
}

impl Quad {
    /// A quad with the degenerate (all zero) UV mapping used by solid fills.
    pub fn solid(positions: [Vec2; 4]) -> Self {
        Self {
            positions,
            uvs: [Vec2::ZERO; 4],
        }
    }
}

/// A single triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Vec2; 3],
    pub uvs: [Vec2; 3],
}

/// A triangle fan around a center point.
///
/// A closed fan wraps its last rim point back to the first, so a full circle
/// of `S` steps has `S` rim points and `S` triangles. An open fan (an arc)
/// has `S + 1` rim points and the same `S` triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct Fan {
    pub center: Vec2,
    pub rim: Vec<Vec2>,
    pub closed: bool,
}

impl Fan {
    pub fn vertex_count(&self) -> usize {
        1 + self.rim.len()
    }

    pub fn triangle_count(&self) -> usize {
        if self.closed {
            self.rim.len()
        } else {
            self.rim.len().saturating_sub(1)
        }
    }
}

/// Which point a sprite rotates about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pivot {
    #[default]
    TopLeft,
    Center,
}

impl Pivot {
    pub fn centered(centered: bool) -> Self {
        if centered { Self::Center } else { Self::TopLeft }
    }
}

/// Placement of a textured quad.
///
/// `top_left` is where the unrotated quad's top-left corner sits; the pivot
/// only chooses the point the rotation turns around, so toggling it never
/// moves an unrotated sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteQuad {
    pub top_left: Vec2,
    pub size: Vec2,
    /// Radians, clockwise on a y-down screen.
    pub rotation: f32,
    pub pivot: Pivot,
}

impl SpriteQuad {
    /// The source rectangle's own extent, placed at `position`.
    pub fn at(src: Rect, position: Vec2) -> Self {
        Self {
            top_left: position,
            size: src.size(),
            rotation: 0.0,
            pivot: Pivot::TopLeft,
        }
    }

    /// The source extent multiplied by `scale`, placed at `position`.
    pub fn scaled(src: Rect, position: Vec2, scale: Vec2, rotation: f32, centered: bool) -> Self {
        Self {
            top_left: position,
            size: src.size() * scale,
            rotation,
            pivot: Pivot::centered(centered),
        }
    }

    /// Stretched to fill `dst`.
    pub fn into_rect(dst: Rect, rotation: f32, centered: bool) -> Self {
        Self {
            top_left: dst.top_left(),
            size: dst.size(),
            rotation,
            pivot: Pivot::centered(centered),
        }
    }

    /// The four corners in TL, TR, BR, BL order after rotation.
    pub fn corners(&self) -> [Vec2; 4] {
        let Vec2 { x: w, y: h } = self.size;
        let pivot = match self.pivot {
            Pivot::TopLeft => Vec2::ZERO,
            Pivot::Center => self.size * 0.5,
        };
        let offsets = [
            Vec2::new(0.0, 0.0) - pivot,
            Vec2::new(w, 0.0) - pivot,
            Vec2::new(w, h) - pivot,
            Vec2::new(0.0, h) - pivot,
        ];

        let origin = self.top_left + pivot;
        if self.rotation == 0.0 {
            return offsets.map(|o| origin + o);
        }
        // (cos θ, sin θ) rotates each offset as a complex multiply.
        let rot = Vec2::from_angle(self.rotation);
        offsets.map(|o| origin + rot.rotate(o))
    }
}

/// A textured quad for a sprite draw.
pub fn sprite(quad: &SpriteQuad, region: &TextureRegion) -> Quad {
    Quad {
        positions: quad.corners(),
        uvs: region.uv,
    }
}

/// A solid rectangle.
pub fn rect_fill(rect: Rect) -> Quad {
    Quad::solid([
        rect.top_left(),
        rect.top_right(),
        rect.bottom_right(),
        rect.bottom_left(),
    ])
}

/// A solid triangle, reordered if needed so it winds like every other
/// primitive.
pub fn triangle_fill(p0: Vec2, p1: Vec2, p2: Vec2) -> Triangle {
    let positions = if (p1 - p0).perp_dot(p2 - p0) < 0.0 {
        [p0, p2, p1]
    } else {
        [p0, p1, p2]
    };
    Triangle {
        positions,
        uvs: [Vec2::ZERO; 3],
    }
}

/// A convex polygon, reordered if needed to wind consistently.
///
/// Returns `None` for fewer than three points.
pub fn polygon_fill(points: &[Vec2]) -> Option<Vec<Vec2>> {
    if points.len() < 3 {
        return None;
    }
    // Shoelace: twice the signed area.
    let area: f32 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum();
    let mut out = points.to_vec();
    if area < 0.0 {
        out[1..].reverse();
    }
    Some(out)
}

/// A thick line: a quad of width `thickness` centered on the segment.
///
/// Both endpoints are pushed `thickness / 2` along the unit normal to the
/// segment, one side then the other:
///
/// ```text
///   start+n ───────────── end+n
///      │                    │
///   start ················· end
///      │                    │
///   start-n ───────────── end-n
/// ```
///
/// The corners come out as `start+n, end+n, end-n, start-n` with `n` the
/// right-hand normal, so `(0,0)→(10,0)` at thickness 2 gives `(0,-1),
/// (10,-1), (10,1), (0,1)`. Starting from the `-n` side would give the same
/// four points but wind the quad the other way from every other primitive.
///
/// Returns `None` for a zero-length segment or a non-positive thickness.
pub fn line(start: Vec2, end: Vec2, thickness: f32) -> Option<Quad> {
    if thickness.is_nan() || thickness <= 0.0 {
        return None;
    }
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return None;
    }
    // Right-hand normal on a y-down screen.
    let n = Vec2::new(dir.y, -dir.x) * (thickness * 0.5);
    Some(Quad::solid([start + n, end + n, end - n, start - n]))
}

/// The four edges of `rect` as lines of `thickness`, TL→TR→BR→BL→TL.
pub fn rect_outline(rect: Rect, thickness: f32) -> Vec<Quad> {
    let corners = [
        rect.top_left(),
        rect.top_right(),
        rect.bottom_right(),
        rect.bottom_left(),
    ];
    polyline(&corners, true, thickness)
}

/// The three edges of a triangle as lines of `thickness`.
pub fn triangle_outline(p0: Vec2, p1: Vec2, p2: Vec2, thickness: f32) -> Vec<Quad> {
    polyline(&[p0, p1, p2], true, thickness)
}

/// A filled arc (or full circle) as a fan around `center`.
///
/// `steps` equal angular steps are taken from `radians_start` to
/// `radians_end`. A sweep of a full turn closes the fan. A negative sweep is
/// walked from the other end so the triangles keep their winding.
///
/// Returns `None` for `steps == 0`, a zero sweep, or a zero radius.
pub fn arc_fill(
    center: Vec2,
    radius: f32,
    radians_start: f32,
    radians_end: f32,
    steps: u32,
) -> Option<Fan> {
    let (start, sweep, closed) = arc_span(radius, radians_start, radians_end, steps)?;
    let rim = arc_points(center, radius, start, sweep, steps, closed);
    Some(Fan { center, rim, closed })
}

/// An arc (or full circle) outline: one line of `thickness` per step.
///
/// An open arc gets no closing segment back to its start.
pub fn arc_outline(
    center: Vec2,
    radius: f32,
    radians_start: f32,
    radians_end: f32,
    steps: u32,
    thickness: f32,
) -> Vec<Quad> {
    let Some((start, sweep, closed)) = arc_span(radius, radians_start, radians_end, steps) else {
        return Vec::new();
    };
    let points = arc_points(center, radius, start, sweep, steps, closed);
    polyline(&points, closed, thickness)
}

/// Normalize an arc request to `(start, positive sweep, closed)`.
fn arc_span(radius: f32, start: f32, end: f32, steps: u32) -> Option<(f32, f32, bool)> {
    let sweep = end - start;
    if steps == 0 || sweep == 0.0 || !sweep.is_finite() || radius == 0.0 || !radius.is_finite() {
        return None;
    }
    if sweep.abs() >= TAU - FULL_TURN_EPSILON {
        return Some((start, TAU, true));
    }
    if sweep < 0.0 {
        Some((end, -sweep, false))
    } else {
        Some((start, sweep, false))
    }
}

/// Sample the circumference. Closed arcs skip the duplicate end sample.
fn arc_points(center: Vec2, radius: f32, start: f32, sweep: f32, steps: u32, closed: bool) -> Vec<Vec2> {
    let count = if closed { steps } else { steps + 1 };
    let step = sweep / steps as f32;
    (0..count)
        .map(|i| center + Vec2::from_angle(start + step * i as f32) * radius)
        .collect()
}

/// One line quad per consecutive pair of points, plus the closing pair when
/// `closed`. Zero-length segments are skipped.
fn polyline(points: &[Vec2], closed: bool, thickness: f32) -> Vec<Quad> {
    let n = points.len();
    let segments = if closed { n } else { n.saturating_sub(1) };
    (0..segments)
        .filter_map(|i| line(points[i], points[(i + 1) % n], thickness))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::{Texture, TextureId};
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn assert_vec_eq(got: Vec2, want: Vec2) {
        assert_relative_eq!(got.x, want.x, epsilon = 1e-4);
        assert_relative_eq!(got.y, want.y, epsilon = 1e-4);
    }

    fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        (b - a).perp_dot(c - a)
    }

    fn quad_is_clockwise(q: &Quad) -> bool {
        let p = q.positions;
        cross(p[0], p[1], p[2]) >= 0.0 && cross(p[0], p[2], p[3]) >= 0.0
    }

    #[test]
    fn horizontal_line_offsets_by_half_thickness() {
        let q = line(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0).unwrap();
        let want = [
            Vec2::new(0.0, -1.0),
            Vec2::new(10.0, -1.0),
            Vec2::new(10.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        for (got, want) in q.positions.iter().zip(want) {
            assert_vec_eq(*got, want);
        }
        assert!(quad_is_clockwise(&q));
    }

    #[test]
    fn line_winding_holds_in_every_direction() {
        for k in 0..8 {
            let angle = k as f32 * TAU / 8.0;
            let end = Vec2::from_angle(angle) * 5.0;
            let q = line(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0) + end, 0.5).unwrap();
            assert!(quad_is_clockwise(&q), "angle {angle}");
        }
    }

    #[test]
    fn degenerate_lines_produce_nothing() {
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0).is_none());
        assert!(line(Vec2::ZERO, Vec2::X, 0.0).is_none());
        assert!(line(Vec2::ZERO, Vec2::X, -1.0).is_none());
        assert!(line(Vec2::ZERO, Vec2::new(f32::NAN, 0.0), 1.0).is_none());
    }

    #[test]
    fn rect_fill_corners_in_tl_tr_br_bl_order() {
        let q = rect_fill(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            q.positions,
            [
                Vec2::new(1.0, 2.0),
                Vec2::new(4.0, 2.0),
                Vec2::new(4.0, 6.0),
                Vec2::new(1.0, 6.0),
            ]
        );
        assert_eq!(q.uvs, [Vec2::ZERO; 4]);
        assert!(quad_is_clockwise(&q));
    }

    #[test]
    fn triangle_fill_is_reordered_to_clockwise() {
        let cw = triangle_fill(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        let ccw = triangle_fill(Vec2::ZERO, Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0));
        assert_eq!(cw.positions, ccw.positions);
        assert!(cross(cw.positions[0], cw.positions[1], cw.positions[2]) > 0.0);
    }

    #[test]
    fn polygon_fill_reorders_and_rejects_short_input() {
        assert!(polygon_fill(&[Vec2::ZERO, Vec2::X]).is_none());
        let ccw = [Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0)];
        let out = polygon_fill(&ccw).unwrap();
        assert_eq!(out[0], Vec2::ZERO);
        for i in 1..out.len() - 1 {
            assert!(cross(out[0], out[i], out[i + 1]) > 0.0);
        }
    }

    #[test]
    fn outlines_are_one_line_per_edge() {
        let rect = rect_outline(Rect::new(0.0, 0.0, 10.0, 5.0), 1.0);
        assert_eq!(rect.len(), 4);
        // Top edge runs TL -> TR, centered on y = 0.
        assert_vec_eq(rect[0].positions[0], Vec2::new(0.0, -0.5));
        assert_vec_eq(rect[0].positions[1], Vec2::new(10.0, -0.5));

        let tri = triangle_outline(Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(0.0, 3.0), 1.0);
        assert_eq!(tri.len(), 3);
        assert!(rect.iter().chain(&tri).all(quad_is_clockwise));
    }

    #[test]
    fn zero_width_rect_outline_keeps_the_non_degenerate_edges() {
        let quads = rect_outline(Rect::new(0.0, 0.0, 0.0, 5.0), 1.0);
        assert_eq!(quads.len(), 2);
    }

    #[test]
    fn full_circle_fan_counts() {
        for steps in [3, 15, 36] {
            let fan = arc_fill(Vec2::ZERO, 10.0, 0.0, TAU, steps).unwrap();
            assert!(fan.closed);
            assert_eq!(fan.vertex_count(), steps as usize + 1);
            assert_eq!(fan.triangle_count(), steps as usize);
        }
    }

    #[test]
    fn open_arc_fan_has_end_sample() {
        let fan = arc_fill(Vec2::ZERO, 2.0, 0.0, PI, 4).unwrap();
        assert!(!fan.closed);
        assert_eq!(fan.rim.len(), 5);
        assert_eq!(fan.triangle_count(), 4);
        assert_vec_eq(fan.rim[0], Vec2::new(2.0, 0.0));
        assert_vec_eq(fan.rim[2], Vec2::new(0.0, 2.0));
        assert_vec_eq(fan.rim[4], Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn fan_triangles_wind_clockwise_for_either_sweep_direction() {
        for (start, end) in [(0.0, FRAC_PI_2), (FRAC_PI_2, 0.0), (0.0, -TAU)] {
            let fan = arc_fill(Vec2::new(3.0, 3.0), 1.0, start, end, 6).unwrap();
            let n = fan.rim.len();
            for k in 0..fan.triangle_count() {
                let c = cross(fan.center, fan.rim[k], fan.rim[(k + 1) % n]);
                assert!(c > 0.0, "sweep {start}->{end} triangle {k}");
            }
        }
    }

    #[test]
    fn degenerate_arcs_produce_nothing() {
        assert!(arc_fill(Vec2::ZERO, 1.0, 0.0, TAU, 0).is_none());
        assert!(arc_fill(Vec2::ZERO, 1.0, 1.0, 1.0, 8).is_none());
        assert!(arc_fill(Vec2::ZERO, 0.0, 0.0, TAU, 8).is_none());
        assert!(arc_outline(Vec2::ZERO, 1.0, 0.0, TAU, 0, 1.0).is_empty());
    }

    #[test]
    fn arc_outline_closes_only_full_circles() {
        assert_eq!(arc_outline(Vec2::ZERO, 5.0, 0.0, TAU, 12, 1.0).len(), 12);
        let open = arc_outline(Vec2::ZERO, 5.0, 0.0, PI, 6, 1.0);
        assert_eq!(open.len(), 6);
        // Last segment ends at the arc end, not back at the start.
        let last = open.last().unwrap();
        let end_mid = (last.positions[1] + last.positions[2]) * 0.5;
        assert_vec_eq(end_mid, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn sprite_quad_rotates_about_chosen_pivot() {
        let src = Rect::new(0.0, 0.0, 4.0, 2.0);

        let plain = SpriteQuad::at(src, Vec2::new(10.0, 10.0)).corners();
        assert_eq!(plain[2], Vec2::new(14.0, 12.0));

        // Quarter turn about the top-left: (4,0) offset -> (0,4).
        let tl = SpriteQuad::scaled(src, Vec2::new(10.0, 10.0), Vec2::ONE, FRAC_PI_2, false).corners();
        assert_vec_eq(tl[0], Vec2::new(10.0, 10.0));
        assert_vec_eq(tl[1], Vec2::new(10.0, 14.0));

        // Quarter turn about the center keeps the center fixed.
        let c = SpriteQuad::scaled(src, Vec2::new(10.0, 10.0), Vec2::ONE, FRAC_PI_2, true).corners();
        let center = (c[0] + c[2]) * 0.5;
        assert_vec_eq(center, Vec2::new(12.0, 11.0));
        assert_vec_eq(c[0], Vec2::new(13.0, 9.0));
    }

    #[test]
    fn sprite_quad_scales_and_fills_destination() {
        let src = Rect::new(0.0, 0.0, 8.0, 8.0);
        let scaled = SpriteQuad::scaled(src, Vec2::ZERO, Vec2::new(2.0, 0.5), 0.0, false).corners();
        assert_eq!(scaled[2], Vec2::new(16.0, 4.0));

        let dst = SpriteQuad::into_rect(Rect::new(5.0, 5.0, 20.0, 10.0), 0.0, true).corners();
        assert_eq!(dst[0], Vec2::new(5.0, 5.0));
        assert_eq!(dst[2], Vec2::new(25.0, 15.0));
    }

    #[test]
    fn sprite_carries_region_uvs() {
        let tex = Texture::new(TextureId(1), 100, 50);
        let src = Rect::new(10.0, 10.0, 20.0, 10.0);
        let region = TextureRegion::new(Some(&tex), src);
        let q = sprite(&SpriteQuad::at(src, Vec2::ZERO), &region);
        assert_eq!(q.uvs, region.uv);
        assert!(quad_is_clockwise(&q));
    }
}
