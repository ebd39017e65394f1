//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. Vector algebra (add, scale, normalize, distance)
//! comes straight from [`Vec2`]. On top of that this module provides the two
//! value types the batcher depends on:
//!
//! - [`Transform2d`] — a 2×3 affine map (2×2 linear part + translation).
//! - [`Rect`] — an axis-aligned `x, y, w, h` rectangle, in float and integer
//!   flavours.

use std::ops::Mul;

pub use glam::{Affine2, Mat2, Vec2, Vec4};

/// A 2D affine transform: a 2×2 linear part plus a translation.
///
/// Stored column-major as six floats `[m00, m01, m10, m11, tx, ty]`, the same
/// layout as [`Affine2::to_cols_array`]. There is no projective row; 2D
/// sprites never need one.
///
/// Composition follows matrix multiplication: `a.compose(b)` (or `a * b`)
/// produces the transform that applies `b` first, then `a`. This is the
/// order the transform stack uses when a child frame is pushed onto a parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d(pub Affine2);

impl Transform2d {
    /// The identity transform. Points pass through unchanged.
    pub const IDENTITY: Self = Self(Affine2::IDENTITY);

    /// A pure translation.
    pub fn from_translation(offset: Vec2) -> Self {
        Self(Affine2::from_translation(offset))
    }

    /// A rotation about the origin, in radians.
    pub fn from_rotation(radians: f32) -> Self {
        Self(Affine2::from_angle(radians))
    }

    /// A non-uniform scale about the origin.
    pub fn from_scale(scale: Vec2) -> Self {
        Self(Affine2::from_scale(scale))
    }

    /// Scale, then rotate, then translate. The usual "place an object" order.
    pub fn from_scale_rotation_translation(scale: Vec2, radians: f32, translation: Vec2) -> Self {
        Self(Affine2::from_scale_angle_translation(scale, radians, translation))
    }

    /// Build from the six column-major floats `[m00, m01, m10, m11, tx, ty]`.
    pub fn from_cols_array(m: [f32; 6]) -> Self {
        Self(Affine2::from_cols_array(&m))
    }

    /// The six column-major floats of this transform.
    pub fn to_cols_array(self) -> [f32; 6] {
        self.0.to_cols_array()
    }

    /// The translation column.
    pub fn translation(self) -> Vec2 {
        self.0.translation
    }

    /// Compose two transforms: the result applies `other` first, then `self`.
    pub fn compose(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Apply the transform to a point (translation included).
    pub fn transform_point(self, point: Vec2) -> Vec2 {
        self.0.transform_point2(point)
    }

    /// Apply only the linear part to a direction vector.
    pub fn transform_vector(self, vector: Vec2) -> Vec2 {
        self.0.transform_vector2(vector)
    }

    /// The inverse transform, or `None` if the linear part is singular.
    pub fn inverse(self) -> Option<Self> {
        let det = self.0.matrix2.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self(self.0.inverse()))
    }
}

impl Default for Transform2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform2d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

impl From<Affine2> for Transform2d {
    fn from(affine: Affine2) -> Self {
        Self(affine)
    }
}

/// An axis-aligned rectangle: top-left corner `(x, y)` plus extent `(w, h)`.
///
/// Negative extents are kept as-is. Drawing a sprite from a source rect with a
/// negative width is how callers ask for a mirrored UV mapping, so the rect is
/// never normalized behind their back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T = f32> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

/// Integer rectangle, typically pixel regions of a texture.
pub type IntRect = Rect<i32>;

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, w: T, h: T) -> Self {
        Self { x, y, w, h }
    }
}

impl<T> Rect<T>
where
    T: Copy + PartialOrd + std::ops::Add<Output = T>,
{
    /// True if the two rectangles share interior area.
    ///
    /// Intervals are half-open: rectangles that only touch along an edge do
    /// not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

impl Rect<f32> {
    /// The same rectangle moved by `offset`. Extent is unchanged.
    pub fn offset(self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y)
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Component-wise cast to integers (truncating toward zero).
    pub fn as_int(self) -> IntRect {
        Rect::new(self.x as i32, self.y as i32, self.w as i32, self.h as i32)
    }
}

impl Rect<i32> {
    /// The same rectangle moved by an integer offset.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Component-wise cast to floats.
    pub fn as_float(self) -> Rect<f32> {
        Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}

impl From<Vec4> for Rect<f32> {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Rect<f32>> for Vec4 {
    fn from(r: Rect<f32>) -> Self {
        Vec4::new(r.x, r.y, r.w, r.h)
    }
}

impl From<IntRect> for Rect<f32> {
    fn from(r: IntRect) -> Self {
        r.as_float()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn compose_applies_right_hand_side_first() {
        let translate = Transform2d::from_translation(Vec2::new(10.0, 0.0));
        let rotate = Transform2d::from_rotation(FRAC_PI_2);

        // rotate (1,0) -> (0,1), then translate -> (10,1)
        let p = translate.compose(rotate).transform_point(Vec2::X);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-5);

        // translate (1,0) -> (11,0), then rotate -> (0,11)
        let q = (rotate * translate).transform_point(Vec2::X);
        assert_relative_eq!(q.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(q.y, 11.0, epsilon = 1e-5);
    }

    #[test]
    fn cols_array_round_trips_layout() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let t = Transform2d::from_cols_array(m);
        assert_eq!(t.to_cols_array(), m);
        assert_eq!(t.translation(), Vec2::new(5.0, 6.0));
        // x' = m00*x + m10*y + tx
        let p = t.transform_point(Vec2::new(1.0, 1.0));
        assert_eq!(p, Vec2::new(1.0 + 3.0 + 5.0, 2.0 + 4.0 + 6.0));
    }

    #[test]
    fn inverse_of_singular_is_none() {
        assert!(Transform2d::from_scale(Vec2::new(0.0, 1.0)).inverse().is_none());
        let t = Transform2d::from_scale_rotation_translation(Vec2::splat(2.0), 0.3, Vec2::new(4.0, -2.0));
        let p = Vec2::new(3.0, 7.0);
        let back = t.inverse().unwrap().transform_point(t.transform_point(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-4);
    }

    #[test]
    fn edge_touching_rects_do_not_overlap() {
        let a: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(9.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn int_rect_overlap_and_cast() {
        let a = IntRect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&IntRect::new(10, 0, 10, 10)));
        assert!(a.overlaps(&IntRect::new(9, 9, 10, 10)));
        assert_eq!(a.offset(2, 3).as_float(), Rect::new(2.0, 3.0, 10.0, 10.0));
        assert_eq!(Rect::<f32>::new(1.9, -1.9, 4.5, 2.0).as_int(), IntRect::new(1, -1, 4, 2));
    }

    #[test]
    fn rect_corners_and_vec4() {
        let r = Rect::<f32>::new(1.0, 2.0, 3.0, 4.0).offset(Vec2::new(1.0, 1.0));
        assert_eq!(r.top_left(), Vec2::new(2.0, 3.0));
        assert_eq!(r.bottom_right(), Vec2::new(5.0, 7.0));
        assert_eq!(r.center(), Vec2::new(3.5, 5.0));
        let v: Vec4 = r.into();
        assert_eq!(Rect::from(v), r);
    }
}
