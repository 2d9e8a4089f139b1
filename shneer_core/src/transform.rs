// Copyright 2026 the Shneer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Six-coefficient 2-D affine transform.
//!
//! [`Transform2d`] is a plain value type: every instance is `Copy`, so
//! assignment already has value-copy semantics and no two transforms ever
//! share mutable state. Global-transform recomputation in the scene graph is
//! therefore a pure composition of values.
//!
//! The coefficient order matches the canvas `transform(a, b, c, d, e, f)` call
//! and [`kurbo::Affine`]:
//!
//! ```text
//! | a c e |   | x |
//! | b d f | · | y |
//! | 0 0 1 |   | 1 |
//! ```
//!
//! Screen space has y growing downward, so a positive rotation angle turns
//! clockwise on screen.

use alloc::vec::Vec;
use core::ops::{Mul, MulAssign};

use kurbo::{Affine, Point};

/// A 2-D affine transform stored as `[a, b, c, d, e, f]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2d {
    /// Coefficients `[a, b, c, d, e, f]`; `e` and `f` are the translation.
    pub coeffs: [f64; 6],
}

impl Transform2d {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Creates a transform from raw coefficients.
    #[inline]
    #[must_use]
    pub const fn new(coeffs: [f64; 6]) -> Self {
        Self { coeffs }
    }

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(dx: f64, dy: f64) -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 1.0, dx, dy],
        }
    }

    /// Creates a non-uniform scale about the origin.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64) -> Self {
        Self {
            coeffs: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Creates a rotation by `theta` radians about the origin.
    #[inline]
    #[must_use]
    pub fn from_rotation(theta: f64) -> Self {
        let (s, c) = (libm::sin(theta), libm::cos(theta));
        Self {
            coeffs: [c, s, -s, c, 0.0, 0.0],
        }
    }

    /// Creates a rotation by `theta` radians about the pivot `(cx, cy)`.
    #[must_use]
    pub fn from_rotation_about(theta: f64, cx: f64, cy: f64) -> Self {
        Self::from_translation(cx, cy)
            * Self::from_rotation(theta)
            * Self::from_translation(-cx, -cy)
    }

    /// Replaces `self` with `self * other`.
    ///
    /// The result applies `other` first and then the original `self`, which
    /// is how a child's local transform is pushed under its parent's global
    /// transform.
    #[inline]
    pub fn concatenate(&mut self, other: &Self) {
        *self = *self * *other;
    }

    /// Concatenates a translation by `(dx, dy)`.
    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.concatenate(&Self::from_translation(dx, dy));
    }

    /// Concatenates a scale by `(sx, sy)`.
    #[inline]
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concatenate(&Self::from_scale(sx, sy));
    }

    /// Concatenates a rotation by `theta` radians about `(cx, cy)`.
    #[inline]
    pub fn rotate(&mut self, theta: f64, cx: f64, cy: f64) {
        self.concatenate(&Self::from_rotation_about(theta, cx, cy));
    }

    /// Returns the determinant of the linear part.
    #[inline]
    #[must_use]
    pub const fn determinant(&self) -> f64 {
        let [a, b, c, d, _, _] = self.coeffs;
        a * d - b * c
    }

    /// Returns the algebraic inverse.
    ///
    /// A singular transform (zero determinant, e.g. a zero scale) produces
    /// non-finite coefficients; use [`try_inverse`](Self::try_inverse) to
    /// detect that case instead.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let [a, b, c, d, e, f] = self.coeffs;
        let inv_det = 1.0 / self.determinant();
        Self {
            coeffs: [
                d * inv_det,
                -b * inv_det,
                -c * inv_det,
                a * inv_det,
                (c * f - d * e) * inv_det,
                (b * e - a * f) * inv_det,
            ],
        }
    }

    /// Returns the inverse, or `None` if the transform is singular or not
    /// finite.
    #[must_use]
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = self.inverse();
        inv.is_finite().then_some(inv)
    }

    /// Maps a single point through the transform.
    #[inline]
    #[must_use]
    pub const fn transform_point(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.coeffs;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Maps a sequence of points, leaving the input untouched.
    #[must_use]
    pub fn transform_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.transform_point(p)).collect()
    }

    /// Returns the image of the origin, i.e. the translation part.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.coeffs[4], self.coeffs[5])
    }

    /// Is this transform [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|v| v.is_finite())
    }

    /// Is this transform [NaN]?
    ///
    /// [NaN]: f64::is_nan
    #[inline]
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.coeffs.iter().any(|v| v.is_nan())
    }
}

impl Default for Transform2d {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform2d {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let [a0, b0, c0, d0, e0, f0] = self.coeffs;
        let [a1, b1, c1, d1, e1, f1] = rhs.coeffs;
        Self {
            coeffs: [
                a0 * a1 + c0 * b1,
                b0 * a1 + d0 * b1,
                a0 * c1 + c0 * d1,
                b0 * c1 + d0 * d1,
                a0 * e1 + c0 * f1 + e0,
                b0 * e1 + d0 * f1 + f0,
            ],
        }
    }
}

impl MulAssign for Transform2d {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.concatenate(&rhs);
    }
}

impl Mul<Point> for Transform2d {
    type Output = Point;

    #[inline]
    fn mul(self, p: Point) -> Point {
        self.transform_point(p)
    }
}

impl From<Affine> for Transform2d {
    #[inline]
    fn from(affine: Affine) -> Self {
        Self {
            coeffs: affine.as_coeffs(),
        }
    }
}

impl From<Transform2d> for Affine {
    #[inline]
    fn from(t: Transform2d) -> Self {
        Self::new(t.coeffs)
    }
}
