// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D direction vector.

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::Pair;

/// A 2D vector.
///
/// This has the same representation as a [`Pair`] but is interpreted as
/// a direction (or a displacement), so it also carries angle, length and
/// rotation operations.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    /// The x-coordinate.
    pub x: f64,
    /// The y-coordinate.
    pub y: f64,
}

impl Vector {
    /// The vector (0, 0).
    pub const ZERO: Vector = Vector::new(0., 0.);

    /// Create a new vector.
    #[inline(always)]
    pub const fn new(x: f64, y: f64) -> Vector {
        Vector { x, y }
    }

    /// Convert this vector into a [`Pair`].
    #[inline(always)]
    pub const fn to_pair(self) -> Pair {
        Pair::new(self.x, self.y)
    }

    /// A unit vector of the given angle.
    ///
    /// With `th` at zero, the result is the positive X unit vector, and
    /// at π/2, it is the positive Y unit vector. The angle is expressed
    /// in radians.
    #[inline]
    pub fn from_angle(th: f64) -> Vector {
        let (sin, cos) = th.sin_cos();
        Vector { x: cos, y: sin }
    }

    /// Angle of vector, in radians, in the range `[-π, π]`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Cross product of two vectors.
    ///
    /// This is signed so that `(1, 0) × (0, 1) = 1`. It is zero when the
    /// vectors are parallel.
    #[inline]
    pub fn cross(self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Magnitude of vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Magnitude squared of vector.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Rescale the vector to `length`, preserving its direction.
    ///
    /// A zero vector has no direction: it is returned unchanged.
    /// A negative `length` flips the direction.
    #[must_use]
    pub fn set_length(self, length: f64) -> Vector {
        let old = self.length();
        if old == 0. {
            log::debug!("cannot rescale a zero-length vector to {length}");
            return self;
        }
        self * (length / old)
    }

    /// Returns a vector of magnitude 1.0 with the same angle as `self`.
    ///
    /// Returns `None` for the zero vector.
    #[inline]
    pub fn normalize(self) -> Option<Vector> {
        let length = self.length();
        (length != 0.).then(|| self / length)
    }

    /// The vector rotated by +90°, that is `(x, y) -> (-y, x)`.
    ///
    /// For a direction of travel this is the left-hand perpendicular in a
    /// y-up space. Positive offsets are applied along this direction.
    #[inline]
    pub fn normal(self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    /// Linearly interpolate between two vectors.
    #[inline]
    pub fn lerp(self, other: Vector, t: f64) -> Vector {
        self + t * (other - self)
    }

    /// Is this vector finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Vector {
    #[inline(always)]
    fn from(v: (f64, f64)) -> Vector {
        Vector { x: v.0, y: v.1 }
    }
}

impl From<Vector> for (f64, f64) {
    #[inline(always)]
    fn from(v: Vector) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, other: Vector) {
        *self = *self + other;
    }
}

impl Sub for Vector {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Vector) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vector {
    #[inline]
    fn sub_assign(&mut self, other: Vector) {
        *self = *self - other;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, other: f64) -> Vector {
        Vector {
            x: self.x * other,
            y: self.y * other,
        }
    }
}

impl MulAssign<f64> for Vector {
    #[inline]
    fn mul_assign(&mut self, other: f64) {
        *self = *self * other;
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, other: Vector) -> Vector {
        other * self
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn div(self, other: f64) -> Vector {
        Vector {
            x: self.x / other,
            y: self.y / other,
        }
    }
}

impl DivAssign<f64> for Vector {
    #[inline]
    fn div_assign(&mut self, other: f64) {
        *self = *self / other;
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "v=(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

// Conversions to and from mint
#[cfg(feature = "mint")]
impl From<Vector> for mint::Vector2<f64> {
    #[inline(always)]
    fn from(p: Vector) -> mint::Vector2<f64> {
        mint::Vector2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Vector2<f64>> for Vector {
    #[inline(always)]
    fn from(p: mint::Vector2<f64>) -> Vector {
        Vector { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI};

    fn assert_near(v0: Vector, v1: Vector) {
        assert!((v1 - v0).length() < 1e-12, "{v0:?} != {v1:?}");
    }

    #[test]
    fn angles() {
        assert_near(Vector::from_angle(0.), Vector::new(1., 0.));
        assert_near(Vector::from_angle(FRAC_PI_2), Vector::new(0., 1.));
        assert!((Vector::new(-1., 0.).angle() - PI).abs() < 1e-12);
        assert!((Vector::new(0., -2.).angle() + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn set_length() {
        let v = Vector::new(3., 4.).set_length(10.);
        assert_near(v, Vector::new(6., 8.));
        assert_eq!(Vector::new(3., 4.).set_length(-5.), Vector::new(-3., -4.));
        // Degenerate: left unchanged, not NaN.
        assert_eq!(Vector::ZERO.set_length(3.), Vector::ZERO);
    }

    #[test]
    fn normal() {
        assert_eq!(Vector::new(10., 0.).normal(), Vector::new(-0., 10.));
        assert_eq!(Vector::new(1., 2.).normal(), Vector::new(-2., 1.));
        assert_eq!(Vector::ZERO.normalize(), None);
    }

    #[test]
    fn display() {
        let v = Vector::new(1.2332421, 532.10721213123);
        assert_eq!(format!("{v:.2}"), "v=(1.23, 532.11)");
    }
}
