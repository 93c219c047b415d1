// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::Vector;

/// A 2D point.
///
/// Every defining point of a primitive is a `Pair`. Subtracting two pairs
/// yields the [`Vector`] between them.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Pair {
    /// The point (0, 0).
    pub const ZERO: Pair = Pair::new(0., 0.);

    /// Create a new `Pair` with the provided `x` and `y` coordinates.
    #[inline(always)]
    pub const fn new(x: f64, y: f64) -> Self {
        Pair { x, y }
    }

    /// Convert this point into a [`Vector`] relative to the origin.
    #[inline(always)]
    pub const fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Pair, t: f64) -> Pair {
        self + (other - self) * t
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Pair) -> Pair {
        Pair::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Pair) -> f64 {
        (self - other).length()
    }

    /// Squared Euclidean distance.
    ///
    /// Cheaper than [`Pair::distance`] when only comparing distances.
    #[inline]
    pub fn distance_squared(self, other: Pair) -> f64 {
        (self - other).length_squared()
    }

    /// Is this point finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Is this point NaN?
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl From<(f64, f64)> for Pair {
    #[inline(always)]
    fn from(v: (f64, f64)) -> Pair {
        Pair { x: v.0, y: v.1 }
    }
}

impl From<Pair> for (f64, f64) {
    #[inline(always)]
    fn from(v: Pair) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl Add<Vector> for Pair {
    type Output = Pair;

    #[inline]
    fn add(self, other: Vector) -> Self {
        Pair::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vector> for Pair {
    #[inline]
    fn add_assign(&mut self, other: Vector) {
        *self = *self + other;
    }
}

impl Sub<Vector> for Pair {
    type Output = Pair;

    #[inline]
    fn sub(self, other: Vector) -> Self {
        Pair::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vector> for Pair {
    #[inline]
    fn sub_assign(&mut self, other: Vector) {
        *self = *self - other;
    }
}

impl Sub<Pair> for Pair {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Pair) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(feature = "mint")]
impl From<Pair> for mint::Point2<f64> {
    #[inline(always)]
    fn from(p: Pair) -> mint::Point2<f64> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f64>> for Pair {
    #[inline(always)]
    fn from(p: mint::Point2<f64>) -> Pair {
        Pair { x: p.x, y: p.y }
    }
}
