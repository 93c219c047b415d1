// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines.

use core::ops::Mul;

use crate::{
    Affine, Extents, Pair, ParamCurve, ParamCurveNearest, ParamCurveOffset, Vector,
};

/// A straight line between two points.
///
/// This is the geometry of both the line and the close-path primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Pair,
    /// The line's end point.
    pub p1: Pair,
}

impl Line {
    /// Create a new line.
    #[inline(always)]
    pub fn new(p0: impl Into<Pair>, p1: impl Into<Pair>) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// Returns a copy of this `Line` with the end points swapped.
    #[must_use]
    #[inline(always)]
    pub fn reversed(&self) -> Line {
        Line {
            p0: self.p1,
            p1: self.p0,
        }
    }

    /// The point where two lines, extended to infinity, cross.
    ///
    /// Returns `None` when the lines are parallel, that is when the
    /// determinant of their directions is zero.
    ///
    /// The coordinate of a horizontal or vertical line is kept exactly, so
    /// the crossing lies on the extents of such a line.
    pub fn crossing_point(&self, other: &Line) -> Option<Pair> {
        let v0 = self.p1 - self.p0;
        let v1 = other.p1 - other.p0;
        let det = v0.cross(v1);
        if det == 0.0 {
            return None;
        }
        let factor = ((self.p0.y - other.p0.y) * v1.x - (self.p0.x - other.p0.x) * v1.y) / det;
        let mut p = self.p0 + v0 * factor;
        for line in [self, other] {
            if line.p0.x == line.p1.x {
                p.x = line.p0.x;
            }
            if line.p0.y == line.p1.y {
                p.y = line.p0.y;
            }
        }
        Some(p)
    }

    /// The point where the two lines cross, if it lies on both of them.
    ///
    /// Crossings of the extended lines falling outside the extents of
    /// either line are discarded.
    pub fn intersection(&self, other: &Line) -> Option<Pair> {
        self.crossing_point(other)
            .filter(|&p| self.is_inside(p) && other.is_inside(p))
    }
}

impl From<(Pair, Pair)> for Line {
    #[inline(always)]
    fn from((from, to): (Pair, Pair)) -> Self {
        Line::new(from, to)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Pair {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn tangent(&self, _t: f64) -> Vector {
        self.p1 - self.p0
    }

    #[inline(always)]
    fn start(&self) -> Pair {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Pair {
        self.p1
    }

    #[inline]
    fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    fn extents(&self) -> Extents {
        Extents::from_points([self.p0, self.p1])
    }
}

impl ParamCurveNearest for Line {
    /// Project `point` on the line and clamp the result to the segment.
    ///
    /// The projection is the crossing of the line with its normal through
    /// `point`. Returns `None` for a zero-length line.
    fn closest_param(&self, point: Pair) -> Option<f64> {
        let d = self.p1 - self.p0;
        let normal = Line::new(point, point + d.normal());
        let foot = self.crossing_point(&normal)?;
        let t = (foot - self.p0).dot(d) / d.length_squared();
        Some(t.clamp(0.0, 1.0))
    }
}

impl ParamCurveOffset for Line {
    fn offset(&mut self, distance: f64) -> bool {
        let Some(dir) = (self.p1 - self.p0).normalize() else {
            log::debug!("cannot offset the zero-length line at {}", self.p0);
            return false;
        };
        let shift = dir.normal() * distance;
        self.p0 += shift;
        self.p1 += shift;
        true
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, other: Line) -> Line {
        Line {
            p0: self * other.p0,
            p1: self * other.p1,
        }
    }
}
