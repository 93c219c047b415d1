// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular arcs defined by three points.

use core::f64::consts::{FRAC_PI_2, PI, TAU};
use core::ops::Mul;

use smallvec::SmallVec;

use crate::{
    Affine, CubicBez, Extents, Pair, ParamCurve, ParamCurveOffset, Vector, ARC_MAX_ANGLE,
};

/// A circular arc through three points.
///
/// The arc starts at `p0`, passes through `p1` and ends at `p2`. These
/// points determine both the circle and the direction of travel. When `p0`
/// and `p2` coincide the arc is a full circle and `p1` is the point
/// diametrically opposite to them.
///
/// Three collinear (distinct) points do not define an arc: see
/// [`Arc::info`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The start point.
    pub p0: Pair,
    /// Any point of the arc between start and end.
    pub p1: Pair,
    /// The end point.
    pub p2: Pair,
}

/// Center, radius and angular span of an [`Arc`].
///
/// `start < end` means the arc is travelled with increasing angles,
/// `start > end` with decreasing ones. Angles are in radians and lie in an
/// extended range, roughly `[-π, 3π]`, so that the span `end - start` never
/// needs to wrap around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcInfo {
    /// Center of the circle.
    pub center: Pair,
    /// Radius of the circle.
    pub radius: f64,
    /// Angle of the start point, as seen from the center.
    pub start: f64,
    /// Angle of the end point, as seen from the center.
    pub end: f64,
}

impl ArcInfo {
    /// The signed angular span `end - start`.
    #[inline]
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    /// The point of the circle at `angle`.
    #[inline]
    pub fn point_at_angle(&self, angle: f64) -> Pair {
        self.center + Vector::from_angle(angle) * self.radius
    }

    /// Is `angle`, or one of its equivalents 2π apart, strictly inside
    /// the span of the arc?
    fn crosses(&self, angle: f64) -> bool {
        let lo = self.start.min(self.end);
        let hi = self.start.max(self.end);
        [angle - TAU, angle, angle + TAU]
            .into_iter()
            .any(|a| lo < a && a < hi)
    }
}

impl Arc {
    /// The most curves [`Arc::to_cubics_with`] splits an arc into.
    pub const MAX_CURVES: usize = 1024;

    /// Create a new arc.
    #[inline]
    pub fn new(p0: impl Into<Pair>, p1: impl Into<Pair>, p2: impl Into<Pair>) -> Arc {
        Arc {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
        }
    }

    /// Returns a copy of this arc travelled in the opposite direction.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> Arc {
        Arc {
            p0: self.p2,
            p1: self.p1,
            p2: self.p0,
        }
    }

    /// Recover center, radius and angles of the arc.
    ///
    /// Returns `None` when the three points are collinear: no circle
    /// passes through them.
    pub fn info(&self) -> Option<ArcInfo> {
        let Arc { p0, p1, p2 } = *self;

        if p0 == p2 {
            // Full circle: p0..p1 is a diameter.
            let center = p0.midpoint(p1);
            let start = (p0 - center).angle();
            return Some(ArcInfo {
                center,
                radius: p0.distance(center),
                start,
                end: start + TAU,
            });
        }

        let b = p1 - p0;
        let c = p2 - p0;
        let d = 2.0 * (b.x * c.y - b.y * c.x);
        if d == 0.0 {
            log::debug!("collinear points {p0}, {p1}, {p2} do not define an arc");
            return None;
        }
        let b2 = b.length_squared();
        let c2 = c.length_squared();
        let center = p0 + Vector::new((c.y * b2 - b.y * c2) / d, (b.x * c2 - c.x * b2) / d);

        let mut start = (p0 - center).angle();
        let mid = (p1 - center).angle();
        let mut end = (p2 - center).angle();
        if end > start {
            if mid < start || mid > end {
                start += TAU;
            }
        } else if mid < end || mid > start {
            end += TAU;
        }

        Some(ArcInfo {
            center,
            radius: p0.distance(center),
            start,
            end,
        })
    }

    /// Approximate the arc with cubic Béziers spanning at most
    /// [`ARC_MAX_ANGLE`] each.
    ///
    /// Returns no curve for a degenerate arc.
    pub fn to_cubics(&self) -> SmallVec<[CubicBez; 4]> {
        self.to_cubics_with(ARC_MAX_ANGLE)
    }

    /// Approximate the arc with cubic Béziers spanning at most `max_angle`
    /// radians each.
    ///
    /// Returns no curve unless `max_angle` is positive and finite. The
    /// number of curves is capped at [`Arc::MAX_CURVES`].
    pub fn to_cubics_with(&self, max_angle: f64) -> SmallVec<[CubicBez; 4]> {
        if !(max_angle > 0.0 && max_angle.is_finite()) {
            log::debug!("cannot split an arc in spans of {max_angle} radians");
            return SmallVec::new();
        }
        let Some(info) = self.info() else {
            return SmallVec::new();
        };
        // Roundoff in the recovered angles must not add a curve to a span
        // that is an exact multiple of `max_angle`.
        let n = (info.sweep().abs() / max_angle - 1e-9)
            .ceil()
            .clamp(1.0, Arc::MAX_CURVES as f64);
        self.curves_from_info(&info, n as usize)
    }

    /// Approximate the arc with exactly `n` cubic Béziers of equal span.
    ///
    /// Consecutive curves share their junction points exactly, the first
    /// curve starts at `p0` and the last one ends at `p2`.
    pub fn to_curves(&self, n: usize) -> SmallVec<[CubicBez; 4]> {
        match self.info() {
            Some(info) => self.curves_from_info(&info, n),
            None => SmallVec::new(),
        }
    }

    fn curves_from_info(&self, info: &ArcInfo, n: usize) -> SmallVec<[CubicBez; 4]> {
        let mut curves = SmallVec::with_capacity(n);
        if n == 0 {
            return curves;
        }
        let ArcInfo { center, radius: r, .. } = *info;
        let step = info.sweep() / n as f64;
        let h = 4.0 / 3.0 * (step / 4.0).tan();

        let mut p0 = self.p0;
        let mut a = info.start;
        for i in 0..n {
            let a2 = a + step;
            let (sin_a, cos_a) = a.sin_cos();
            let (sin_a2, cos_a2) = a2.sin_cos();
            let p1 = center + Vector::new(r * cos_a - h * r * sin_a, r * sin_a + h * r * cos_a);
            let p2 = center + Vector::new(r * cos_a2 + h * r * sin_a2, r * sin_a2 - h * r * cos_a2);
            let p3 = if i + 1 == n {
                self.p2
            } else {
                center + Vector::new(r * cos_a2, r * sin_a2)
            };
            curves.push(CubicBez::new(p0, p1, p2, p3));
            p0 = p3;
            a = a2;
        }
        curves
    }
}

impl ParamCurve for Arc {
    /// Angular interpolation between start and end.
    ///
    /// A degenerate arc falls back to its chord `p0..p2`.
    fn eval(&self, t: f64) -> Pair {
        match self.info() {
            Some(info) => info.point_at_angle(info.start + info.sweep() * t),
            None => self.p0.lerp(self.p2, t),
        }
    }

    fn tangent(&self, t: f64) -> Vector {
        match self.info() {
            Some(info) => {
                let angle = info.start + info.sweep() * t;
                Vector::from_angle(angle).normal() * (info.radius * info.sweep())
            }
            None => self.p2 - self.p0,
        }
    }

    #[inline(always)]
    fn start(&self) -> Pair {
        self.p0
    }

    #[inline(always)]
    fn end(&self) -> Pair {
        self.p2
    }

    /// `radius * |sweep|`, zero for a degenerate arc.
    fn length(&self) -> f64 {
        self.info()
            .map(|info| info.radius * info.sweep().abs())
            .unwrap_or(0.0)
    }

    /// The tight box: the end points plus every axis-aligned extreme point
    /// of the circle crossed by the arc.
    ///
    /// Undefined for a degenerate arc.
    fn extents(&self) -> Extents {
        let Some(info) = self.info() else {
            return Extents::UNDEFINED;
        };
        let mut extents = Extents::from_points([self.p0, self.p2]);
        for quadrant in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
            if info.crosses(quadrant) {
                extents.add_point(info.point_at_angle(quadrant));
            }
        }
        extents
    }
}

impl ParamCurveOffset for Arc {
    /// The offset of an arc is the concentric arc whose radius differs by
    /// `distance`, shrinking when the normal points to the center.
    fn offset(&mut self, distance: f64) -> bool {
        let Some(info) = self.info() else {
            return false;
        };
        let radius = if info.start < info.end {
            info.radius - distance
        } else {
            info.radius + distance
        };
        let center = info.center;
        let rescale = |p: Pair| center + (p - center).set_length(radius);
        self.p0 = rescale(self.p0);
        self.p1 = rescale(self.p1);
        self.p2 = rescale(self.p2);
        true
    }
}

impl Mul<Arc> for Affine {
    type Output = Arc;

    /// Maps the three defining points.
    ///
    /// The result is exact for similarity transforms only: an anamorphic
    /// matrix turns the circle into an ellipse, which is then approximated
    /// by the circle through the mapped points.
    #[inline]
    fn mul(self, a: Arc) -> Arc {
        Arc {
            p0: self * a.p0,
            p1: self * a.p1,
            p2: self * a.p2,
        }
    }
}
