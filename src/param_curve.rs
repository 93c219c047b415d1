// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits shared by every primitive parametrized by a scalar.

use crate::{Extents, Pair, Vector};

/// The default accuracy used where an approximation is needed.
pub const DEFAULT_ACCURACY: f64 = 1e-9;

/// A curve parametrized by a scalar.
///
/// `t = 0` is the start of the curve and `t = 1` its end.
pub trait ParamCurve {
    /// Evaluate the curve at parameter `t`.
    fn eval(&self, t: f64) -> Pair;

    /// The direction of travel at parameter `t`.
    ///
    /// The magnitude is the derivative of [`ParamCurve::eval`], so it is
    /// zero only where the curve stalls.
    fn tangent(&self, t: f64) -> Vector;

    /// The start point.
    fn start(&self) -> Pair {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Pair {
        self.eval(1.0)
    }

    /// The length of the curve.
    fn length(&self) -> f64;

    /// A box enclosing the curve.
    ///
    /// Implementations document whether the bound is tight.
    fn extents(&self) -> Extents;

    /// Is `point` inside the extents of this curve?
    ///
    /// This is a cheap "maybe on the curve" test, used to discard
    /// intersections of the extended curves that cannot lie on the
    /// curves themselves.
    fn is_inside(&self, point: Pair) -> bool {
        self.extents().contains_point(point)
    }
}

/// A curve that reports the parameter nearest to a point.
pub trait ParamCurveNearest {
    /// The parameter in `[0, 1]` of the point of the curve closest to `point`.
    ///
    /// `None` means the parameter could not be computed.
    fn closest_param(&self, point: Pair) -> Option<f64>;
}

/// A curve that can be moved to a parallel curve in place.
pub trait ParamCurveOffset {
    /// Replace the curve with its parallel at `distance`.
    ///
    /// Positive distances move along the normal of the direction of travel,
    /// that is the direction travel rotated by +90°. Returns `false`, leaving
    /// the curve untouched, when the geometry is degenerate.
    fn offset(&mut self, distance: f64) -> bool;
}
