// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::Mul;

use crate::{
    Affine, Extents, Pair, ParamCurve, ParamCurveOffset, Vector, CURVE_OFFSET_M, DEFAULT_ACCURACY,
};

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub struct CubicBez {
    pub p0: Pair,
    pub p1: Pair,
    pub p2: Pair,
    pub p3: Pair,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Pair>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Returns a cubic Bézier segment with the control points reversed.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> CubicBez {
        CubicBez {
            p0: self.p3,
            p1: self.p2,
            p2: self.p1,
            p3: self.p0,
        }
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    pub fn subdivide(&self) -> (CubicBez, CubicBez) {
        let pm = self.eval(0.5);
        (
            CubicBez::new(
                self.p0,
                self.p0.midpoint(self.p1),
                mid3(self.p0, self.p1, self.p2),
                pm,
            ),
            CubicBez::new(
                pm,
                mid3(self.p1, self.p2, self.p3),
                self.p2.midpoint(self.p3),
                self.p3,
            ),
        )
    }

    /// Arc length of the segment, accurate to `accuracy`.
    ///
    /// This algorithm is based on "Adaptive subdivision and the length and
    /// energy of Bézier curves" by Jens Gravesen.
    pub fn arclen(&self, accuracy: f64) -> f64 {
        // Estimate for a single segment.
        fn calc_l0(c: &CubicBez) -> f64 {
            let lc = c.p0.distance(c.p3);
            let lp = c.p0.distance(c.p1) + c.p1.distance(c.p2) + c.p2.distance(c.p3);
            (lc + lp) * 0.5
        }
        const MAX_DEPTH: usize = 16;
        fn rec(c: &CubicBez, l0: f64, accuracy: f64, depth: usize) -> f64 {
            let (c0, c1) = c.subdivide();
            let l0_c0 = calc_l0(&c0);
            let l0_c1 = calc_l0(&c1);
            let l1 = l0_c0 + l0_c1;
            let error = (l0 - l1) * (1.0 / 15.0);
            if error.abs() < accuracy || depth == MAX_DEPTH {
                l1 - error
            } else {
                rec(&c0, l0_c0, accuracy * 0.5, depth + 1)
                    + rec(&c1, l0_c1, accuracy * 0.5, depth + 1)
            }
        }
        rec(self, calc_l0(self), accuracy, 0)
    }

    /// Replace the curve with an approximation of its parallel at
    /// `distance`, interpolating the offset point at parameter `m`.
    ///
    /// The end points are offset exactly along the normals of the end
    /// tangents `p1 - p0` and `p3 - p2`. The new control points keep those
    /// tangent directions and are chosen so that the new curve passes
    /// through the offset point of parameter `m`.
    ///
    /// When the end tangents are parallel that constraint cannot be solved
    /// and a rougher estimate is used, which gives poor results for opposed
    /// or severely staggered tangents.
    ///
    /// Returns `false`, leaving the curve untouched, when `m` is not strictly
    /// between 0 and 1 or when an end tangent has zero length.
    pub fn offset_with(&mut self, distance: f64, m: f64) -> bool {
        if !(m > 0.0 && m < 1.0) {
            log::debug!("curve offset parameter {m} is outside of (0, 1)");
            return false;
        }
        let v0 = self.p1 - self.p0;
        let v3 = self.p3 - self.p2;
        if v0.length_squared() == 0.0 || v3.length_squared() == 0.0 {
            log::debug!("cannot offset {self:?}: an end tangent has zero length");
            return false;
        }

        let vm = self.tangent(m).set_length(distance).normal();
        let pm = self.eval(m) + vm;

        let p0 = self.p0 + v0.set_length(distance).normal();
        let p3 = self.p3 + v3.set_length(distance).normal();

        let (p1, p2) = if v0.x * v3.y == v3.x * v0.y {
            log::debug!("parallel end tangents, offsetting {self:?} by estimate");
            (p0 + v0 + vm * (4.0 / 3.0), p3 - v3 + vm * (4.0 / 3.0))
        } else {
            let mm = 1.0 - m;
            let pk = (pm.to_vector()
                - p0.to_vector() * (mm * mm * (1.0 + m + m))
                - p3.to_vector() * (m * m * (1.0 + mm + mm)))
                / (3.0 * m * mm);

            // mm * k0 * v0 + m * k3 * v3 = pk
            let (k0, k3) = if v0.x != 0.0 {
                let k3 = (pk.y - pk.x * v0.y / v0.x) / (m * (v3.y - v3.x * v0.y / v0.x));
                let k0 = (pk.x - m * k3 * v3.x) / (mm * v0.x);
                (k0, k3)
            } else {
                let k0 = (pk.y - pk.x * v3.y / v3.x) / (mm * (v0.y - v0.x * v3.y / v3.x));
                let k3 = (pk.x - mm * k0 * v0.x) / (m * v3.x);
                (k0, k3)
            };
            (p0 + v0 * k0, p3 + v3 * k3)
        };

        *self = CubicBez { p0, p1, p2, p3 };
        true
    }
}

#[inline]
fn mid3(a: Pair, b: Pair, c: Pair) -> Pair {
    Pair::new(
        (a.x + 2.0 * b.x + c.x) * 0.25,
        (a.y + 2.0 * b.y + c.y) * 0.25,
    )
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Pair {
        let mt = 1.0 - t;
        let v = self.p0.to_vector() * (mt * mt * mt)
            + (self.p1.to_vector() * (mt * mt * 3.0)
                + (self.p2.to_vector() * (mt * 3.0) + self.p3.to_vector() * t) * t)
                * t;
        v.to_pair()
    }

    /// The derivative of the curve at `t`.
    #[inline]
    fn tangent(&self, t: f64) -> Vector {
        let mt = 1.0 - t;
        ((self.p1 - self.p0) * (mt * mt)
            + (self.p2 - self.p1) * (2.0 * mt * t)
            + (self.p3 - self.p2) * (t * t))
            * 3.0
    }

    #[inline]
    fn start(&self) -> Pair {
        self.p0
    }

    #[inline]
    fn end(&self) -> Pair {
        self.p3
    }

    fn length(&self) -> f64 {
        self.arclen(DEFAULT_ACCURACY)
    }

    /// The box of the control polygon.
    ///
    /// It always encloses the curve but is not tight.
    fn extents(&self) -> Extents {
        Extents::from_points([self.p0, self.p1, self.p2, self.p3])
    }
}

impl ParamCurveOffset for CubicBez {
    /// Offset with the interpolation parameter [`CURVE_OFFSET_M`].
    ///
    /// See [`CubicBez::offset_with`].
    fn offset(&mut self, distance: f64) -> bool {
        self.offset_with(distance, CURVE_OFFSET_M)
    }
}

impl Mul<CubicBez> for Affine {
    type Output = CubicBez;

    #[inline]
    fn mul(self, c: CubicBez) -> CubicBez {
        CubicBez {
            p0: self * c.p0,
            p1: self * c.p1,
            p2: self * c.p2,
            p3: self * c.p3,
        }
    }
}
