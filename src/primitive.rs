// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The primitive sum type, dispatching to lines, arcs and curves.

use core::fmt;
use core::ops::Mul;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::{
    Affine, Arc, CubicBez, Extents, Line, Pair, ParamCurve, ParamCurveNearest, ParamCurveOffset,
    PathOp, PathSink, Vector,
};

/// The kind of a [`Primitive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    /// A straight line.
    Line,
    /// A circular arc through three points.
    Arc,
    /// A cubic Bézier curve.
    Curve,
    /// The line going back to the start of the segment.
    Close,
}

impl PrimitiveKind {
    /// Number of points defining a primitive of this kind.
    ///
    /// This includes the start point, which is shared with the end of the
    /// previous primitive.
    #[inline]
    pub const fn n_points(self) -> usize {
        match self {
            PrimitiveKind::Line | PrimitiveKind::Close => 2,
            PrimitiveKind::Arc => 3,
            PrimitiveKind::Curve => 4,
        }
    }

    /// The primitive kind drawn by a path operation.
    ///
    /// A move draws nothing and has no kind.
    #[inline]
    pub const fn from_op(op: PathOp) -> Option<PrimitiveKind> {
        match op {
            PathOp::MoveTo => None,
            PathOp::LineTo => Some(PrimitiveKind::Line),
            PathOp::ArcTo => Some(PrimitiveKind::Arc),
            PathOp::CurveTo => Some(PrimitiveKind::Curve),
            PathOp::ClosePath => Some(PrimitiveKind::Close),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Line => "line",
            PrimitiveKind::Arc => "arc",
            PrimitiveKind::Curve => "curve",
            PrimitiveKind::Close => "close",
        };
        f.write_str(name)
    }
}

/// A single piece of a segment.
///
/// The start point of every primitive is the end point of the previous one
/// in its segment (or the leading move of the segment): a `Primitive` is a
/// copy of those points, and the owning [`Segment`](crate::Segment) keeps
/// them shared. The end point of a `Close` is the start of its segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Primitive {
    /// A straight line.
    Line(Line),
    /// A circular arc.
    Arc(Arc),
    /// A cubic Bézier curve.
    Curve(CubicBez),
    /// The closing line, from the current point back to the segment start.
    Close(Line),
}

/// Intersections between two primitives.
pub type Intersections = SmallVec<[Pair; 4]>;

impl Primitive {
    /// The kind of this primitive.
    #[inline]
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Line(_) => PrimitiveKind::Line,
            Primitive::Arc(_) => PrimitiveKind::Arc,
            Primitive::Curve(_) => PrimitiveKind::Curve,
            Primitive::Close(_) => PrimitiveKind::Close,
        }
    }

    /// Number of defining points, start point included.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.kind().n_points()
    }

    /// All the defining points, in order of travel.
    pub fn points(&self) -> ArrayVec<Pair, 4> {
        let mut points = ArrayVec::new();
        match *self {
            Primitive::Line(Line { p0, p1 }) | Primitive::Close(Line { p0, p1 }) => {
                points.extend([p0, p1]);
            }
            Primitive::Arc(Arc { p0, p1, p2 }) => points.extend([p0, p1, p2]),
            Primitive::Curve(CubicBez { p0, p1, p2, p3 }) => points.extend([p0, p1, p2, p3]),
        }
        points
    }

    /// The `n`-th defining point.
    ///
    /// Negative indices count from the end, so `-1` is the end point.
    /// Returns `None` when `n` is out of range.
    pub fn point(&self, n: isize) -> Option<Pair> {
        let points = self.points();
        let index = if n < 0 {
            points.len().checked_sub(n.unsigned_abs())?
        } else {
            n as usize
        };
        points.get(index).copied()
    }

    /// Move the start point.
    pub fn set_start(&mut self, p: Pair) {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.p0 = p,
            Primitive::Arc(a) => a.p0 = p,
            Primitive::Curve(c) => c.p0 = p,
        }
    }

    /// Move the end point.
    pub fn set_end(&mut self, p: Pair) {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.p1 = p,
            Primitive::Arc(a) => a.p2 = p,
            Primitive::Curve(c) => c.p3 = p,
        }
    }

    /// The same primitive travelled in the opposite direction.
    ///
    /// A reversed `Close` is a plain line.
    #[must_use]
    pub fn reversed(&self) -> Primitive {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => Primitive::Line(l.reversed()),
            Primitive::Arc(a) => Primitive::Arc(a.reversed()),
            Primitive::Curve(c) => Primitive::Curve(c.reversed()),
        }
    }

    /// Points where `self` and `other` intersect, at most `max` of them.
    ///
    /// Only crossings lying inside the extents of both primitives are
    /// returned. The primitive with more defining points computes the
    /// intersections with the simpler one; only line-line intersections
    /// are implemented so far, every other combination yields nothing.
    pub fn intersections(&self, other: &Primitive, max: usize) -> Intersections {
        if self.n_points() < other.n_points() {
            return other.intersections(self, max);
        }
        let mut found = Intersections::new();
        if max == 0 {
            return found;
        }
        match (self, other) {
            (
                Primitive::Line(a) | Primitive::Close(a),
                Primitive::Line(b) | Primitive::Close(b),
            ) => found.extend(a.intersection(b)),
            _ => log::trace!(
                "{}-{} intersections are not implemented",
                self.kind(),
                other.kind()
            ),
        }
        found.truncate(max);
        found
    }

    /// Reconcile the end of `self` with the start of `next`.
    ///
    /// The two primitives are treated as straight lines at the seam: the
    /// shared point becomes the crossing of the end tangent of `self` with
    /// the start tangent of `next`. If those tangents are parallel the end
    /// of `self` snaps to the start of `next` instead.
    ///
    /// The primitives are always connected afterwards. Returns `false` when
    /// the fallback was used.
    pub fn join(&mut self, next: &mut Primitive) -> bool {
        let end = self.end();
        let start = next.start();
        if end == start {
            return true;
        }
        let l1 = Line::new(end, end + self.tangent(1.0));
        let l2 = Line::new(start, start + next.tangent(0.0));
        let (joint, crossed) = match l1.crossing_point(&l2) {
            Some(p) => (p, true),
            None => {
                log::debug!("parallel tangents at {end} and {start}, snapping the join");
                (start, false)
            }
        };
        self.set_end(joint);
        next.set_start(joint);
        crossed
    }

    /// Emit this primitive to `sink`, without the initial move.
    ///
    /// Arcs are emitted as cubic Béziers, see [`Arc::to_cubics`]. A
    /// degenerate arc is emitted as a line to its end point.
    pub fn render(&self, sink: &mut impl PathSink) {
        match self {
            Primitive::Line(l) => sink.line_to(l.p1),
            Primitive::Arc(a) => {
                let curves = a.to_cubics();
                if curves.is_empty() {
                    sink.line_to(a.p2);
                }
                for c in curves {
                    sink.curve_to(c.p1, c.p2, c.p3);
                }
            }
            Primitive::Curve(c) => sink.curve_to(c.p1, c.p2, c.p3),
            Primitive::Close(_) => sink.close_path(),
        }
    }
}

impl From<Line> for Primitive {
    #[inline(always)]
    fn from(l: Line) -> Self {
        Primitive::Line(l)
    }
}

impl From<Arc> for Primitive {
    #[inline(always)]
    fn from(a: Arc) -> Self {
        Primitive::Arc(a)
    }
}

impl From<CubicBez> for Primitive {
    #[inline(always)]
    fn from(c: CubicBez) -> Self {
        Primitive::Curve(c)
    }
}

impl ParamCurve for Primitive {
    fn eval(&self, t: f64) -> Pair {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.eval(t),
            Primitive::Arc(a) => a.eval(t),
            Primitive::Curve(c) => c.eval(t),
        }
    }

    fn tangent(&self, t: f64) -> Vector {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.tangent(t),
            Primitive::Arc(a) => a.tangent(t),
            Primitive::Curve(c) => c.tangent(t),
        }
    }

    fn start(&self) -> Pair {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.start(),
            Primitive::Arc(a) => a.start(),
            Primitive::Curve(c) => c.start(),
        }
    }

    fn end(&self) -> Pair {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.end(),
            Primitive::Arc(a) => a.end(),
            Primitive::Curve(c) => c.end(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.length(),
            Primitive::Arc(a) => a.length(),
            Primitive::Curve(c) => c.length(),
        }
    }

    fn extents(&self) -> Extents {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.extents(),
            Primitive::Arc(a) => a.extents(),
            Primitive::Curve(c) => c.extents(),
        }
    }
}

impl ParamCurveNearest for Primitive {
    /// Only computed for lines: arcs and curves return `None`.
    fn closest_param(&self, point: Pair) -> Option<f64> {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.closest_param(point),
            Primitive::Arc(_) | Primitive::Curve(_) => None,
        }
    }
}

impl ParamCurveOffset for Primitive {
    fn offset(&mut self, distance: f64) -> bool {
        match self {
            Primitive::Line(l) | Primitive::Close(l) => l.offset(distance),
            Primitive::Arc(a) => a.offset(distance),
            Primitive::Curve(c) => c.offset(distance),
        }
    }
}

impl Mul<Primitive> for Affine {
    type Output = Primitive;

    fn mul(self, other: Primitive) -> Primitive {
        match other {
            Primitive::Line(l) => Primitive::Line(self * l),
            Primitive::Arc(a) => Primitive::Arc(self * a),
            Primitive::Curve(c) => Primitive::Curve(self * c),
            Primitive::Close(l) => Primitive::Close(self * l),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.kind())?;
        for p in self.points() {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Arc, CubicBez, Line, Pair, ParamCurve, ParamCurveNearest, Primitive, PrimitiveKind,
    };

    fn assert_near(p0: Pair, p1: Pair) {
        assert!((p1 - p0).length() < 1e-9, "{p0:?} != {p1:?}");
    }

    #[test]
    fn point_counts() {
        assert_eq!(PrimitiveKind::Line.n_points(), 2);
        assert_eq!(PrimitiveKind::Close.n_points(), 2);
        assert_eq!(PrimitiveKind::Arc.n_points(), 3);
        assert_eq!(PrimitiveKind::Curve.n_points(), 4);
    }

    #[test]
    fn point_access() {
        let c = Primitive::Curve(CubicBez::new((0., 0.), (1., 1.), (2., 1.), (3., 0.)));
        assert_eq!(c.point(0), Some(Pair::new(0., 0.)));
        assert_eq!(c.point(3), Some(Pair::new(3., 0.)));
        assert_eq!(c.point(-1), Some(Pair::new(3., 0.)));
        assert_eq!(c.point(-4), Some(Pair::new(0., 0.)));
        assert_eq!(c.point(4), None);
        assert_eq!(c.point(-5), None);

        let l = Primitive::Line(Line::new((0., 0.), (1., 0.)));
        assert_eq!(l.point(2), None);
        assert_eq!(l.points().len(), 2);
    }

    #[test]
    fn line_line_intersections() {
        let a = Primitive::Line(Line::new((0., 0.), (4., 4.)));
        let b = Primitive::Close(Line::new((0., 4.), (4., 0.)));
        let found = a.intersections(&b, 4);
        assert_eq!(found.len(), 1);
        assert_near(found[0], Pair::new(2., 2.));
        assert!(a.intersections(&b, 0).is_empty());

        let parallel = Primitive::Line(Line::new((0., 1.), (4., 5.)));
        assert!(a.intersections(&parallel, 4).is_empty());
    }

    #[test]
    fn horizontal_vertical_intersections() {
        let mut missed = 0;
        for i in 1..50 {
            for j in 1..50 {
                let x = 0.37 * f64::from(j);
                let y = 0.1 * f64::from(i);
                let v = Primitive::Line(Line::new((x, -1.0), (x, 20.0)));
                let h = Primitive::Close(Line::new((20.0, y), (-1.0, y)));
                missed += usize::from(v.intersections(&h, 4).len() != 1);
                missed += usize::from(h.intersections(&v, 4).len() != 1);
            }
        }
        assert_eq!(missed, 0);
    }

    #[test]
    fn unimplemented_intersections_are_empty() {
        let l = Primitive::Line(Line::new((-2., 0.), (2., 0.)));
        let a = Primitive::Arc(Arc::new((1., -1.), (0., 1.), (-1., -1.)));
        assert!(l.intersections(&a, 4).is_empty());
        assert!(a.intersections(&l, 4).is_empty());
    }

    #[test]
    fn closest_param_only_for_lines() {
        let l = Primitive::Line(Line::new((0., 0.), (4., 0.)));
        assert_eq!(l.closest_param(Pair::new(1., 3.)), Some(0.25));
        let a = Primitive::Arc(Arc::new((1., 0.), (0., 1.), (-1., 0.)));
        assert_eq!(a.closest_param(Pair::new(1., 3.)), None);
    }

    #[test]
    fn join_at_tangent_crossing() {
        // Two lines offset apart around a right-angle corner.
        let mut a = Primitive::Line(Line::new((0., 1.), (10., 1.)));
        let mut b = Primitive::Line(Line::new((9., 0.), (9., 10.)));
        assert!(a.join(&mut b));
        assert_near(a.end(), Pair::new(9., 1.));
        assert_eq!(a.end(), b.start());
    }

    #[test]
    fn join_parallel_snaps_to_next() {
        let mut a = Primitive::Line(Line::new((0., 0.), (5., 0.)));
        let mut b = Primitive::Line(Line::new((5., 1.), (9., 1.)));
        assert!(!a.join(&mut b));
        assert_eq!(a.end(), Pair::new(5., 1.));
        assert_eq!(b.start(), Pair::new(5., 1.));
    }

    #[test]
    fn display_dump() {
        let l = Primitive::Line(Line::new((0., 0.), (1., 2.)));
        assert_eq!(l.to_string(), "line: (0, 0) (1, 2)");
    }

    #[test]
    fn reversed_close_is_line() {
        let c = Primitive::Close(Line::new((1., 1.), (0., 0.)));
        assert_eq!(c.reversed(), Primitive::Line(Line::new((0., 0.), (1., 1.))));
    }
}
