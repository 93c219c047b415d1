// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segments: the pen-down runs of primitives of a path.

use core::fmt;
use core::ops::Range;

use smallvec::smallvec;

use crate::{
    Affine, Arc, CubicBez, Extents, Line, Pair, ParamCurve, ParamCurveOffset, Path, PathError,
    PathOp, PathRecord, PathSink, PathStatus, Primitive, PrimitiveKind,
};

/// A primitive as stored in a segment: its points without the start.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum SegEl {
    Line(Pair),
    Arc(Pair, Pair),
    Curve(Pair, Pair, Pair),
    Close,
}

impl SegEl {
    /// Read a drawing record, `None` for a move.
    fn from_record(index: usize, record: &PathRecord) -> Result<Option<SegEl>, PathError> {
        let points = checked_points(index, record)?;
        Ok(Some(match record.op {
            PathOp::MoveTo => return Ok(None),
            PathOp::LineTo => SegEl::Line(points[0]),
            PathOp::ArcTo => SegEl::Arc(points[0], points[1]),
            PathOp::CurveTo => SegEl::Curve(points[0], points[1], points[2]),
            PathOp::ClosePath => SegEl::Close,
        }))
    }

    fn from_primitive(prim: &Primitive) -> SegEl {
        match *prim {
            Primitive::Line(Line { p1, .. }) => SegEl::Line(p1),
            Primitive::Arc(Arc { p1, p2, .. }) => SegEl::Arc(p1, p2),
            Primitive::Curve(CubicBez { p1, p2, p3, .. }) => SegEl::Curve(p1, p2, p3),
            Primitive::Close(_) => SegEl::Close,
        }
    }

    fn to_primitive(self, p0: Pair, start: Pair) -> Primitive {
        match self {
            SegEl::Line(p1) => Primitive::Line(Line { p0, p1 }),
            SegEl::Arc(p1, p2) => Primitive::Arc(Arc { p0, p1, p2 }),
            SegEl::Curve(p1, p2, p3) => Primitive::Curve(CubicBez { p0, p1, p2, p3 }),
            SegEl::Close => Primitive::Close(Line { p0, p1: start }),
        }
    }

    /// The end point, `None` for a close.
    fn end(self) -> Option<Pair> {
        match self {
            SegEl::Line(p) | SegEl::Arc(_, p) | SegEl::Curve(_, _, p) => Some(p),
            SegEl::Close => None,
        }
    }

    fn to_record(self) -> PathRecord {
        match self {
            SegEl::Line(p) => PathRecord::new(PathOp::LineTo, [p]),
            SegEl::Arc(p1, p2) => PathRecord::new(PathOp::ArcTo, [p1, p2]),
            SegEl::Curve(p1, p2, p3) => PathRecord::new(PathOp::CurveTo, [p1, p2, p3]),
            SegEl::Close => PathRecord {
                op: PathOp::ClosePath,
                points: smallvec![],
            },
        }
    }

    fn apply_affine(&mut self, affine: Affine) {
        match self {
            SegEl::Line(p) => *p = affine * *p,
            SegEl::Arc(p1, p2) => {
                *p1 = affine * *p1;
                *p2 = affine * *p2;
            }
            SegEl::Curve(p1, p2, p3) => {
                *p1 = affine * *p1;
                *p2 = affine * *p2;
                *p3 = affine * *p3;
            }
            SegEl::Close => {}
        }
    }
}

/// A maximal run of primitives following one move.
///
/// A segment is read out of a [`Path`] and keeps the range of records it
/// was read from, so that it can be written back with
/// [`Path::update_segment`] once modified.
///
/// Every primitive starts where the previous one ends, the first one at
/// the start of the segment. The segment stores each shared point once:
/// operations rebuild the whole sequence, which keeps the primitives
/// connected. A close, if any, is the last primitive and ends at the start
/// of the segment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    start: Pair,
    elements: Vec<SegEl>,
    span: Range<usize>,
}

impl Segment {
    /// Read the first segment of `path`.
    ///
    /// Records before the first move are skipped, and consecutive moves
    /// collapse into the last one. The segment runs until the end of the
    /// path, the next move, or a close (included).
    pub fn from_path(path: &Path) -> Result<Segment, PathError> {
        Segment::read(path, 0).map_err(|err| {
            log::warn!("rejected path: {err}");
            err
        })
    }

    /// Read the segment starting at or after record `from`.
    fn read(path: &Path, from: usize) -> Result<Segment, PathError> {
        if path.status() != PathStatus::Success {
            return Err(PathError::BadStatus);
        }
        let records = path.records();
        if records.is_empty() {
            return Err(PathError::EmptyPath);
        }
        let mut first = records
            .iter()
            .skip(from)
            .position(|r| r.op == PathOp::MoveTo)
            .map(|i| i + from)
            .ok_or(PathError::NoLeadingMove)?;
        while records
            .get(first + 1)
            .is_some_and(|r| r.op == PathOp::MoveTo)
        {
            first += 1;
        }
        let start = checked_points(first, &records[first])?[0];

        let mut elements = Vec::new();
        let mut end = first + 1;
        while let Some(record) = records.get(end) {
            let Some(el) = SegEl::from_record(end, record)? else {
                break;
            };
            elements.push(el);
            end += 1;
            if el == SegEl::Close {
                break;
            }
        }
        if elements.is_empty() {
            return Err(PathError::NoPrimitives);
        }
        Ok(Segment {
            start,
            elements,
            span: first..end,
        })
    }

    /// The start point, the target of the leading move.
    #[inline]
    pub fn start(&self) -> Pair {
        self.start
    }

    /// The range of path records this segment was read from.
    ///
    /// The range starts at the leading move and holds one record per
    /// primitive after it.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The number of primitives.
    #[inline]
    pub fn primitive_count(&self) -> usize {
        self.elements.len()
    }

    /// Does the segment end with a close?
    pub fn is_closed(&self) -> bool {
        self.elements.last() == Some(&SegEl::Close)
    }

    /// The current point at the end of the segment.
    pub fn end(&self) -> Pair {
        self.elements
            .iter()
            .rev()
            .find_map(|el| el.end())
            .unwrap_or(self.start)
    }

    /// The `n`-th primitive.
    pub fn primitive(&self, n: usize) -> Option<Primitive> {
        let el = *self.elements.get(n)?;
        let org = match n.checked_sub(1) {
            Some(prev) => self.elements[prev].end().unwrap_or(self.start),
            None => self.start,
        };
        Some(el.to_primitive(org, self.start))
    }

    /// Iterate over the primitives.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive> + '_ {
        let mut org = self.start;
        self.elements.iter().map(move |el| {
            let prim = el.to_primitive(org, self.start);
            org = prim.end();
            prim
        })
    }

    /// The length of the segment, the sum of the primitive lengths.
    pub fn length(&self) -> f64 {
        self.primitives().map(|p| p.length()).sum()
    }

    /// The union of the extents of the primitives.
    pub fn extents(&self) -> Extents {
        self.primitives().fold(Extents::UNDEFINED, |mut acc, p| {
            acc.union(&p.extents());
            acc
        })
    }

    /// Intersections between the primitives of two segments, at most `max`
    /// of them.
    ///
    /// See [`Primitive::intersections`] for the supported primitive kinds.
    pub fn intersections(&self, other: &Segment, max: usize) -> Vec<Pair> {
        let mut found = Vec::new();
        for prim in self.primitives() {
            for other_prim in other.primitives() {
                if found.len() >= max {
                    return found;
                }
                found.extend(prim.intersections(&other_prim, max - found.len()));
            }
        }
        found
    }

    /// Replace the segment with its parallel at `distance`.
    ///
    /// Every primitive is offset on its own, then joined with the previous
    /// offset primitive. Degenerate primitives are joined unmoved.
    ///
    /// Closed segments are not handled: the close is offset as a line and
    /// its new end point dropped, so it goes back to the new start of the
    /// segment.
    pub fn offset(&mut self, distance: f64) {
        let mut offset: Vec<Primitive> = Vec::with_capacity(self.elements.len());
        for mut prim in self.primitives() {
            if !prim.offset(distance) {
                log::debug!("{prim} left in place by the offset");
            }
            if let Some(prev) = offset.last_mut() {
                prev.join(&mut prim);
            }
            offset.push(prim);
        }
        self.rebuild(&offset);
    }

    /// Reverse the direction of travel.
    ///
    /// A closed segment keeps its close: the open part is reversed, so the
    /// segment starts at its former current point.
    pub fn reverse(&mut self) {
        let closed = self.is_closed();
        let mut reversed: Vec<Primitive> = self
            .primitives()
            .filter(|p| p.kind() != PrimitiveKind::Close)
            .map(|p| p.reversed())
            .collect();
        reversed.reverse();
        if reversed.is_empty() {
            // A lone close has nothing to swap.
            return;
        }
        let start = reversed[0].start();
        self.elements = reversed.iter().map(SegEl::from_primitive).collect();
        if closed {
            self.elements.push(SegEl::Close);
        }
        self.start = start;
    }

    /// Apply an affine transform to every point of the segment.
    pub fn apply_affine(&mut self, affine: Affine) {
        self.start = affine * self.start;
        for el in &mut self.elements {
            el.apply_affine(affine);
        }
    }

    /// Emit the segment to `sink`, arcs converted to cubic curves.
    pub fn render(&self, sink: &mut impl PathSink) {
        sink.move_to(self.start);
        for prim in self.primitives() {
            prim.render(sink);
        }
    }

    /// The records of the segment: a move followed by its primitives.
    pub fn to_records(&self) -> Vec<PathRecord> {
        let mut records = Vec::with_capacity(self.elements.len() + 1);
        records.push(PathRecord::new(PathOp::MoveTo, [self.start]));
        records.extend(self.elements.iter().map(|el| el.to_record()));
        records
    }

    /// Store a connected sequence of primitives.
    fn rebuild(&mut self, prims: &[Primitive]) {
        if let Some(first) = prims.first() {
            self.start = first.start();
        }
        self.elements = prims.iter().map(SegEl::from_primitive).collect();
    }
}

/// The points of `record`, checked against the count its operation needs.
fn checked_points(index: usize, record: &PathRecord) -> Result<&[Pair], PathError> {
    let expected = record.op.n_points();
    if record.points.len() < expected {
        return Err(PathError::TooFewPoints {
            index,
            op: record.op,
            expected,
            found: record.points.len(),
        });
    }
    Ok(&record.points)
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "move: {}", self.start)?;
        for prim in self.primitives() {
            writeln!(f, "  {prim}")?;
        }
        Ok(())
    }
}

/// A cursor over the segments of a [`Path`].
///
/// This is also an iterator; iteration stops at the first malformed
/// segment.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    path: &'a Path,
    next: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(path: &'a Path) -> Segments<'a> {
        Segments { path, next: 0 }
    }

    /// Go back to the first segment.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.next >= self.path.records().len() {
            return None;
        }
        match Segment::read(self.path, self.next) {
            Ok(segment) => {
                self.next = segment.span.end;
                Some(segment)
            }
            Err(err) => {
                // Trailing records without a primitive end the path.
                if !matches!(err, PathError::NoPrimitives | PathError::NoLeadingMove) {
                    log::warn!("stopped reading path at record {}: {err}", self.next);
                }
                self.next = self.path.records().len();
                None
            }
        }
    }
}
