// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat path data, as handed over by a rendering backend.

use core::fmt;

use smallvec::SmallVec;

use crate::{PathError, Pair, Segment, Segments};

/// The operation of a path record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathOp {
    /// Start a new segment at the given point.
    MoveTo,
    /// A line to the given point.
    LineTo,
    /// A circular arc through the first point, ending at the second one.
    ///
    /// Rendering backends have no native arc: it is converted to cubic
    /// curves when a path is rendered.
    ArcTo,
    /// A cubic Bézier with the given control points and end point.
    CurveTo,
    /// A line back to the start of the segment.
    ClosePath,
}

impl PathOp {
    /// The number of points a record of this operation carries.
    #[inline]
    pub const fn n_points(self) -> usize {
        match self {
            PathOp::MoveTo | PathOp::LineTo => 1,
            PathOp::ArcTo => 2,
            PathOp::CurveTo => 3,
            PathOp::ClosePath => 0,
        }
    }
}

impl fmt::Display for PathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathOp::MoveTo => "move",
            PathOp::LineTo => "line",
            PathOp::ArcTo => "arc",
            PathOp::CurveTo => "curve",
            PathOp::ClosePath => "close",
        };
        f.write_str(name)
    }
}

/// One record of a [`Path`]: an operation and its points.
///
/// The point count is not checked when the record is built; segments
/// reject records carrying fewer points than their operation needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRecord {
    /// The operation.
    pub op: PathOp,
    /// The points, in the order used by the operation.
    pub points: SmallVec<[Pair; 3]>,
}

impl PathRecord {
    /// Create a record.
    pub fn new(op: PathOp, points: impl IntoIterator<Item = Pair>) -> PathRecord {
        PathRecord {
            op,
            points: points.into_iter().collect(),
        }
    }
}

impl fmt::Display for PathRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        for p in &self.points {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}

/// Whether the producer of a [`Path`] succeeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStatus {
    /// The records are usable.
    #[default]
    Success,
    /// The producer failed and the records must not be read.
    Invalid,
}

/// A receiver of drawing commands.
///
/// This is the interface of a rendering backend. Arcs are never emitted:
/// they are converted to cubic curves first.
pub trait PathSink {
    /// Start a new segment at `p`.
    fn move_to(&mut self, p: Pair);
    /// Draw a line to `p`.
    fn line_to(&mut self, p: Pair);
    /// Draw a cubic Bézier with control points `p1`, `p2` ending at `p3`.
    fn curve_to(&mut self, p1: Pair, p2: Pair, p3: Pair);
    /// Draw a line back to the start of the segment.
    fn close_path(&mut self);
}

/// A flat buffer of path records, possibly holding multiple segments.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    status: PathStatus,
    records: Vec<PathRecord>,
}

impl Path {
    /// Create a new, empty path.
    pub fn new() -> Path {
        Path::default()
    }

    /// Create a path from a vector of records.
    pub fn from_vec(records: Vec<PathRecord>) -> Path {
        Path {
            status: PathStatus::Success,
            records,
        }
    }

    /// The status of the path.
    #[inline]
    pub fn status(&self) -> PathStatus {
        self.status
    }

    /// Set the status of the path.
    pub fn set_status(&mut self, status: PathStatus) {
        self.status = status;
    }

    /// The records of the path.
    #[inline]
    pub fn records(&self) -> &[PathRecord] {
        &self.records
    }

    /// Is the path empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Push a raw record onto the path.
    pub fn push(&mut self, record: PathRecord) {
        self.records.push(record);
    }

    /// Push a "move to" record onto the path.
    pub fn move_to<P: Into<Pair>>(&mut self, p: P) {
        self.push(PathRecord::new(PathOp::MoveTo, [p.into()]));
    }

    /// Push a "line to" record onto the path.
    pub fn line_to<P: Into<Pair>>(&mut self, p: P) {
        self.push(PathRecord::new(PathOp::LineTo, [p.into()]));
    }

    /// Push an "arc to" record onto the path.
    ///
    /// The arc goes through `p1` and ends at `p2`.
    pub fn arc_to<P: Into<Pair>>(&mut self, p1: P, p2: P) {
        self.push(PathRecord::new(PathOp::ArcTo, [p1.into(), p2.into()]));
    }

    /// Push a "curve to" record onto the path.
    pub fn curve_to<P: Into<Pair>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathRecord::new(
            PathOp::CurveTo,
            [p1.into(), p2.into(), p3.into()],
        ));
    }

    /// Push a "close path" record onto the path.
    pub fn close_path(&mut self) {
        self.push(PathRecord {
            op: PathOp::ClosePath,
            points: SmallVec::new(),
        });
    }

    /// Append the records of `segment`, arcs included.
    pub fn push_segment(&mut self, segment: &Segment) {
        self.records.extend(segment.to_records());
    }

    /// Iterate over the segments of the path.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self)
    }

    /// Write `segment` back over the records it was read from.
    ///
    /// The span of the segment must still hold its move record followed
    /// by one record per primitive. Records before the move collapsed
    /// when the segment was read are left untouched.
    pub fn update_segment(&mut self, segment: &Segment) -> Result<(), PathError> {
        let span = segment.span();
        let records = segment.to_records();
        if span.end > self.records.len() || span.len() != records.len() {
            return Err(PathError::SpanMismatch {
                span,
                expected: records.len(),
            });
        }
        for (dst, src) in self.records[span].iter_mut().zip(records) {
            *dst = src;
        }
        Ok(())
    }
}

impl PathSink for Path {
    fn move_to(&mut self, p: Pair) {
        Path::move_to(self, p);
    }

    fn line_to(&mut self, p: Pair) {
        Path::line_to(self, p);
    }

    fn curve_to(&mut self, p1: Pair, p2: Pair, p3: Pair) {
        Path::curve_to(self, p1, p2, p3);
    }

    fn close_path(&mut self) {
        Path::close_path(self);
    }
}

impl FromIterator<PathRecord> for Path {
    fn from_iter<T: IntoIterator<Item = PathRecord>>(iter: T) -> Self {
        Path::from_vec(iter.into_iter().collect())
    }
}

impl Extend<PathRecord> for Path {
    fn extend<I: IntoIterator<Item = PathRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}
