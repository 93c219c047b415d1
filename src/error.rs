// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while reading path data.

use core::ops::Range;

use thiserror::Error;

use crate::PathOp;

/// A path could not be read as a segment.
///
/// Degenerate geometry is not an error: only malformed path data is.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path holds no record at all.
    #[error("the path has no records")]
    EmptyPath,

    /// The producer of the path reported a failure.
    #[error("the path status is invalid")]
    BadStatus,

    /// No move record was found where a segment should start.
    #[error("no move record starts a segment")]
    NoLeadingMove,

    /// A record carries fewer points than its operation needs.
    #[error("record {index}: {op} needs {expected} points, found {found}")]
    TooFewPoints {
        /// Index of the record in the path.
        index: usize,
        /// Operation of the record.
        op: PathOp,
        /// Points needed by the operation.
        expected: usize,
        /// Points carried by the record.
        found: usize,
    },

    /// A move is not followed by any drawing record.
    #[error("the segment has no primitives")]
    NoPrimitives,

    /// A segment cannot be written back over its records.
    #[error("records {span:?} do not match a segment of {expected} records")]
    SpanMismatch {
        /// The records the segment was read from.
        span: Range<usize>,
        /// Records needed by the segment.
        expected: usize,
    },
}
