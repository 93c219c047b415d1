// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of vector path primitives.
//!
//! The cpml library reads the flat path data of a rendering backend into
//! segments of primitives (lines, circular arcs, cubic Béziers and closes)
//! and computes their length, extents, points, tangents, intersections and
//! parallel curves.
//!
//! # Examples
//!
//! Offsetting a polyline:
//! ```
//! use cpml::{Pair, Path, Segment};
//!
//! let mut path = Path::new();
//! path.move_to((0.0, 0.0));
//! path.line_to((10.0, 0.0));
//! path.line_to((10.0, 10.0));
//!
//! let mut segment = Segment::from_path(&path).unwrap();
//! assert_eq!(segment.length(), 20.0);
//!
//! segment.offset(1.0);
//! assert_eq!(segment.start(), Pair::new(0.0, 1.0));
//! assert_eq!(segment.end(), Pair::new(9.0, 10.0));
//! path.update_segment(&segment).unwrap();
//! ```
//!
//! Recovering the circle of a three point arc:
//! ```
//! use cpml::{Arc, Pair, ParamCurve};
//!
//! let arc = Arc::new((1.0, 0.0), (0.0, 1.0), (-1.0, 0.0));
//! let info = arc.info().unwrap();
//! assert!(info.center.distance(Pair::ZERO) < 1e-12);
//! assert!((arc.length() - std::f64::consts::PI).abs() < 1e-9);
//! ```
//!
//! # Features
//!
//! * `serde`: serialization of the value types.
//! * `mint`: conversions with the [`mint`] interoperability types.
//! * `schemars`: JSON schemas of the value types.
//!
//! [`mint`]: https://docs.rs/mint

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod affine;
mod arc;
mod cubicbez;
mod error;
mod extents;
mod line;
mod pair;
mod param_curve;
mod path;
mod primitive;
mod segment;
mod vector;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::cubicbez::*;
pub use crate::error::*;
pub use crate::extents::*;
pub use crate::line::*;
pub use crate::pair::*;
pub use crate::param_curve::*;
pub use crate::path::*;
pub use crate::primitive::*;
pub use crate::segment::*;
pub use crate::vector::*;

/// The largest sweep, in radians, of one cubic Bézier approximating an arc.
pub const ARC_MAX_ANGLE: f64 = core::f64::consts::FRAC_PI_2;

/// The parameter where an offset cubic Bézier meets the true parallel.
///
/// The offset curve is built to pass through the point of the parallel at
/// this parameter of the original curve.
pub const CURVE_OFFSET_M: f64 = 0.5;
