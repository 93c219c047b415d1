// Copyright 2024 the CPML Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes.

use crate::{Affine, Pair, Vector};

/// An axis-aligned bounding box that may be undefined.
///
/// An undefined box is the neutral element of [`Extents::union`]: it
/// contains nothing and adding anything to it yields that thing. The stored
/// origin and size of an undefined box are meaningless and never read.
///
/// A defined box always has a non-negative size.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extents {
    is_defined: bool,
    org: Pair,
    size: Vector,
}

impl Extents {
    /// The undefined box.
    pub const UNDEFINED: Extents = Extents {
        is_defined: false,
        org: Pair::ZERO,
        size: Vector::ZERO,
    };

    /// A zero-size box located at `point`.
    #[inline]
    pub fn from_point(point: Pair) -> Extents {
        Extents {
            is_defined: true,
            org: point,
            size: Vector::ZERO,
        }
    }

    /// The smallest box enclosing every point of `points`.
    ///
    /// Undefined when `points` is empty.
    pub fn from_points(points: impl IntoIterator<Item = Pair>) -> Extents {
        let mut extents = Extents::UNDEFINED;
        for point in points {
            extents.add_point(point);
        }
        extents
    }

    /// Is this box defined?
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.is_defined
    }

    /// The top-left corner in a y-down space, `None` when undefined.
    #[inline]
    pub fn org(&self) -> Option<Pair> {
        self.is_defined.then_some(self.org)
    }

    /// The size of the box, `None` when undefined.
    #[inline]
    pub fn size(&self) -> Option<Vector> {
        self.is_defined.then_some(self.size)
    }

    /// The corner opposite to [`Extents::org`].
    #[inline]
    pub fn max(&self) -> Option<Pair> {
        self.is_defined.then(|| self.org + self.size)
    }

    /// Grow the box minimally so that it includes `point`.
    pub fn add_point(&mut self, point: Pair) {
        if !self.is_defined {
            *self = Extents::from_point(point);
            return;
        }

        if point.x < self.org.x {
            self.size.x += self.org.x - point.x;
            self.org.x = point.x;
        } else if point.x > self.org.x + self.size.x {
            self.size.x = point.x - self.org.x;
        }

        if point.y < self.org.y {
            self.size.y += self.org.y - point.y;
            self.org.y = point.y;
        } else if point.y > self.org.y + self.size.y {
            self.size.y = point.y - self.org.y;
        }
    }

    /// Grow the box so that it includes `other`.
    pub fn union(&mut self, other: &Extents) {
        if !other.is_defined {
            return;
        }
        if !self.is_defined {
            *self = *other;
            return;
        }
        self.add_point(other.org);
        self.add_point(other.org + other.size);
    }

    /// Does this box fully contain `other`, border included?
    ///
    /// Every box contains the undefined box; the undefined box contains
    /// nothing else.
    pub fn contains(&self, other: &Extents) -> bool {
        if !other.is_defined {
            return true;
        }
        if !self.is_defined {
            return false;
        }
        self.contains_point(other.org) && self.contains_point(other.org + other.size)
    }

    /// Does this box contain `point`, border included?
    pub fn contains_point(&self, point: Pair) -> bool {
        if !self.is_defined {
            return false;
        }
        point.x >= self.org.x
            && point.y >= self.org.y
            && point.x <= self.org.x + self.size.x
            && point.y <= self.org.y + self.size.y
    }

    /// Map the box through `matrix`.
    ///
    /// All four corners are transformed and a fresh box is built around
    /// them, so rotations and shears give the correct enclosing box.
    #[must_use]
    pub fn transform(&self, matrix: Affine) -> Extents {
        if !self.is_defined {
            return *self;
        }
        let Pair { x: x0, y: y0 } = self.org;
        let Pair { x: x1, y: y1 } = self.org + self.size;
        Extents::from_points([
            matrix * Pair::new(x0, y0),
            matrix * Pair::new(x1, y0),
            matrix * Pair::new(x0, y1),
            matrix * Pair::new(x1, y1),
        ])
    }
}
