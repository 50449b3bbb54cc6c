//! Axis-aligned bounding boxes.
//!
//! An [`Aabb`] is stored as four scalar edges. The vertical edges follow the
//! world's y-up convention: `y1` is the **top** (larger) edge and `y2` the
//! **bottom** (smaller) one. Every predicate and mutator in this module keeps
//! that orientation.

use glam::DVec2;

use crate::axis::Axis;

/// Errors raised when constructing a box with inverted edges.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum AabbError {
    /// The left edge is not strictly left of the right edge.
    #[error("left edge x1 ({x1}) must be less than right edge x2 ({x2})")]
    InvertedX {
        /// Left edge.
        x1: f64,
        /// Right edge.
        x2: f64,
    },

    /// The top edge is not strictly above the bottom edge.
    #[error("top edge y1 ({y1}) must be greater than bottom edge y2 ({y2})")]
    InvertedY {
        /// Top edge.
        y1: f64,
        /// Bottom edge.
        y2: f64,
    },
}

/// An axis-aligned box given by its left, right, top and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Left edge.
    pub x1: f64,
    /// Right edge.
    pub x2: f64,
    /// Top edge.
    pub y1: f64,
    /// Bottom edge.
    pub y2: f64,
}

impl Aabb {
    /// Create a box from its left, right, top and bottom edges.
    ///
    /// # Errors
    ///
    /// Returns [`AabbError`] unless `x1 < x2` and `y1 > y2`.
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64) -> Result<Self, AabbError> {
        let aabb = Self { x1, x2, y1, y2 };
        aabb.validate()?;
        Ok(aabb)
    }

    /// Check the edge ordering invariant.
    ///
    /// NaN edges fail both comparisons and are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AabbError`] when either axis is inverted or degenerate.
    pub fn validate(&self) -> Result<(), AabbError> {
        if !(self.x1 < self.x2) {
            return Err(AabbError::InvertedX {
                x1: self.x1,
                x2: self.x2,
            });
        }
        if !(self.y1 > self.y2) {
            return Err(AabbError::InvertedY {
                y1: self.y1,
                y2: self.y2,
            });
        }
        Ok(())
    }

    /// Horizontal extent, `x2 - x1`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Vertical extent, `y1 - y2`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y2
    }

    /// Returns `(low, high)` edges along `axis`: `(x1, x2)` or `(y2, y1)`.
    #[must_use]
    pub fn span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.x1, self.x2),
            Axis::Y => (self.y2, self.y1),
        }
    }

    /// Overwrite the `(low, high)` edges along `axis`.
    pub fn set_span(&mut self, axis: Axis, low: f64, high: f64) {
        match axis {
            Axis::X => {
                self.x1 = low;
                self.x2 = high;
            }
            Axis::Y => {
                self.y2 = low;
                self.y1 = high;
            }
        }
    }

    /// Move both edges along `axis` by `delta`.
    pub fn shift(&mut self, axis: Axis, delta: f64) {
        let (low, high) = self.span(axis);
        self.set_span(axis, low + delta, high + delta);
    }

    /// Move the whole box by `offset`.
    pub fn translate(&mut self, offset: DVec2) {
        self.shift(Axis::X, offset.x);
        self.shift(Axis::Y, offset.y);
    }

    /// Strict overlap along `axis` only.
    #[must_use]
    pub fn overlaps_on(&self, other: &Aabb, axis: Axis) -> bool {
        let (a_low, a_high) = self.span(axis);
        let (b_low, b_high) = other.span(axis);
        a_low < b_high && a_high > b_low
    }

    /// Strict overlap on both axes at once. Boxes that merely touch do not
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 > other.y2 && self.y2 < other.y1
    }
}
