//! Rigid pairing between a dependent entity and its anchor.

use sim_math::{Aabb, DVec2};

use crate::entity::EntityId;

/// Offsets from the anchor's position to each edge of the dependent's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOffsets {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl BoxOffsets {
    /// Offsets of `aabb`'s edges as seen from `anchor`.
    #[must_use]
    pub fn capture(anchor: DVec2, aabb: &Aabb) -> Self {
        Self {
            x1: anchor.x - aabb.x1,
            x2: anchor.x - aabb.x2,
            y1: anchor.y - aabb.y1,
            y2: anchor.y - aabb.y2,
        }
    }

    /// Rebuild the box edges from a new anchor position.
    #[must_use]
    pub fn apply(&self, anchor: DVec2) -> Aabb {
        Aabb {
            x1: anchor.x - self.x1,
            x2: anchor.x - self.x2,
            y1: anchor.y - self.y1,
            y2: anchor.y - self.y2,
        }
    }
}

/// Glues an entity to `anchor` at the placement it had when first paired.
///
/// The anchor is a weak reference by ID; it must exist and carry a
/// position when the component is attached. Offsets are anchor minus
/// dependent, frozen on the paired system's first update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paired {
    pub anchor: EntityId,
    pub offset: Option<DVec2>,
    pub box_offsets: Option<BoxOffsets>,
}

impl Paired {
    #[must_use]
    pub fn new(anchor: EntityId) -> Self {
        Self {
            anchor,
            offset: None,
            box_offsets: None,
        }
    }

    /// Returns `true` once the position offset has been frozen.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.offset.is_some()
    }
}
