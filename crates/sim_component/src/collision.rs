//! Collision box component and response policies.

use std::fmt;

use sim_math::{Aabb, AabbError};

/// How an entity responds when its box overlaps another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionType {
    /// Reserved for an elastic response. No response is implemented.
    Bounce,
    /// Pushed out of the overlap along the axis being resolved.
    #[default]
    Slide,
    /// Immovable obstacle. Never resolves itself.
    Rigid,
    /// Pins itself to the first entity it touches.
    Stick,
}

impl fmt::Display for CollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollisionType::Bounce => "BOUNCE",
            CollisionType::Slide => "SLIDE",
            CollisionType::Rigid => "RIGID",
            CollisionType::Stick => "STICK",
        };
        f.write_str(name)
    }
}

/// An axis-aligned collision box with its response policy.
///
/// The box lives in world space and must be kept in lockstep with the
/// entity's [`Position`](crate::Position) by every system that moves it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub aabb: Aabb,
    pub collision_type: CollisionType,
}

impl Collision {
    /// Create a collision box from its left, right, top and bottom edges.
    ///
    /// # Errors
    ///
    /// Returns [`AabbError`] unless `x1 < x2` and `y1 > y2`.
    pub fn new(
        x1: f64,
        x2: f64,
        y1: f64,
        y2: f64,
        collision_type: CollisionType,
    ) -> Result<Self, AabbError> {
        Ok(Self {
            aabb: Aabb::new(x1, x2, y1, y2)?,
            collision_type,
        })
    }

    /// Wrap an existing box.
    #[must_use]
    pub fn from_aabb(aabb: Aabb, collision_type: CollisionType) -> Self {
        Self {
            aabb,
            collision_type,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.aabb.width()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.aabb.height()
    }
}
