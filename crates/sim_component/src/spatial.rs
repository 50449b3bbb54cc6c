//! Position, velocity and orientation components.

use std::f64::consts::FRAC_PI_2;

use sim_math::{Axis, DVec2};

/// World-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Mutable access to the coordinate along `axis`.
    pub fn axis_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self { vx: 0.0, vy: 0.0 };

    #[must_use]
    pub const fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    #[must_use]
    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.vx, self.vy)
    }

    /// Mutable access to the velocity along `axis`.
    pub fn axis_mut(&mut self, axis: Axis) -> &mut f64 {
        match axis {
            Axis::X => &mut self.vx,
            Axis::Y => &mut self.vy,
        }
    }
}

/// Orientation as a right/up basis plus the up vector's angle.
///
/// When `rotate_with_velocity` is set the rotate system keeps the up vector
/// aligned with the entity's velocity, so arrows point along their flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Forward-pointing right vector.
    pub right: DVec2,
    /// Up vector.
    pub up: DVec2,
    /// Angle of `up` in radians, measured from the +x axis.
    pub angle: f64,
    pub rotate_with_velocity: bool,
}

impl Rotation {
    /// A rotation that follows the entity's velocity.
    #[must_use]
    pub fn following_velocity() -> Self {
        Self {
            rotate_with_velocity: true,
            ..Self::default()
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            right: DVec2::X,
            up: DVec2::Y,
            angle: FRAC_PI_2,
            rotate_with_velocity: false,
        }
    }
}
