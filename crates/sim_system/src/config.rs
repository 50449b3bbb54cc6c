//! System configuration.

use serde::Deserialize;
use sim_math::DVec2;

/// Standard gravitational acceleration, in world units per second².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Configuration for [`PhysicsSystem`](crate::PhysicsSystem).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant acceleration `(ax, ay)` applied to every moving entity.
    pub gravity: DVec2,
}

impl PhysicsConfig {
    /// Override the acceleration.
    #[must_use]
    pub fn with_gravity(mut self, gravity: DVec2) -> Self {
        self.gravity = gravity;
        self
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DVec2::new(0.0, -STANDARD_GRAVITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_downward_gravity() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, DVec2::new(0.0, -9.81));
    }

    #[test]
    fn test_with_gravity() {
        let config = PhysicsConfig::default().with_gravity(DVec2::new(1.0, 0.0));
        assert_eq!(config.gravity, DVec2::X);
    }
}
