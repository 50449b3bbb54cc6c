//! Orients entities along their velocity.

use sim_component::{ComponentKind, QueryDescriptor, Rotation, Velocity};
use sim_world::World;

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// Points the up vector of every velocity-following rotation along the
/// entity's velocity.
#[derive(Debug, Clone)]
pub struct RotateSystem {
    query: QueryDescriptor,
}

impl RotateSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new()
                .require(ComponentKind::Rotation)
                .require(ComponentKind::Velocity),
        }
    }

    pub fn step(&self, world: &mut World) {
        for entity in world.resolve(&self.query) {
            let Some(velocity) = world.get::<Velocity>(entity).map(Velocity::as_vec) else {
                continue;
            };
            let Some(rotation) = world.get_mut::<Rotation>(entity) else {
                continue;
            };
            if !rotation.rotate_with_velocity {
                continue;
            }
            rotation.up = velocity;
            rotation.angle = velocity.y.atan2(velocity.x);
        }
    }
}

impl Default for RotateSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RotateSystem {
    fn name(&self) -> &str {
        "rotate"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, _frame: &FrameArgs) -> Result<(), SystemError> {
        self.step(world);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use sim_component::Position;
    use sim_math::DVec2;

    use super::*;

    #[test]
    fn test_follows_velocity() {
        let mut world = World::new();
        let arrow = world
            .create([
                Position::default().into(),
                Velocity::new(3.0, 3.0).into(),
                Rotation::following_velocity().into(),
            ])
            .unwrap();

        RotateSystem::new().step(&mut world);

        let rotation = world.get::<Rotation>(arrow).unwrap();
        assert_eq!(rotation.up, DVec2::new(3.0, 3.0));
        assert!((rotation.angle - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_frozen_rotation_is_untouched() {
        let mut world = World::new();
        let arrow = world
            .create([
                Velocity::new(-1.0, 0.0).into(),
                Rotation::default().into(),
            ])
            .unwrap();

        RotateSystem::new().step(&mut world);

        let rotation = world.get::<Rotation>(arrow).unwrap();
        assert_eq!(rotation.up, DVec2::Y);
        assert!((rotation.angle - FRAC_PI_2).abs() < 1e-12);
    }
}
