//! Constant-acceleration integration, one axis at a time.

use sim_component::{Collision, ComponentKind, Position, QueryDescriptor, Velocity};
use sim_math::Axis;
use sim_world::World;
use tracing::trace;

use crate::config::PhysicsConfig;
use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// Integrates velocity and position along the frame's axis.
///
/// Each update applies `v += a·dt` then `p += v·dt` on a single axis, and
/// shifts the entity's collision box by the same delta. Driving the x and
/// y axes in separate calls is what lets the collision system resolve each
/// axis independently; callers run y before x.
#[derive(Debug, Clone)]
pub struct PhysicsSystem {
    config: PhysicsConfig,
    query: QueryDescriptor,
}

impl PhysicsSystem {
    /// A physics system under standard downward gravity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    #[must_use]
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            config,
            query: QueryDescriptor::new()
                .require(ComponentKind::Position)
                .require(ComponentKind::Velocity),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Integrate every matching entity along `axis` over `dt`.
    pub fn step(&self, world: &mut World, axis: Axis, dt: f64) {
        let acceleration = axis.component(self.config.gravity);

        for entity in world.resolve(&self.query) {
            let Some(velocity) = world.get_mut::<Velocity>(entity) else {
                continue;
            };
            let v = velocity.axis_mut(axis);
            *v += acceleration * dt;
            let delta = *v * dt;

            if let Some(position) = world.get_mut::<Position>(entity) {
                *position.axis_mut(axis) += delta;
            }
            if let Some(collision) = world.get_mut::<Collision>(entity) {
                collision.aabb.shift(axis, delta);
            }
            trace!(%entity, %axis, delta, "integrated");
        }
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, frame: &FrameArgs) -> Result<(), SystemError> {
        let axis = frame.require_axis(self.name())?;
        self.step(world, axis, frame.dt);
        Ok(())
    }
}
