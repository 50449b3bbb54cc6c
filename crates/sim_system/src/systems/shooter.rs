//! Aims launchers from directional input.

use sim_component::{ComponentKind, Position, QueryDescriptor, Shooter};
use sim_world::World;
use tracing::trace;

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::input::DirectionalInput;
use crate::system::System;

/// Radians the aim turns per frame while LEFT or RIGHT is held.
pub const AIM_STEP: f64 = 0.05;

/// Turns each shooter with LEFT/RIGHT and keeps its position on the orbit
/// around its pivot.
#[derive(Debug, Clone)]
pub struct ShooterSystem {
    query: QueryDescriptor,
}

impl ShooterSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new().require(ComponentKind::Shooter),
        }
    }

    /// Apply one frame of `input` to every shooter.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::World`] if a missing position cannot be
    /// attached.
    pub fn step(&self, world: &mut World, input: DirectionalInput) -> Result<(), SystemError> {
        for entity in world.resolve(&self.query) {
            let Some(shooter) = world.get_mut::<Shooter>(entity) else {
                continue;
            };
            if input.left {
                shooter.angle += AIM_STEP;
            }
            if input.right {
                shooter.angle -= AIM_STEP;
            }
            let placed = Position::new(
                shooter.r * shooter.angle.cos() + shooter.x,
                shooter.r * shooter.angle.sin() + shooter.y,
            );
            trace!(%entity, angle = shooter.angle, "aimed");

            match world.get_mut::<Position>(entity) {
                Some(position) => *position = placed,
                None => {
                    world.attach(entity, placed)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for ShooterSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ShooterSystem {
    fn name(&self) -> &str {
        "shooter"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, frame: &FrameArgs) -> Result<(), SystemError> {
        self.step(world, frame.input)
    }
}
