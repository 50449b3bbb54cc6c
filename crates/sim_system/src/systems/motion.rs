//! Parametric motion driven by functions of simulation time.

use sim_component::{Collision, ComponentKind, CustomMotion, Position, QueryDescriptor};
use sim_math::Axis;
use sim_world::World;
use tracing::debug;

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// Places entities at `origin + f(t)` on each axis that has a function.
#[derive(Debug, Clone)]
pub struct CustomMotionSystem {
    query: QueryDescriptor,
}

impl CustomMotionSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new()
                .require(ComponentKind::Position)
                .require(ComponentKind::CustomMotion),
        }
    }

    /// Evaluate every motion at simulation time `t`.
    pub fn step(&self, world: &mut World, t: f64) {
        for entity in world.resolve(&self.query) {
            let Some(position) = world.get::<Position>(entity).map(Position::as_vec) else {
                continue;
            };
            let aabb = world.get::<Collision>(entity).map(|c| c.aabb);
            let Some(motion) = world.get_mut::<CustomMotion>(entity) else {
                continue;
            };

            let origin = *motion.origin.get_or_insert_with(|| {
                debug!(%entity, ?position, "captured motion origin");
                position
            });
            let box_origin = aabb.map(|aabb| *motion.box_origin.get_or_insert(aabb));
            let dx = motion.fx.as_ref().map(|f| f.eval(t));
            let dy = motion.fy.as_ref().map(|f| f.eval(t));

            let displaced = [(Axis::X, dx), (Axis::Y, dy)];
            if let Some(position) = world.get_mut::<Position>(entity) {
                for (axis, delta) in displaced {
                    if let Some(delta) = delta {
                        *position.axis_mut(axis) = axis.component(origin) + delta;
                    }
                }
            }
            if let (Some(collision), Some(box_origin)) =
                (world.get_mut::<Collision>(entity), box_origin)
            {
                for (axis, delta) in displaced {
                    if let Some(delta) = delta {
                        let (low, high) = box_origin.span(axis);
                        collision.aabb.set_span(axis, low + delta, high + delta);
                    }
                }
            }
        }
    }
}

impl Default for CustomMotionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CustomMotionSystem {
    fn name(&self) -> &str {
        "motion"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, frame: &FrameArgs) -> Result<(), SystemError> {
        self.step(world, frame.t);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use sim_component::CollisionType;
    use sim_math::DVec2;

    use super::*;

    #[test]
    fn test_sinusoid_at_half_pi() {
        let mut world = World::new();
        let e = world
            .create([
                Position::new(0.0, 0.0).into(),
                CustomMotion::new()
                    .with_x(|t| (10.0 * t).sin())
                    .with_y(f64::sin)
                    .into(),
            ])
            .unwrap();

        let motion = CustomMotionSystem::new();
        motion.step(&mut world, 0.0);
        motion.step(&mut world, FRAC_PI_2);

        let p = world.get::<Position>(e).unwrap();
        assert!((p.x - (5.0 * PI).sin()).abs() < 1e-12);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_origin_is_captured_once() {
        let mut world = World::new();
        let e = world
            .create([
                Position::new(250.0, 250.0).into(),
                CustomMotion::new().with_y(|t| 80.0 * t.sin()).into(),
            ])
            .unwrap();
        let motion = CustomMotionSystem::new();

        motion.step(&mut world, FRAC_PI_2);
        assert!((world.get::<Position>(e).unwrap().y - 330.0).abs() < 1e-9);
        motion.step(&mut world, 0.0);
        assert!((world.get::<Position>(e).unwrap().y - 250.0).abs() < 1e-9);
        assert_eq!(
            world.get::<CustomMotion>(e).unwrap().origin,
            Some(DVec2::new(250.0, 250.0))
        );
    }

    #[test]
    fn test_axis_without_function_is_untouched() {
        let mut world = World::new();
        let e = world
            .create([
                Position::new(1.0, 2.0).into(),
                CustomMotion::new().with_y(|_| 3.0).into(),
            ])
            .unwrap();
        let motion = CustomMotionSystem::new();
        motion.step(&mut world, 0.0);
        world.get_mut::<Position>(e).unwrap().x = 9.0;
        motion.step(&mut world, 1.0);

        assert_eq!(world.get::<Position>(e).unwrap(), &Position::new(9.0, 5.0));
    }

    #[test]
    fn test_box_moves_in_lockstep() {
        let mut world = World::new();
        let target = world
            .create([
                Position::new(250.0, 250.0).into(),
                Collision::new(245.0, 255.0, 270.0, 220.0, CollisionType::Rigid)
                    .unwrap()
                    .into(),
                CustomMotion::new().with_y(|t| 80.0 * t.sin()).into(),
            ])
            .unwrap();

        CustomMotionSystem::new().step(&mut world, FRAC_PI_2);

        let aabb = world.get::<Collision>(target).unwrap().aabb;
        assert!((aabb.y1 - 350.0).abs() < 1e-9);
        assert!((aabb.y2 - 300.0).abs() < 1e-9);
        assert_eq!((aabb.x1, aabb.x2), (245.0, 255.0));
    }
}
