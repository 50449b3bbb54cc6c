//! Direct keyboard-style movement of one controllable entity.

use sim_component::{Collision, ComponentKind, Control, EntityId, Position, QueryDescriptor};
use sim_math::Axis;
use sim_world::{World, WorldError};

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::input::DirectionalInput;
use crate::system::System;

/// Moves a single entity by a fixed step per held key, bypassing physics.
///
/// On the x axis LEFT and RIGHT apply; on the y axis UP moves up and DOWN
/// moves down. The entity's box moves with it.
#[derive(Debug, Clone)]
pub struct MovementSystem {
    entity: EntityId,
    speed: f64,
    query: QueryDescriptor,
}

impl MovementSystem {
    /// Step used when none is given.
    pub const DEFAULT_SPEED: f64 = 1.0;

    /// Drive `entity`, which must already hold a position and a control
    /// component.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] for an unknown entity and
    /// [`WorldError::MissingComponent`] if either component is missing.
    pub fn new(world: &World, entity: EntityId, speed: f64) -> Result<Self, WorldError> {
        let record = world
            .entity(entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        for kind in [ComponentKind::Position, ComponentKind::Control] {
            if !record.has(kind) {
                return Err(WorldError::MissingComponent { entity, kind });
            }
        }
        Ok(Self {
            entity,
            speed,
            query: QueryDescriptor::new()
                .require(ComponentKind::Position)
                .require(ComponentKind::Control),
        })
    }

    #[must_use]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Apply `input` to the driven entity along `axis`.
    pub fn step(&self, world: &mut World, axis: Axis, input: DirectionalInput) {
        let controllable = world
            .get::<Control>(self.entity)
            .is_some_and(|c| c.controllable);
        if !controllable {
            return;
        }

        let (negative, positive) = match axis {
            Axis::X => (input.left, input.right),
            Axis::Y => (input.down, input.up),
        };
        let mut delta = 0.0;
        if negative {
            delta -= self.speed;
        }
        if positive {
            delta += self.speed;
        }
        if delta == 0.0 {
            return;
        }

        if let Some(position) = world.get_mut::<Position>(self.entity) {
            *position.axis_mut(axis) += delta;
        }
        if let Some(collision) = world.get_mut::<Collision>(self.entity) {
            collision.aabb.shift(axis, delta);
        }
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, frame: &FrameArgs) -> Result<(), SystemError> {
        let axis = frame.require_axis(self.name())?;
        self.step(world, axis, frame.input);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sim_component::CollisionType;

    use super::*;

    fn player(world: &mut World) -> EntityId {
        world
            .create([
                Position::new(5.0, 5.0).into(),
                Control::default().into(),
                Collision::new(0.0, 10.0, 10.0, 0.0, CollisionType::Slide)
                    .unwrap()
                    .into(),
            ])
            .unwrap()
    }

    #[test]
    fn test_requires_position_and_control() {
        let mut world = World::new();
        let bare = world.create([Position::default().into()]).unwrap();
        assert_eq!(
            MovementSystem::new(&world, bare, 1.0).unwrap_err(),
            WorldError::MissingComponent {
                entity: bare,
                kind: ComponentKind::Control
            }
        );
        let ghost = EntityId::from_raw(99);
        assert_eq!(
            MovementSystem::new(&world, ghost, 1.0).unwrap_err(),
            WorldError::EntityNotFound(ghost)
        );
    }

    #[test]
    fn test_moves_per_axis() {
        let mut world = World::new();
        let e = player(&mut world);
        let mut movement = MovementSystem::new(&world, e, 2.0).unwrap();
        let frame = FrameArgs::new(0.0, 0.1).with_input(DirectionalInput {
            right: true,
            up: true,
            ..DirectionalInput::NONE
        });

        movement.update(&mut world, &frame.on_axis(Axis::X)).unwrap();
        assert_eq!(world.get::<Position>(e).unwrap(), &Position::new(7.0, 5.0));
        movement.update(&mut world, &frame.on_axis(Axis::Y)).unwrap();
        assert_eq!(world.get::<Position>(e).unwrap(), &Position::new(7.0, 7.0));

        let aabb = world.get::<Collision>(e).unwrap().aabb;
        assert_eq!((aabb.x1, aabb.x2, aabb.y1, aabb.y2), (2.0, 12.0, 12.0, 2.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut world = World::new();
        let e = player(&mut world);
        let movement = MovementSystem::new(&world, e, 1.0).unwrap();
        let input = DirectionalInput {
            left: true,
            right: true,
            ..DirectionalInput::NONE
        };
        movement.step(&mut world, Axis::X, input);
        assert_eq!(world.get::<Position>(e).unwrap().x, 5.0);
    }

    #[test]
    fn test_uncontrollable_entity_stays() {
        let mut world = World::new();
        let e = player(&mut world);
        let movement = MovementSystem::new(&world, e, 1.0).unwrap();
        world.get_mut::<Control>(e).unwrap().controllable = false;

        movement.step(&mut world, Axis::Y, DirectionalInput::DOWN);
        assert_eq!(world.get::<Position>(e).unwrap().y, 5.0);
    }

    #[test]
    fn test_update_requires_axis() {
        let mut world = World::new();
        let e = player(&mut world);
        let mut movement = MovementSystem::new(&world, e, 1.0).unwrap();
        assert!(
            movement
                .update(&mut world, &FrameArgs::new(0.0, 0.1))
                .is_err()
        );
    }
}
