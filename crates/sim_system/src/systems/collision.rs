//! Pairwise axis-aligned collision detection and per-policy response.
//!
//! Every update tests all unordered pairs of collidable entities, O(n²).
//! A pair collides when the boxes overlap strictly on both axes. The pair
//! is then resolved along the frame's axis from the first entity's side
//! and, unless both are [`CollisionType::Slide`], from the second's too.
//!
//! Response is chosen by the acting entity's policy:
//!
//! | policy  | response                                                     |
//! |---------|--------------------------------------------------------------|
//! | SLIDE   | pushed out of the overlap; landing on a floor zeroes `vy`     |
//! | STICK   | pinned to the other entity with a [`Paired`] component       |
//! | RIGID   | none, an immovable obstacle                                  |
//! | BOUNCE  | none, not implemented                                        |

use sim_component::{
    Collision, CollisionType, ComponentKind, EntityId, Paired, Position, QueryDescriptor, Velocity,
};
use sim_math::Axis;
use sim_world::{Payload, World, WorldError};
use tracing::{debug, trace, warn};

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// Event fired for every directional resolution of a colliding pair.
pub const COLLISION_EVENT: &str = "collision";

/// Event fired when a STICK entity pins itself to another.
pub const STUCK_EVENT: &str = "stuck";

/// Detects overlapping boxes and applies each entity's response policy.
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    query: QueryDescriptor,
}

impl CollisionSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new().require(ComponentKind::Collision),
        }
    }

    /// Detect and resolve every colliding pair along `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] if attaching a pairing or firing an event
    /// fails.
    pub fn step(&self, world: &mut World, axis: Axis) -> Result<(), SystemError> {
        let entities = world.resolve(&self.query);

        for (i, &first) in entities.iter().enumerate() {
            for &second in &entities[i + 1..] {
                let (Some(a), Some(b)) = (
                    world.get::<Collision>(first).copied(),
                    world.get::<Collision>(second).copied(),
                ) else {
                    continue;
                };
                if !a.aabb.overlaps(&b.aabb) {
                    continue;
                }

                resolve(world, axis, first, second)?;
                let both_slide = a.collision_type == CollisionType::Slide
                    && b.collision_type == CollisionType::Slide;
                if !both_slide {
                    resolve(world, axis, second, first)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &str {
        "collision"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, frame: &FrameArgs) -> Result<(), SystemError> {
        let axis = frame.require_axis(self.name())?;
        self.step(world, axis)
    }
}

/// Apply `acting`'s response to its collision with `other` along `axis`.
fn resolve(
    world: &mut World,
    axis: Axis,
    acting: EntityId,
    other: EntityId,
) -> Result<(), SystemError> {
    let (Some(actor), Some(obstacle)) = (
        world.get::<Collision>(acting).copied(),
        world.get::<Collision>(other).copied(),
    ) else {
        return Ok(());
    };

    match actor.collision_type {
        CollisionType::Slide => slide(world, axis, acting, &actor, &obstacle),
        CollisionType::Stick => stick(world, acting, other)?,
        CollisionType::Rigid | CollisionType::Bounce => {
            trace!(%acting, policy = %actor.collision_type, "no response");
        }
    }

    let events = world.events().clone();
    events.fire(
        COLLISION_EVENT,
        &Payload::Collision {
            acting,
            other,
            axis,
        },
    )?;
    Ok(())
}

/// Push `acting` out of `obstacle` along `axis`.
///
/// Entering across the obstacle's low edge is checked before entering across
/// its high edge; a box already inside the obstacle's span is left alone.
/// The pushed edge is set exactly onto the obstacle's edge, so the boxes end
/// up touching and no longer overlap.
fn slide(world: &mut World, axis: Axis, acting: EntityId, actor: &Collision, obstacle: &Collision) {
    let (a_low, a_high) = actor.aabb.span(axis);
    let (b_low, b_high) = obstacle.aabb.span(axis);

    let (delta, low, high) = if a_high > b_low && a_low < b_low {
        let depth = a_high - b_low;
        (-depth, a_low - depth, b_low)
    } else if a_low < b_high && a_high > b_high {
        let depth = b_high - a_low;
        (depth, b_high, a_high + depth)
    } else {
        return;
    };

    if let Some(collision) = world.get_mut::<Collision>(acting) {
        collision.aabb.set_span(axis, low, high);
    }
    if let Some(position) = world.get_mut::<Position>(acting) {
        *position.axis_mut(axis) += delta;
    }
    // Landing on top of something stops the fall. Horizontal contact keeps
    // its velocity.
    if axis == Axis::Y
        && delta > 0.0
        && let Some(velocity) = world.get_mut::<Velocity>(acting)
    {
        velocity.vy = 0.0;
    }
    trace!(%acting, %axis, delta, "slid out of overlap");
}

/// Pin `acting` to `other` unless it is already paired.
fn stick(world: &mut World, acting: EntityId, other: EntityId) -> Result<(), SystemError> {
    if world.has(acting, ComponentKind::Paired) {
        return Ok(());
    }

    match world.attach(acting, Paired::new(other)) {
        Ok(_) => {}
        Err(WorldError::AnchorWithoutPosition(anchor)) => {
            warn!(%acting, %anchor, "cannot stick to an entity without a position");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }
    debug!(entity = %acting, anchor = %other, "stuck");

    let events = world.events().clone();
    events.fire(
        STUCK_EVENT,
        &Payload::Stuck {
            entity: acting,
            anchor: other,
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use sim_component::Component;

    use super::*;

    fn collider(x1: f64, x2: f64, y1: f64, y2: f64, policy: CollisionType) -> Component {
        Collision::new(x1, x2, y1, y2, policy).unwrap().into()
    }

    fn aabb(world: &World, e: EntityId) -> sim_math::Aabb {
        world.get::<Collision>(e).unwrap().aabb
    }

    #[test]
    fn test_two_slide_boxes_resolve_to_touching() {
        let mut world = World::new();
        let a = world
            .create([
                Position::new(5.0, 5.0).into(),
                collider(0.0, 10.0, 10.0, 0.0, CollisionType::Slide),
            ])
            .unwrap();
        let b = world
            .create([
                Position::new(13.0, 5.0).into(),
                collider(8.0, 18.0, 10.0, 0.0, CollisionType::Slide),
            ])
            .unwrap();

        let collision = CollisionSystem::new();
        collision.step(&mut world, Axis::X).unwrap();

        // Only `a` resolves: it entered from the left and moves back by 2.
        assert_eq!(aabb(&world, a).x2, aabb(&world, b).x1);
        assert_eq!(aabb(&world, a).x1, -2.0);
        assert_eq!(world.get::<Position>(a).unwrap().x, 3.0);
        assert_eq!(aabb(&world, b).x1, 8.0);

        // A second pass with no motion changes nothing.
        let before = (aabb(&world, a), aabb(&world, b));
        collision.step(&mut world, Axis::X).unwrap();
        assert_eq!((aabb(&world, a), aabb(&world, b)), before);
        assert!(!aabb(&world, a).overlaps(&aabb(&world, b)));
    }

    #[test]
    fn test_slide_resolves_from_the_right() {
        let mut world = World::new();
        let wall = world
            .create([collider(0.0, 10.0, 100.0, 0.0, CollisionType::Rigid)])
            .unwrap();
        let box_ = world
            .create([
                Position::new(12.0, 50.0).into(),
                Velocity::new(-5.0, 0.0).into(),
                collider(9.0, 15.0, 53.0, 47.0, CollisionType::Slide),
            ])
            .unwrap();

        CollisionSystem::new().step(&mut world, Axis::X).unwrap();

        assert_eq!(aabb(&world, box_).x1, aabb(&world, wall).x2);
        assert_eq!(world.get::<Position>(box_).unwrap().x, 13.0);
        // Walls do not stop horizontal velocity.
        assert_eq!(world.get::<Velocity>(box_).unwrap().vx, -5.0);
        // The rigid wall never moves.
        assert_eq!(aabb(&world, wall).x1, 0.0);
    }

    #[test]
    fn test_landing_on_floor_zeroes_vertical_velocity() {
        let mut world = World::new();
        let floor = world
            .create([collider(0.0, 480.0, 20.0, 0.0, CollisionType::Rigid)])
            .unwrap();
        let box_ = world
            .create([
                Position::new(5.0, 22.0).into(),
                Velocity::new(1.0, -3.0).into(),
                collider(0.0, 10.0, 27.0, 17.0, CollisionType::Slide),
            ])
            .unwrap();

        CollisionSystem::new().step(&mut world, Axis::Y).unwrap();

        assert_eq!(aabb(&world, box_).y2, aabb(&world, floor).y1);
        assert_eq!(world.get::<Position>(box_).unwrap().y, 25.0);
        assert_eq!(world.get::<Velocity>(box_).unwrap().vy, 0.0);
        assert_eq!(world.get::<Velocity>(box_).unwrap().vx, 1.0);
    }

    #[test]
    fn test_hitting_a_ceiling_keeps_vertical_velocity() {
        let mut world = World::new();
        let ceiling = world
            .create([collider(0.0, 100.0, 110.0, 100.0, CollisionType::Rigid)])
            .unwrap();
        let box_ = world
            .create([
                Position::new(5.0, 97.0).into(),
                Velocity::new(0.0, 4.0).into(),
                collider(0.0, 10.0, 102.0, 92.0, CollisionType::Slide),
            ])
            .unwrap();

        CollisionSystem::new().step(&mut world, Axis::Y).unwrap();

        assert_eq!(aabb(&world, box_).y1, aabb(&world, ceiling).y2);
        assert_eq!(world.get::<Position>(box_).unwrap().y, 95.0);
        assert_eq!(world.get::<Velocity>(box_).unwrap().vy, 4.0);
    }

    #[test]
    fn test_stick_attaches_exactly_one_pairing() {
        let mut world = World::new();
        let target = world
            .create([
                Position::new(250.0, 250.0).into(),
                collider(245.0, 255.0, 270.0, 220.0, CollisionType::Rigid),
            ])
            .unwrap();
        let arrow = world
            .create([
                Position::new(246.0, 240.0).into(),
                collider(246.0, 247.0, 240.0, 239.0, CollisionType::Stick),
            ])
            .unwrap();

        let collision = CollisionSystem::new();
        for _ in 0..5 {
            collision.step(&mut world, Axis::Y).unwrap();
            collision.step(&mut world, Axis::X).unwrap();
        }

        let paired = world.get::<Paired>(arrow).unwrap();
        assert_eq!(paired.anchor, target);
        assert_eq!(world.entities_with(ComponentKind::Paired).len(), 1);
        assert!(!world.has(target, ComponentKind::Paired));
        // STICK does not push the arrow out.
        assert_eq!(aabb(&world, arrow).x1, 246.0);
    }

    #[test]
    fn test_stick_to_entity_without_position_is_skipped() {
        let mut world = World::new();
        let _wall = world
            .create([collider(50.0, 51.0, 60.0, 0.0, CollisionType::Rigid)])
            .unwrap();
        let arrow = world
            .create([
                Position::new(50.5, 30.0).into(),
                collider(50.0, 51.0, 31.0, 30.0, CollisionType::Stick),
            ])
            .unwrap();

        CollisionSystem::new().step(&mut world, Axis::X).unwrap();
        assert!(!world.has(arrow, ComponentKind::Paired));
    }

    #[test]
    fn test_rigid_and_bounce_do_not_respond() {
        let mut world = World::new();
        let rigid = world
            .create([collider(0.0, 10.0, 10.0, 0.0, CollisionType::Rigid)])
            .unwrap();
        let bounce = world
            .create([
                Position::new(10.0, 5.0).into(),
                Velocity::new(-1.0, -1.0).into(),
                collider(8.0, 12.0, 7.0, 3.0, CollisionType::Bounce),
            ])
            .unwrap();

        let collision = CollisionSystem::new();
        collision.step(&mut world, Axis::X).unwrap();
        collision.step(&mut world, Axis::Y).unwrap();

        assert_eq!(aabb(&world, rigid).x2, 10.0);
        assert_eq!(aabb(&world, bounce).x1, 8.0);
        assert_eq!(world.get::<Velocity>(bounce).unwrap().vy, -1.0);
        assert_eq!(world.get::<Position>(bounce).unwrap().x, 10.0);
    }

    #[test]
    fn test_separated_boxes_are_untouched() {
        let mut world = World::new();
        let a = world
            .create([collider(0.0, 10.0, 10.0, 0.0, CollisionType::Slide)])
            .unwrap();
        let b = world
            .create([collider(10.0, 20.0, 10.0, 0.0, CollisionType::Slide)])
            .unwrap();
        CollisionSystem::new().step(&mut world, Axis::X).unwrap();
        assert_eq!(aabb(&world, a).x2, 10.0);
        assert_eq!(aabb(&world, b).x1, 10.0);
    }

    #[test]
    fn test_events_fired_per_resolution() {
        let mut world = World::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let observer = world.events().observer();
        let sink = Rc::clone(&log);
        observer.watch(COLLISION_EVENT, move |e| sink.borrow_mut().push(e.payload.clone()));
        let stuck = Rc::new(RefCell::new(0));
        let count = Rc::clone(&stuck);
        observer.watch(STUCK_EVENT, move |_| *count.borrow_mut() += 1);

        let floor = world
            .create([
                Position::default().into(),
                collider(0.0, 100.0, 20.0, 0.0, CollisionType::Rigid),
            ])
            .unwrap();
        let arrow = world
            .create([
                Position::new(5.0, 19.0).into(),
                collider(5.0, 6.0, 19.5, 18.5, CollisionType::Stick),
            ])
            .unwrap();

        CollisionSystem::new().step(&mut world, Axis::Y).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                Payload::Collision {
                    acting: floor,
                    other: arrow,
                    axis: Axis::Y
                },
                Payload::Collision {
                    acting: arrow,
                    other: floor,
                    axis: Axis::Y
                },
            ]
        );
        assert_eq!(*stuck.borrow(), 1);
    }

    #[test]
    fn test_update_requires_axis() {
        let mut world = World::new();
        let mut collision = CollisionSystem::new();
        assert!(matches!(
            collision.update(&mut world, &FrameArgs::new(0.0, 0.1)),
            Err(SystemError::MissingAxis(_))
        ));
    }
}
