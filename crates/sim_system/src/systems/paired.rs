//! Keeps paired entities glued to their anchors.

use sim_component::{
    BoxOffsets, Collision, ComponentKind, Paired, Position, QueryDescriptor, Rotation,
};
use sim_world::World;
use tracing::{debug, warn};

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// Rebuilds each dependent's position and box from its anchor.
///
/// Offsets are frozen the first time an entity is seen (the box offsets the
/// first time it is seen with a box), so the dependent keeps its
/// capture-time placement relative to the anchor for the rest of the
/// pairing.
#[derive(Debug, Clone)]
pub struct PairedSystem {
    query: QueryDescriptor,
}

impl PairedSystem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new()
                .require(ComponentKind::Paired)
                .require(ComponentKind::Position),
        }
    }

    /// Move every paired entity to its anchor.
    pub fn step(&self, world: &mut World) {
        for entity in world.resolve(&self.query) {
            let Some(mut paired) = world.get::<Paired>(entity).copied() else {
                continue;
            };
            let Some(anchor) = world.get::<Position>(paired.anchor).map(Position::as_vec) else {
                warn!(%entity, anchor = %paired.anchor, "paired anchor has no position");
                continue;
            };
            let Some(position) = world.get::<Position>(entity).map(Position::as_vec) else {
                continue;
            };

            let offset = *paired.offset.get_or_insert_with(|| {
                let offset = anchor - position;
                debug!(%entity, anchor = %paired.anchor, ?offset, "captured pairing offset");
                offset
            });
            let placed = anchor - offset;
            if let Some(position) = world.get_mut::<Position>(entity) {
                position.x = placed.x;
                position.y = placed.y;
            }

            if let Some(collision) = world.get_mut::<Collision>(entity) {
                let offsets = *paired
                    .box_offsets
                    .get_or_insert_with(|| BoxOffsets::capture(anchor, &collision.aabb));
                collision.aabb = offsets.apply(anchor);
            }

            if world.has(entity, ComponentKind::Velocity)
                && let Some(rotation) = world.get_mut::<Rotation>(entity)
            {
                rotation.rotate_with_velocity = false;
            }

            if let Some(stored) = world.get_mut::<Paired>(entity) {
                *stored = paired;
            }
        }
    }
}

impl Default for PairedSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PairedSystem {
    fn name(&self) -> &str {
        "paired"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, _frame: &FrameArgs) -> Result<(), SystemError> {
        self.step(world);
        Ok(())
    }
}
