//! Position history recording.

use std::collections::{BTreeMap, BTreeSet};

use sim_component::{ComponentKind, EntityId, Position, QueryDescriptor};
use sim_world::World;

use crate::error::SystemError;
use crate::frame::FrameArgs;
use crate::system::System;

/// The recorded x and y samples of one entity, one pair per update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Trajectory {
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// The most recent sample.
    #[must_use]
    pub fn last(&self) -> Option<(f64, f64)> {
        Some((*self.xs.last()?, *self.ys.last()?))
    }
}

/// Appends every tracked entity's position to its trajectory each update.
#[derive(Debug, Clone)]
pub struct TrajectorySystem {
    query: QueryDescriptor,
    only: Option<BTreeSet<EntityId>>,
    trajectories: BTreeMap<EntityId, Trajectory>,
}

impl TrajectorySystem {
    /// Track every entity with a position.
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: QueryDescriptor::new().require(ComponentKind::Position),
            only: None,
            trajectories: BTreeMap::new(),
        }
    }

    /// Track only the given entities.
    #[must_use]
    pub fn only(entities: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            only: Some(entities.into_iter().collect()),
            ..Self::new()
        }
    }

    pub fn step(&mut self, world: &World) {
        for entity in world.resolve(&self.query) {
            if let Some(only) = &self.only
                && !only.contains(&entity)
            {
                continue;
            }
            let Some(position) = world.get::<Position>(entity) else {
                continue;
            };
            let trajectory = self.trajectories.entry(entity).or_default();
            trajectory.xs.push(position.x);
            trajectory.ys.push(position.y);
        }
    }

    #[must_use]
    pub fn trajectory(&self, entity: EntityId) -> Option<&Trajectory> {
        self.trajectories.get(&entity)
    }

    /// All recorded trajectories, by entity.
    #[must_use]
    pub fn trajectories(&self) -> &BTreeMap<EntityId, Trajectory> {
        &self.trajectories
    }
}

impl Default for TrajectorySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for TrajectorySystem {
    fn name(&self) -> &str {
        "trajectory"
    }

    fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    fn update(&mut self, world: &mut World, _frame: &FrameArgs) -> Result<(), SystemError> {
        self.step(world);
        Ok(())
    }
}
