//! Headless scenes the driver can run.

use std::fmt;

use serde::Deserialize;
use sim_component::{
    Collision, CollisionType, Component, ComponentKind, Control, CustomMotion, EntityId, Name,
    Position, Render, Rotation, Shooter, Velocity,
};
use sim_system::TrajectorySystem;
use sim_world::{World, WorldError};
use tracing::{debug, info};

use crate::config::{ArcheryConfig, ArenaConfig};

/// Which scene to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// A bow firing arrows at a target bobbing above the floor.
    Archery,
    /// A box falling onto the floor beside a controllable obstacle.
    #[default]
    Collision,
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Archery => f.write_str("archery"),
            Scenario::Collision => f.write_str("collision"),
        }
    }
}

/// Height of the floor's top edge.
pub const FLOOR_TOP: f64 = 20.0;

/// A populated world plus the handles the driver needs each tick.
#[derive(Debug)]
pub struct Scene {
    scenario: Scenario,
    floor: EntityId,
    target: EntityId,
    bow: Option<EntityId>,
    falling: Option<EntityId>,
    arrows: Vec<EntityId>,
    archery: ArcheryConfig,
}

impl Scene {
    /// Populate `world` with `scenario`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if an entity fails validation.
    pub fn build(
        scenario: Scenario,
        world: &mut World,
        arena: ArenaConfig,
        archery: ArcheryConfig,
    ) -> Result<Self, WorldError> {
        let floor = world.create([
            Name::new("floor").into(),
            Position::default().into(),
            Collision::new(0.0, arena.width, FLOOR_TOP, 0.0, CollisionType::Rigid)?.into(),
            Render::debug().into(),
        ])?;

        let scene = match scenario {
            Scenario::Archery => {
                let target = world.create([
                    Name::new("target").into(),
                    Position::new(250.0, 250.0).into(),
                    Render::debug().into(),
                    Collision::new(245.0, 255.0, 270.0, 220.0, CollisionType::Rigid)?.into(),
                    CustomMotion::new().with_y(|t| 80.0 * t.sin()).into(),
                ])?;
                let bow = world.create([
                    Shooter::new(0.25, 1.0, 21.0, 30.0).into(),
                    Render::debug().into(),
                ])?;
                Self {
                    scenario,
                    floor,
                    target,
                    bow: Some(bow),
                    falling: None,
                    arrows: Vec::new(),
                    archery,
                }
            }
            Scenario::Collision => {
                let target = world.create([
                    Name::new("target").into(),
                    Position::new(100.0, 100.0).into(),
                    Collision::new(80.0, 120.0, 120.0, 80.0, CollisionType::Rigid)?.into(),
                    Control::default().into(),
                    Render::debug().into(),
                ])?;
                let falling = world.create([
                    Name::new("box").into(),
                    Position::new(250.0, 250.0).into(),
                    Velocity::ZERO.into(),
                    Collision::new(220.0, 270.0, 270.0, 220.0, CollisionType::Slide)?.into(),
                    Render::debug().into(),
                ])?;
                Self {
                    scenario,
                    floor,
                    target,
                    bow: None,
                    falling: Some(falling),
                    arrows: Vec::new(),
                    archery,
                }
            }
        };

        info!(%scenario, entities = world.entity_count(), "scene built");
        Ok(scene)
    }

    #[must_use]
    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    #[must_use]
    pub fn floor(&self) -> EntityId {
        self.floor
    }

    #[must_use]
    pub fn target(&self) -> EntityId {
        self.target
    }

    /// The entity keyboard movement drives, if the scene has one.
    #[must_use]
    pub fn controlled(&self) -> Option<EntityId> {
        match self.scenario {
            Scenario::Collision => Some(self.target),
            Scenario::Archery => None,
        }
    }

    /// The falling box of the collision scene.
    #[must_use]
    pub fn falling(&self) -> Option<EntityId> {
        self.falling
    }

    /// Arrows fired so far, oldest first.
    #[must_use]
    pub fn arrows(&self) -> &[EntityId] {
        &self.arrows
    }

    /// A trajectory tracker for the entities this scene cares about.
    #[must_use]
    pub fn tracker(&self) -> TrajectorySystem {
        match self.falling {
            Some(falling) => TrajectorySystem::only([falling]),
            None => TrajectorySystem::new(),
        }
    }

    /// Run the scene's script for tick `tick` before the systems update.
    ///
    /// The archery scene fires an arrow from the bow every `fire_every`
    /// ticks, starting with the first.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the arrow cannot be created.
    pub fn before_tick(&mut self, world: &mut World, tick: u64) -> Result<(), WorldError> {
        let Some(bow) = self.bow else {
            return Ok(());
        };
        let cadence = self.archery.fire_every;
        if cadence == 0 || tick % cadence != 0 {
            return Ok(());
        }
        let shooter = *world.get::<Shooter>(bow).ok_or(WorldError::MissingComponent {
            entity: bow,
            kind: ComponentKind::Shooter,
        })?;

        let arrow = world.create(arrow(&shooter, self.archery.arrow_speed)?)?;
        debug!(%arrow, angle = shooter.angle, "fired arrow");
        self.arrows.push(arrow);
        Ok(())
    }
}

/// The components of an arrow leaving `shooter`'s pivot at `speed`.
fn arrow(shooter: &Shooter, speed: f64) -> Result<[Component; 6], WorldError> {
    let (x, y) = (shooter.x, shooter.y);
    Ok([
        Name::new("arrow").into(),
        Position::new(x, y).into(),
        Velocity::new(speed * shooter.angle.cos(), speed * shooter.angle.sin()).into(),
        Rotation::following_velocity().into(),
        Collision::new(x, x + 1.0, y, y - 1.0, CollisionType::Stick)?.into(),
        Render::debug().with_priority(1).into(),
    ])
}
