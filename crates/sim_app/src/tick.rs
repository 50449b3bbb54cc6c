//! Driver tick loop.
//!
//! Each tick runs the systems in the documented order:
//!
//! 1. Scene script (arrow firing), shooter aim, custom motion.
//! 2. For `y` then `x`: movement, physics, collision.
//! 3. Pairing, rotation, trajectory tracking.
//! 4. Render, then score.
//! 5. Advance the tick counter and simulation time.

use std::cell::Cell;
use std::rc::Rc;

use sim_math::Axis;
use sim_system::systems::collision::STUCK_EVENT;
use sim_system::{
    CollisionSystem, CustomMotionSystem, FrameArgs, InputSource, MovementSystem, PairedSystem,
    PhysicsSystem, RenderSystem, RotateSystem, ScoreSystem, ShooterSystem, System, SystemError,
    TrajectorySystem,
};
use sim_world::{Observer, Payload, World};
use tracing::{debug, info};

use crate::config::{SimConfig, TickConfig};
use crate::render::TraceRenderer;
use crate::scenario::Scene;

/// The driver's tick loop state.
pub struct TickLoop {
    /// Number of ticks run so far.
    tick_id: u64,
    /// Accumulated simulation time.
    t: f64,
    config: TickConfig,
    world: World,
    scene: Scene,
    input: Box<dyn InputSource>,
    shooter: ShooterSystem,
    motion: CustomMotionSystem,
    movement: Option<MovementSystem>,
    physics: PhysicsSystem,
    collision: CollisionSystem,
    paired: PairedSystem,
    rotate: RotateSystem,
    trajectory: TrajectorySystem,
    render: RenderSystem<TraceRenderer>,
    score: ScoreSystem,
    stuck: Rc<Cell<u64>>,
    _observer: Observer,
}

impl TickLoop {
    /// Build the configured scene and the systems that drive it.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] if the scene cannot be built.
    pub fn new(config: &SimConfig, input: Box<dyn InputSource>) -> Result<Self, SystemError> {
        let mut world = World::new();
        let scene = Scene::build(config.scenario, &mut world, config.arena, config.archery)?;
        let movement = scene
            .controlled()
            .map(|entity| MovementSystem::new(&world, entity, MovementSystem::DEFAULT_SPEED))
            .transpose()?;

        let stuck = Rc::new(Cell::new(0));
        let observer = world.events().observer();
        let count = Rc::clone(&stuck);
        observer.watch(STUCK_EVENT, move |event| {
            if let Payload::Stuck { entity, anchor } = event.payload {
                debug!(%entity, %anchor, "arrow stuck");
            }
            count.set(count.get() + 1);
        });

        Ok(Self {
            tick_id: 0,
            t: 0.0,
            config: config.tick,
            trajectory: scene.tracker(),
            world,
            scene,
            input,
            shooter: ShooterSystem::new(),
            motion: CustomMotionSystem::new(),
            movement,
            physics: PhysicsSystem::with_config(config.physics),
            collision: CollisionSystem::new(),
            paired: PairedSystem::new(),
            rotate: RotateSystem::new(),
            render: RenderSystem::new(TraceRenderer::new(), config.arena.into()),
            score: ScoreSystem::new(),
            stuck,
            _observer: observer,
        })
    }

    /// Returns the current tick counter.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Returns the accumulated simulation time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.t
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The score after the latest tick.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.last_score()
    }

    /// Number of STICK pairings observed.
    #[must_use]
    pub fn stuck_count(&self) -> u64 {
        self.stuck.get()
    }

    #[must_use]
    pub fn trajectories(&self) -> &TrajectorySystem {
        &self.trajectory
    }

    #[must_use]
    pub fn renderer(&self) -> &TraceRenderer {
        self.render.renderer()
    }

    /// Run one tick of the simulation.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] if any system fails.
    pub fn tick(&mut self) -> Result<(), SystemError> {
        let frame = FrameArgs::new(self.t, self.config.dt).with_input(self.input.poll());
        let world = &mut self.world;

        self.scene.before_tick(world, self.tick_id)?;
        self.shooter.update(world, &frame)?;
        self.motion.update(world, &frame)?;

        for axis in Axis::RESOLUTION_ORDER {
            let frame = frame.on_axis(axis);
            if let Some(movement) = &mut self.movement {
                movement.update(world, &frame)?;
            }
            self.physics.update(world, &frame)?;
            self.collision.update(world, &frame)?;
        }

        self.paired.update(world, &frame)?;
        self.rotate.update(world, &frame)?;
        self.trajectory.update(world, &frame)?;
        self.render.update(world, &frame)?;
        self.score.update(world, &frame)?;

        self.tick_id += 1;
        self.t += self.config.dt;
        debug!(tick_id = self.tick_id, t = self.t, "tick complete");
        Ok(())
    }

    /// Run the configured number of ticks, or indefinitely when
    /// `max_ticks` is 0. Returns the number of ticks run.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first [`SystemError`].
    pub fn run(&mut self) -> Result<u64, SystemError> {
        info!(
            scenario = %self.scene.scenario(),
            dt = self.config.dt,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        let mut tick_count = 0u64;
        loop {
            self.tick()?;
            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                break;
            }
        }

        info!(ticks = tick_count, score = self.score(), "tick loop complete");
        Ok(tick_count)
    }
}

#[cfg(test)]
mod tests {
    use sim_component::{Collision, ComponentKind, Paired, Position, Shooter, Velocity};
    use sim_system::{DirectionalInput, ScriptedInput};

    use super::*;
    use crate::config::ArcheryConfig;
    use crate::scenario::{FLOOR_TOP, Scenario};

    fn config(scenario: Scenario, dt: f64, max_ticks: u64) -> SimConfig {
        SimConfig {
            scenario,
            tick: TickConfig { dt, max_ticks },
            ..SimConfig::default()
        }
    }

    fn idle() -> Box<dyn InputSource> {
        Box::new(ScriptedInput::default())
    }

    #[test]
    fn test_tick_advances_counter_and_time() {
        let mut tick_loop = TickLoop::new(&config(Scenario::Collision, 0.5, 0), idle()).unwrap();
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick().unwrap();
        tick_loop.tick().unwrap();
        assert_eq!(tick_loop.tick_id(), 2);
        assert!((tick_loop.time() - 1.0).abs() < f64::EPSILON);
        assert_eq!(tick_loop.renderer().frames(), 2);
    }

    #[test]
    fn test_run_limited_ticks() {
        let mut tick_loop =
            TickLoop::new(&config(Scenario::Collision, 1.0 / 60.0, 5), idle()).unwrap();
        assert_eq!(tick_loop.run().unwrap(), 5);
        assert_eq!(tick_loop.tick_id(), 5);
    }

    #[test]
    fn test_collision_scene_box_lands_on_floor() {
        let mut tick_loop =
            TickLoop::new(&config(Scenario::Collision, 1.0 / 60.0, 600), idle()).unwrap();
        tick_loop.run().unwrap();

        let falling = tick_loop.scene().falling().unwrap();
        let world = tick_loop.world();
        assert_eq!(world.get::<Collision>(falling).unwrap().aabb.y2, FLOOR_TOP);
        assert_eq!(world.get::<Velocity>(falling).unwrap().vy, 0.0);

        let track = tick_loop.trajectories().trajectory(falling).unwrap();
        assert_eq!(track.len(), 600);
        assert_eq!(tick_loop.trajectories().trajectories().len(), 1);
    }

    #[test]
    fn test_movement_drives_controlled_target() {
        let input = ScriptedInput::default().hold(DirectionalInput::RIGHT, 10);
        let mut tick_loop =
            TickLoop::new(&config(Scenario::Collision, 1.0 / 60.0, 20), Box::new(input)).unwrap();
        tick_loop.run().unwrap();

        let target = tick_loop.scene().target();
        let position = tick_loop.world().get::<Position>(target).unwrap();
        assert_eq!(position.x, 110.0);
        assert_eq!(position.y, 100.0);
    }

    #[test]
    fn test_archery_arrows_stick() {
        let mut config = config(Scenario::Archery, 5.0 / 60.0, 90);
        config.archery = ArcheryConfig {
            fire_every: 30,
            ..ArcheryConfig::default()
        };
        let mut tick_loop = TickLoop::new(&config, idle()).unwrap();
        tick_loop.run().unwrap();

        let arrows = tick_loop.scene().arrows().to_vec();
        assert_eq!(arrows.len(), 3);
        let world = tick_loop.world();
        let first = world.get::<Paired>(arrows[0]).unwrap();
        assert_eq!(first.anchor, tick_loop.scene().floor());
        let paired = world.entities_with(ComponentKind::Paired).len() as u64;
        assert_eq!(paired, 2);
        assert_eq!(tick_loop.stuck_count(), paired);
        assert_eq!(tick_loop.score(), 0);
    }

    #[test]
    fn test_aim_input_turns_the_bow() {
        let input = ScriptedInput::default().hold(DirectionalInput::LEFT, 4);
        let mut tick_loop =
            TickLoop::new(&config(Scenario::Archery, 5.0 / 60.0, 10), Box::new(input)).unwrap();
        tick_loop.run().unwrap();

        let world = tick_loop.world();
        let bow = world
            .entities_with(ComponentKind::Shooter)
            .into_iter()
            .next()
            .unwrap();
        assert!((world.get::<Shooter>(bow).unwrap().angle - 0.45).abs() < 1e-12);
    }
}
