//! # sim_system
//!
//! Systems of the 2D simulation core and the contract they share.
//!
//! A [`System`] declares its required component kinds once, at
//! construction, and is driven by an external loop that calls
//! [`System::update`] exactly once per step with that frame's
//! [`FrameArgs`]. Systems never schedule themselves; the order a driver
//! calls them in is part of the simulation's behaviour:
//!
//! ```text
//! shooter / motion -> physics(y) -> collision(y) -> physics(x) -> collision(x)
//!                  -> paired -> rotate -> render -> score
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sim_component::{Collision, CollisionType, Position, Velocity};
//! use sim_math::Axis;
//! use sim_system::{CollisionSystem, FrameArgs, PhysicsSystem, System};
//! use sim_world::World;
//!
//! let mut world = World::new();
//! world
//!     .create([
//!         Position::new(5.0, 40.0).into(),
//!         Velocity::ZERO.into(),
//!         Collision::new(0.0, 10.0, 45.0, 35.0, CollisionType::Slide).unwrap().into(),
//!     ])
//!     .unwrap();
//!
//! let mut physics = PhysicsSystem::new();
//! let mut collision = CollisionSystem::new();
//! let frame = FrameArgs::new(0.0, 1.0 / 60.0);
//! for axis in Axis::RESOLUTION_ORDER {
//!     physics.update(&mut world, &frame.on_axis(axis)).unwrap();
//!     collision.update(&mut world, &frame.on_axis(axis)).unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod render;
pub mod system;
pub mod systems;

pub use config::PhysicsConfig;
pub use error::SystemError;
pub use frame::FrameArgs;
pub use input::{DirectionalInput, InputSource, ScriptedInput};
pub use render::{DrawCommand, RenderSystem, Renderer, Viewport, cartesian_to_screen, draw_list};
pub use system::System;
pub use systems::{
    CollisionSystem, CustomMotionSystem, MovementSystem, PairedSystem, PhysicsSystem,
    RotateSystem, ScoreSystem, ShooterSystem, TrajectorySystem,
};
