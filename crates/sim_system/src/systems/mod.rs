//! Simulation systems.

pub mod collision;
pub mod motion;
pub mod movement;
pub mod paired;
pub mod physics;
pub mod rotate;
pub mod score;
pub mod shooter;
pub mod trajectory;

pub use collision::CollisionSystem;
pub use motion::CustomMotionSystem;
pub use movement::MovementSystem;
pub use paired::PairedSystem;
pub use physics::PhysicsSystem;
pub use rotate::RotateSystem;
pub use score::ScoreSystem;
pub use shooter::ShooterSystem;
pub use trajectory::{Trajectory, TrajectorySystem};
