//! # sim_math
//!
//! Math types for the 2D simulation core. Re-exports [`glam`] for vector
//! algebra and defines the spatial primitives the collision and physics
//! systems share:
//!
//! - [`Axis`]: the integration/resolution axis a system step works on.
//! - [`Aabb`]: an axis-aligned box with an inverted-y edge convention.

pub mod aabb;
pub mod axis;

// Re-export glam types for convenience.
pub use glam::{DVec2, dvec2};

pub use aabb::{Aabb, AabbError};
pub use axis::Axis;
