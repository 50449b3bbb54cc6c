//! # sim_component
//!
//! The "E" and "C" of the simulation core: what an entity is, which kinds of
//! component exist, and the plain data each kind carries.
//!
//! This crate provides:
//!
//! - [`EntityId`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: monotonically increasing ID allocator.
//! - [`ComponentKind`]: the closed set of component slots an entity can fill.
//! - [`Component`]: a tagged variant holding one component value.
//! - [`ComponentData`]: typed access from a [`Component`] to its payload.
//! - [`QueryDescriptor`]: the component kinds a system requires.

pub mod collision;
pub mod component;
pub mod entity;
pub mod kind;
pub mod motion;
pub mod pairing;
pub mod query;
pub mod spatial;
pub mod tags;

pub use collision::{Collision, CollisionType};
pub use component::{Component, ComponentData};
pub use entity::{EntityAllocator, EntityId};
pub use kind::ComponentKind;
pub use motion::{CustomMotion, MotionFn};
pub use pairing::{BoxOffsets, Paired};
pub use query::QueryDescriptor;
pub use spatial::{Position, Rotation, Velocity};
pub use tags::{Control, Name, Render, Shooter};
