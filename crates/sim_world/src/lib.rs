//! # sim_world
//!
//! The single mutable context of the simulation core.
//!
//! - [`World`]: owns every entity's component slots plus the secondary
//!   index from component kind to owning entities.
//! - [`EventBus`] / [`Observer`]: synchronous publish/subscribe for named
//!   events, independent of the query path.
//! - [`WorldError`] / [`EventError`]: failures surfaced by the two.

pub mod error;
pub mod events;
pub mod world;

pub use error::{EventError, WorldError};
pub use events::{Event, EventBus, Observer, Payload};
pub use world::{EntityRef, World};
