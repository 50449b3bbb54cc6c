//! World and event-bus error types.

use sim_component::{ComponentKind, EntityId};
use sim_math::AabbError;

/// Errors raised by entity registry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The entity is not registered in this world.
    #[error("{0} not found")]
    EntityNotFound(EntityId),

    /// A paired component names an anchor that does not exist.
    #[error("paired anchor {0} not found")]
    AnchorNotFound(EntityId),

    /// A paired component names an anchor without a position.
    #[error("paired anchor {0} must have a position component")]
    AnchorWithoutPosition(EntityId),

    /// A collision component carries an inverted box.
    #[error("invalid collision box: {0}")]
    InvalidCollisionBox(#[from] AabbError),

    /// An entity lacks a component an operation depends on.
    #[error("{entity} has no {kind} component")]
    MissingComponent {
        /// The entity that was inspected.
        entity: EntityId,
        /// The kind it was expected to hold.
        kind: ComponentKind,
    },
}

/// Errors raised while dispatching events.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// Callbacks fired nested events past the bus's depth limit.
    #[error("event '{event}' exceeded the nesting limit of {limit}")]
    RecursionLimit {
        /// The event that would have exceeded the limit.
        event: String,
        /// The configured maximum depth.
        limit: usize,
    },
}
