//! System-layer error types.

use sim_world::{EventError, WorldError};

/// Errors that can occur while constructing or updating a system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SystemError {
    /// A registry operation failed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// Publishing a notification failed.
    #[error(transparent)]
    Event(#[from] EventError),

    /// An axis-split system was updated without an axis.
    #[error("system '{0}' must be updated with an axis")]
    MissingAxis(String),
}
