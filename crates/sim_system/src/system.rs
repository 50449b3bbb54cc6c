//! The [`System`] trait.

use sim_component::QueryDescriptor;
use sim_world::World;

use crate::error::SystemError;
use crate::frame::FrameArgs;

/// A unit of per-frame simulation logic.
///
/// Each system fixes its [`QueryDescriptor`] at construction and resolves it
/// afresh on every update, so attachments made by a system earlier in the
/// frame are visible to the ones after it.
pub trait System {
    /// Human-readable system name (e.g. `"physics"`).
    fn name(&self) -> &str;

    /// The component kinds this system operates on.
    fn query(&self) -> &QueryDescriptor;

    /// Advance the system by one step.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError`] when a registry operation or event dispatch
    /// fails, or when an axis-split system receives no axis.
    fn update(&mut self, world: &mut World, frame: &FrameArgs) -> Result<(), SystemError>;
}
