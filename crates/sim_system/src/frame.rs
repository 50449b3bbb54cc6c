//! Per-step arguments provided to systems.

use sim_math::Axis;

use crate::error::SystemError;
use crate::input::DirectionalInput;

/// Arguments the driver hands to every system on each update.
///
/// `t` is accumulated simulation time and `dt` the fixed step, both in
/// seconds. Axis-split systems (physics, collision, movement) read `axis`
/// and fail with [`SystemError::MissingAxis`] without one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameArgs {
    /// Accumulated simulation time.
    pub t: f64,
    /// Fixed frame delta.
    pub dt: f64,
    /// The axis an axis-split system should work on.
    pub axis: Option<Axis>,
    /// This frame's input snapshot.
    pub input: DirectionalInput,
}

impl FrameArgs {
    /// Create frame arguments for time `t` and step `dt`.
    #[must_use]
    pub fn new(t: f64, dt: f64) -> Self {
        Self {
            t,
            dt,
            axis: None,
            input: DirectionalInput::default(),
        }
    }

    /// The same frame, restricted to `axis`.
    #[must_use]
    pub fn on_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }

    /// The same frame, with `input` as the input snapshot.
    #[must_use]
    pub fn with_input(mut self, input: DirectionalInput) -> Self {
        self.input = input;
        self
    }

    /// The frame's axis, or [`SystemError::MissingAxis`] naming `system`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::MissingAxis`] if no axis was set.
    pub fn require_axis(&self, system: &str) -> Result<Axis, SystemError> {
        self.axis
            .ok_or_else(|| SystemError::MissingAxis(system.to_string()))
    }
}
