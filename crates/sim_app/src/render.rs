//! A renderer that logs instead of drawing.

use sim_system::{DrawCommand, Renderer};
use tracing::trace;

/// Counts presented frames and keeps the latest draw list.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    frames: u64,
    last: Vec<DrawCommand>,
}

impl TraceRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The commands of the latest frame.
    #[must_use]
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last
    }
}

impl Renderer for TraceRenderer {
    fn present(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        trace!(frame = self.frames, commands = commands.len(), "presented frame");
        self.last.clear();
        self.last.extend_from_slice(commands);
    }
}
