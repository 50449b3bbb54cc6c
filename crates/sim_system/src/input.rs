//! Directional input interface.
//!
//! Key polling belongs to the platform layer. The core only sees a
//! per-frame [`DirectionalInput`] snapshot, produced by any
//! [`InputSource`].

/// Which directional keys are held this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionalInput {
    /// No keys held.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Only the left key held.
    pub const LEFT: Self = Self {
        left: true,
        ..Self::NONE
    };

    /// Only the right key held.
    pub const RIGHT: Self = Self {
        right: true,
        ..Self::NONE
    };

    /// Only the up key held.
    pub const UP: Self = Self {
        up: true,
        ..Self::NONE
    };

    /// Only the down key held.
    pub const DOWN: Self = Self {
        down: true,
        ..Self::NONE
    };
}

/// Something that yields one input snapshot per frame.
pub trait InputSource {
    /// The snapshot for the next frame.
    fn poll(&mut self) -> DirectionalInput;
}

/// Replays a fixed sequence of snapshots, then reports no keys held.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<DirectionalInput>,
    cursor: usize,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(frames: Vec<DirectionalInput>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Hold `input` for `count` frames after the frames already scripted.
    #[must_use]
    pub fn hold(mut self, input: DirectionalInput, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(input, count));
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> DirectionalInput {
        let input = self
            .frames
            .get(self.cursor)
            .copied()
            .unwrap_or(DirectionalInput::NONE);
        self.cursor += 1;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_replays_then_goes_idle() {
        let mut input = ScriptedInput::default()
            .hold(DirectionalInput::LEFT, 2)
            .hold(DirectionalInput::UP, 1);
        assert_eq!(input.poll(), DirectionalInput::LEFT);
        assert_eq!(input.poll(), DirectionalInput::LEFT);
        assert_eq!(input.poll(), DirectionalInput::UP);
        assert_eq!(input.poll(), DirectionalInput::NONE);
        assert_eq!(input.poll(), DirectionalInput::NONE);
    }
}
