//! Name, input, shooter and render components.
//!
//! These carry little or no simulation logic of their own; the input and
//! renderer collaborators read them.

/// A name tag, used by scripts to recognise entities such as `"target"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    /// The entity's display name.
    pub value: String,
}

impl Name {
    /// Create a new name component.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { value: name.into() }
    }
}

/// Marks an entity as driven by directional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub controllable: bool,
}

impl Default for Control {
    fn default() -> Self {
        Self { controllable: true }
    }
}

/// An aimable launcher: its position orbits `(x, y)` at radius `r`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shooter {
    /// Aim angle in radians.
    pub angle: f64,
    /// Pivot x.
    pub x: f64,
    /// Pivot y.
    pub y: f64,
    /// Orbit radius.
    pub r: f64,
}

impl Shooter {
    #[must_use]
    pub fn new(angle: f64, x: f64, y: f64, r: f64) -> Self {
        Self { angle, x, y, r }
    }
}

impl Default for Shooter {
    fn default() -> Self {
        Self {
            angle: 0.0,
            x: 0.0,
            y: 0.0,
            r: 20.0,
        }
    }
}

/// Presentation hints for the external renderer. Never read by simulation
/// systems.
#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    /// Sprite asset path, if any.
    pub sprite: Option<String>,
    /// Sprite size in pixels.
    pub size: Option<(u32, u32)>,
    /// Sprite pivot, relative to the sprite's top-left corner.
    pub center: Option<(f64, f64)>,
    /// Draw the position marker and collision box.
    pub debug: bool,
    pub renderable: bool,
    /// Lower priorities are drawn first.
    pub priority: i32,
}

impl Render {
    /// A debug-only render entry with no sprite.
    #[must_use]
    pub fn debug() -> Self {
        Self::default()
    }

    /// A sprite render entry.
    #[must_use]
    pub fn sprite(path: impl Into<String>) -> Self {
        Self {
            sprite: Some(path.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for Render {
    fn default() -> Self {
        Self {
            sprite: None,
            size: None,
            center: None,
            debug: true,
            renderable: true,
            priority: 0,
        }
    }
}
