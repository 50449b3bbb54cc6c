//! Simulation axes.

use std::fmt;

/// One of the two world axes.
///
/// Physics and collision run one axis at a time; the driver calls them for
/// [`Axis::Y`] before [`Axis::X`] each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// Horizontal axis, grows to the right.
    X,
    /// Vertical axis, grows upwards.
    Y,
}

impl Axis {
    /// Both axes in the order the simulation resolves them.
    pub const RESOLUTION_ORDER: [Axis; 2] = [Axis::Y, Axis::X];

    /// Returns the component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: glam::DVec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order_is_y_then_x() {
        assert_eq!(Axis::RESOLUTION_ORDER, [Axis::Y, Axis::X]);
    }

    #[test]
    fn test_component() {
        let v = glam::dvec2(3.0, -4.0);
        assert_eq!(Axis::X.component(v), 3.0);
        assert_eq!(Axis::Y.component(v), -4.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Y.to_string(), "y");
    }
}
