//! The closed set of component kinds.
//!
//! Each kind names one slot on an entity. An entity holds zero or one
//! component per kind, and the world keeps a secondary index from kind to
//! the entities filling that slot.

use std::fmt;

/// A component slot.
///
/// The discriminant doubles as an index into per-entity slot tables, so
/// lookups by kind are O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Position,
    Velocity,
    Rotation,
    Name,
    Collision,
    CustomMotion,
    Render,
    Control,
    Paired,
    Shooter,
}

impl ComponentKind {
    /// Number of distinct kinds.
    pub const COUNT: usize = 10;

    /// Every kind, in discriminant order.
    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::Position,
        ComponentKind::Velocity,
        ComponentKind::Rotation,
        ComponentKind::Name,
        ComponentKind::Collision,
        ComponentKind::CustomMotion,
        ComponentKind::Render,
        ComponentKind::Control,
        ComponentKind::Paired,
        ComponentKind::Shooter,
    ];

    /// Slot index of this kind, in `0..COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The semantic slot name, e.g. `"position"` or `"collide"`.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            ComponentKind::Position => "position",
            ComponentKind::Velocity => "velocity",
            ComponentKind::Rotation => "rotate",
            ComponentKind::Name => "name",
            ComponentKind::Collision => "collide",
            ComponentKind::CustomMotion => "motion",
            ComponentKind::Render => "render",
            ComponentKind::Control => "control",
            ComponentKind::Paired => "pair",
            ComponentKind::Shooter => "shooter",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, kind) in ComponentKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_namespaces_are_unique() {
        let mut names: Vec<_> = ComponentKind::ALL.iter().map(|k| k.namespace()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ComponentKind::COUNT);
    }

    #[test]
    fn test_display_uses_namespace() {
        assert_eq!(ComponentKind::Collision.to_string(), "collide");
        assert_eq!(ComponentKind::Paired.to_string(), "pair");
    }
}
