//! Query descriptors for system data access declarations.
//!
//! A [`QueryDescriptor`] declares which component kinds a system requires.
//! The world resolves it into the set of entities holding every one of them;
//! see `World::resolve` in `sim_world`.

use crate::kind::ComponentKind;

/// The component kinds a system requires, fixed at construction.
///
/// A descriptor with no required kinds matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDescriptor {
    required: Vec<ComponentKind>,
}

impl QueryDescriptor {
    /// Create a new empty query descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            required: Vec::new(),
        }
    }

    /// Add a required component kind. Duplicates are ignored.
    #[must_use]
    pub fn require(mut self, kind: ComponentKind) -> Self {
        if !self.required.contains(&kind) {
            self.required.push(kind);
        }
        self
    }

    /// The required kinds, in declaration order.
    #[must_use]
    pub fn required(&self) -> &[ComponentKind] {
        &self.required
    }

    /// Returns `true` if no kinds are required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    /// Returns `true` if an entity holding `kinds` satisfies this query.
    #[must_use]
    pub fn matches(&self, kinds: &[ComponentKind]) -> bool {
        !self.required.is_empty() && self.required.iter().all(|k| kinds.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_deduplicates() {
        let q = QueryDescriptor::new()
            .require(ComponentKind::Position)
            .require(ComponentKind::Velocity)
            .require(ComponentKind::Position);
        assert_eq!(
            q.required(),
            &[ComponentKind::Position, ComponentKind::Velocity]
        );
    }

    #[test]
    fn test_matches_requires_all_kinds() {
        let q = QueryDescriptor::new()
            .require(ComponentKind::Paired)
            .require(ComponentKind::Position);
        assert!(q.matches(&[
            ComponentKind::Position,
            ComponentKind::Collision,
            ComponentKind::Paired
        ]));
        assert!(!q.matches(&[ComponentKind::Position]));
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let q = QueryDescriptor::new();
        assert!(q.is_empty());
        assert!(!q.matches(&ComponentKind::ALL));
    }
}
