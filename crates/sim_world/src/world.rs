//! World state: the entity registry and its component-kind index.
//!
//! The [`World`] is the single source of truth for simulation state. Every
//! entity owns a fixed table of component slots, one per
//! [`ComponentKind`], plus the order in which its slots were filled. A
//! secondary index maps each kind to the entities currently holding it, so
//! queries are set intersections rather than scans.

use std::collections::{BTreeSet, HashMap};

use sim_component::{
    Component, ComponentData, ComponentKind, EntityAllocator, EntityId, Paired, Position,
    QueryDescriptor,
};
use tracing::debug;

use crate::error::WorldError;
use crate::events::EventBus;

/// Per-entity component storage.
#[derive(Debug, Clone)]
struct EntityRecord {
    /// One slot per kind, indexed by [`ComponentKind::index`].
    slots: [Option<Component>; ComponentKind::COUNT],
    /// Kinds currently filled, in the order they were attached.
    order: Vec<ComponentKind>,
}

impl EntityRecord {
    fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            order: Vec::new(),
        }
    }

    fn slot(&self, kind: ComponentKind) -> Option<&Component> {
        self.slots[kind.index()].as_ref()
    }

    fn slot_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.slots[kind.index()].as_mut()
    }

    /// Fill the component's slot, returning the previous occupant. A
    /// replaced kind moves to the end of the attach order.
    fn insert(&mut self, component: Component) -> Option<Component> {
        let kind = component.kind();
        let previous = self.slots[kind.index()].replace(component);
        self.order.retain(|&k| k != kind);
        self.order.push(kind);
        previous
    }

    fn remove(&mut self, kind: ComponentKind) -> Option<Component> {
        let removed = self.slots[kind.index()].take();
        if removed.is_some() {
            self.order.retain(|&k| k != kind);
        }
        removed
    }
}

/// A read-only view of one entity.
#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'w> {
    id: EntityId,
    record: &'w EntityRecord,
}

impl<'w> EntityRef<'w> {
    /// The entity's identifier.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns `true` if the entity holds a component of `kind`.
    #[must_use]
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.record.slot(kind).is_some()
    }

    /// Borrow the entity's component of type `T`.
    #[must_use]
    pub fn get<T: ComponentData>(&self) -> Option<&'w T> {
        self.record.slot(T::KIND).and_then(T::from_ref)
    }

    /// The kinds the entity holds, in attach order.
    #[must_use]
    pub fn kinds(&self) -> &'w [ComponentKind] {
        &self.record.order
    }

    /// The entity's components, in attach order.
    pub fn components(self) -> impl Iterator<Item = &'w Component> {
        let record = self.record;
        record.order.iter().filter_map(move |&k| record.slot(k))
    }
}

/// The canonical simulation state.
///
/// Contains entity allocation, per-entity component slots, the kind index,
/// and the event bus systems publish notifications on.
#[derive(Debug)]
pub struct World {
    /// Entity ID allocator.
    allocator: EntityAllocator,
    /// Component storage for every live entity.
    entities: HashMap<EntityId, EntityRecord>,
    /// Maps each component kind to the entities holding it.
    index: HashMap<ComponentKind, BTreeSet<EntityId>>,
    /// Bus shared with observers outside the world.
    events: EventBus,
}

impl World {
    /// Create a new empty world with its own event bus.
    #[must_use]
    pub fn new() -> Self {
        Self::with_events(EventBus::new())
    }

    /// Create a new empty world publishing on `events`.
    #[must_use]
    pub fn with_events(events: EventBus) -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: HashMap::new(),
            index: HashMap::new(),
            events,
        }
    }

    /// The world's event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Allocate a new entity and attach `components` in order.
    ///
    /// Every component is validated before the entity is registered, so a
    /// failure leaves the world untouched. If two components share a kind,
    /// the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCollisionBox`] for an inverted collision
    /// box, or [`WorldError::AnchorNotFound`] /
    /// [`WorldError::AnchorWithoutPosition`] for a bad pairing.
    pub fn create<I>(&mut self, components: I) -> Result<EntityId, WorldError>
    where
        I: IntoIterator<Item = Component>,
    {
        let components: Vec<Component> = components.into_iter().collect();
        for component in &components {
            self.validate(component)?;
        }

        let entity = self.allocator.allocate();
        let mut record = EntityRecord::new();
        for component in components {
            let kind = component.kind();
            record.insert(component);
            self.index.entry(kind).or_default().insert(entity);
        }

        debug!(%entity, kinds = ?record.order, "created entity");
        self.entities.insert(entity, record);
        Ok(entity)
    }

    /// Attach `component` to `entity`, replacing and returning any component
    /// already in that slot.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] for an unknown entity, or the
    /// same validation errors as [`World::create`].
    pub fn attach(
        &mut self,
        entity: EntityId,
        component: impl Into<Component>,
    ) -> Result<Option<Component>, WorldError> {
        let component = component.into();
        if !self.entities.contains_key(&entity) {
            return Err(WorldError::EntityNotFound(entity));
        }
        self.validate(&component)?;

        let kind = component.kind();
        let record = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let previous = record.insert(component);
        self.index.entry(kind).or_default().insert(entity);

        debug!(%entity, %kind, replaced = previous.is_some(), "attached component");
        Ok(previous)
    }

    /// Remove the component of `kind` from `entity`, dropping it from the
    /// kind index. Returns `None` if the entity or the component is absent.
    pub fn detach(&mut self, entity: EntityId, kind: ComponentKind) -> Option<Component> {
        let removed = self.entities.get_mut(&entity)?.remove(kind)?;
        if let Some(bucket) = self.index.get_mut(&kind) {
            bucket.remove(&entity);
            if bucket.is_empty() {
                self.index.remove(&kind);
            }
        }
        debug!(%entity, %kind, "detached component");
        Some(removed)
    }

    /// Look up an entity.
    #[must_use]
    pub fn entity(&self, entity: EntityId) -> Option<EntityRef<'_>> {
        self.entities
            .get(&entity)
            .map(|record| EntityRef { id: entity, record })
    }

    /// Returns `true` if `entity` is registered.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Returns `true` if `entity` holds a component of `kind`.
    #[must_use]
    pub fn has(&self, entity: EntityId, kind: ComponentKind) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|record| record.slot(kind).is_some())
    }

    /// Borrow `entity`'s component of type `T`.
    #[must_use]
    pub fn get<T: ComponentData>(&self, entity: EntityId) -> Option<&T> {
        self.entities
            .get(&entity)?
            .slot(T::KIND)
            .and_then(T::from_ref)
    }

    /// Mutably borrow `entity`'s component of type `T`.
    #[must_use]
    pub fn get_mut<T: ComponentData>(&mut self, entity: EntityId) -> Option<&mut T> {
        self.entities
            .get_mut(&entity)?
            .slot_mut(T::KIND)
            .and_then(T::from_mut)
    }

    /// The entities holding a component of `kind`. Empty if there are none.
    #[must_use]
    pub fn entities_with(&self, kind: ComponentKind) -> BTreeSet<EntityId> {
        self.index.get(&kind).cloned().unwrap_or_default()
    }

    /// The entities holding every kind `query` requires, in ascending ID
    /// order. A query with no required kinds matches nothing.
    ///
    /// The result is computed fresh on each call, so components attached or
    /// detached earlier in a frame are visible to later systems.
    #[must_use]
    pub fn resolve(&self, query: &QueryDescriptor) -> Vec<EntityId> {
        let mut buckets = Vec::with_capacity(query.required().len());
        for kind in query.required() {
            match self.index.get(kind) {
                Some(bucket) => buckets.push(bucket),
                None => return Vec::new(),
            }
        }
        buckets.sort_by_key(|bucket| bucket.len());

        let Some((smallest, rest)) = buckets.split_first() else {
            return Vec::new();
        };
        smallest
            .iter()
            .copied()
            .filter(|entity| rest.iter().all(|bucket| bucket.contains(entity)))
            .collect()
    }

    /// Returns the number of registered entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Construction-time checks shared by [`World::create`] and
    /// [`World::attach`].
    fn validate(&self, component: &Component) -> Result<(), WorldError> {
        match component {
            Component::Collision(collision) => collision.aabb.validate()?,
            Component::Paired(Paired { anchor, .. }) => {
                let anchor_entity = self
                    .entities
                    .get(anchor)
                    .ok_or(WorldError::AnchorNotFound(*anchor))?;
                if anchor_entity.slot(Position::KIND).is_none() {
                    return Err(WorldError::AnchorWithoutPosition(*anchor));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
