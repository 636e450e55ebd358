use std::sync::atomic::{AtomicU16, Ordering};

use crate::{
    component::{
        component_kinds::ComponentKinds,
        component_store::{AnyComponentStore, ComponentStore},
        replicate::Replicate,
    },
    entity::entity::{Entity, EntityState},
    types::EntityId,
};

static NEXT_STORE_ID: AtomicU16 = AtomicU16::new(0);

/// Fixed-capacity table of entity lifecycle states plus one component store
/// per registered kind.
///
/// Structural mutation is deferred: `try_create_entity` and `remove_entity`
/// take effect for lookup/iteration only when `end_update` commits the tick.
/// Capacity is fixed for the store's lifetime and ids are slot indices.
pub struct EntityStore {
    store_id: u16,
    kinds: ComponentKinds,
    states: Vec<EntityState>,
    stores: Vec<Box<dyn AnyComponentStore>>,
    updating: bool,
}

impl EntityStore {
    /// Build an empty store for the given registry and capacity.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero or exceeds the u16 id range.
    pub fn new(kinds: &ComponentKinds, capacity: usize) -> Self {
        assert!(capacity > 0, "EntityStore capacity must be non-zero");
        assert!(
            capacity <= u16::MAX as usize,
            "EntityStore capacity exceeds the u16 entity id range"
        );
        Self {
            store_id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            kinds: kinds.clone(),
            states: vec![EntityState::NoEntity; capacity],
            stores: kinds.make_stores(capacity),
            updating: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.states.len()
    }

    pub fn store_id(&self) -> u16 {
        self.store_id
    }

    pub fn kinds(&self) -> &ComponentKinds {
        &self.kinds
    }

    /// Handle for an entity slot in this store
    pub fn entity(&self, id: EntityId) -> Entity {
        Entity::new(self.store_id, id)
    }

    // Lifecycle

    /// Allocate the first free slot, if any. The new entity stays invisible
    /// to lookup and iteration until the next `end_update`. Exhaustion is a
    /// normal condition reported through `None`, never fatal.
    pub fn try_create_entity(&mut self) -> Option<EntityId> {
        for index in 0..self.states.len() {
            if self.states[index] == EntityState::NoEntity {
                self.states[index] = EntityState::Creating;
                return Some(index as EntityId);
            }
        }
        None
    }

    /// Mark an entity for removal. Its components are reset immediately, so
    /// systems later in the same tick observe it as componentless; the slot
    /// itself is freed at the next `end_update`. Removing twice in one tick
    /// is idempotent.
    pub fn remove_entity(&mut self, id: EntityId) {
        match self.states[id as usize] {
            EntityState::Active => {
                self.reset_components(id);
                self.states[id as usize] = EntityState::Removing;
            }
            EntityState::Creating => {
                // never became visible; free the slot right away
                self.reset_components(id);
                self.states[id as usize] = EntityState::NoEntity;
            }
            EntityState::Removing | EntityState::NoEntity => {}
        }
    }

    /// Whether the slot holds a committed, visible entity
    pub fn has_entity(&self, id: EntityId) -> bool {
        (id as usize) < self.states.len() && self.states[id as usize] == EntityState::Active
    }

    /// Active entity ids, ascending
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == EntityState::Active)
            .map(|(index, _)| index as EntityId)
    }

    /// Open the tick's update bracket
    pub fn begin_update(&mut self) {
        debug_assert!(!self.updating, "begin_update called twice without end_update");
        self.updating = true;
    }

    /// Commit deferred structural changes: `Creating` slots become `Active`,
    /// `Removing` slots become free.
    pub fn end_update(&mut self) {
        self.updating = false;
        for state in self.states.iter_mut() {
            match *state {
                EntityState::Creating => *state = EntityState::Active,
                EntityState::Removing => *state = EntityState::NoEntity,
                _ => {}
            }
        }
    }

    // Typed component access. All of these panic on an unregistered type:
    // that is a startup configuration mistake, not a runtime condition.

    pub fn has_component<C: Replicate>(&self, id: EntityId) -> bool {
        self.stores[self.kinds.index_of::<C>()].has(id)
    }

    pub fn component<C: Replicate>(&self, id: EntityId) -> Option<&C> {
        self.typed_store::<C>().get(id)
    }

    pub fn component_mut<C: Replicate>(&mut self, id: EntityId) -> Option<&mut C> {
        self.typed_store_mut::<C>().get_mut(id)
    }

    /// Ensure the component is present and return it for mutation.
    /// Idempotent; existing data is not reset.
    pub fn add_component<C: Replicate>(&mut self, id: EntityId) -> &mut C {
        self.typed_store_mut::<C>().add(id)
    }

    pub fn remove_component<C: Replicate>(&mut self, id: EntityId) {
        let index = self.kinds.index_of::<C>();
        self.stores[index].remove(id);
    }

    fn typed_store<C: Replicate>(&self) -> &ComponentStore<C> {
        let index = self.kinds.index_of::<C>();
        let Some(store) = self.stores[index].as_any().downcast_ref() else {
            panic!("component store downcast failed for a registered type");
        };
        store
    }

    fn typed_store_mut<C: Replicate>(&mut self) -> &mut ComponentStore<C> {
        let index = self.kinds.index_of::<C>();
        let Some(store) = self.stores[index].as_any_mut().downcast_mut() else {
            panic!("component store downcast failed for a registered type");
        };
        store
    }

    // Whole-store operations, fanned out per component store in
    // registration order.

    /// Copy states and every component array from `other`.
    ///
    /// # Panics
    ///
    /// Panics when capacities or registries differ.
    pub fn copy_from(&mut self, other: &EntityStore) {
        assert_eq!(
            self.capacity(),
            other.capacity(),
            "EntityStore::copy_from requires equal capacities"
        );
        assert_eq!(
            self.stores.len(),
            other.stores.len(),
            "EntityStore::copy_from requires identical registries"
        );
        self.states.copy_from_slice(&other.states);
        for (store, other_store) in self.stores.iter_mut().zip(other.stores.iter()) {
            store.copy_from(other_store.as_ref());
        }
    }

    /// Single-slot copy across possibly different stores/capacities: the
    /// state and every component of `other[from]` overwrite `self[to]`.
    pub fn copy_entity_from(&mut self, to: EntityId, other: &EntityStore, from: EntityId) {
        assert_eq!(
            self.stores.len(),
            other.stores.len(),
            "EntityStore::copy_entity_from requires identical registries"
        );
        self.states[to as usize] = other.states[from as usize];
        for (store, other_store) in self.stores.iter_mut().zip(other.stores.iter()) {
            store.copy_slot_from(to, other_store.as_ref(), from);
        }
    }

    /// Blend `a` and `b` into this store. Structure (entity states, presence
    /// masks) always comes from `b`, the later snapshot; only component
    /// values are interpolated.
    pub fn interpolate_from(&mut self, a: &EntityStore, b: &EntityStore, amount: f32) {
        assert_eq!(
            self.capacity(),
            b.capacity(),
            "EntityStore::interpolate_from requires equal capacities"
        );
        assert_eq!(
            a.capacity(),
            b.capacity(),
            "EntityStore::interpolate_from requires equal capacities"
        );
        self.states.copy_from_slice(&b.states);
        for index in 0..self.stores.len() {
            self.stores[index].interpolate_from(a.stores[index].as_ref(), b.stores[index].as_ref(), amount);
        }
    }

    /// Clear every slot back to `NoEntity` with default components, making
    /// a recycled store safe to decode into.
    pub fn reset(&mut self) {
        self.states.fill(EntityState::NoEntity);
        for store in self.stores.iter_mut() {
            store.clear();
        }
    }

    // Codec internals. Decoding is authoritative: it bypasses the deferred
    // commit and writes committed states directly.

    pub(crate) fn state(&self, id: EntityId) -> EntityState {
        self.states[id as usize]
    }

    pub(crate) fn force_active(&mut self, id: EntityId) {
        self.states[id as usize] = EntityState::Active;
    }

    pub(crate) fn force_clear(&mut self, id: EntityId) {
        self.reset_components(id);
        self.states[id as usize] = EntityState::NoEntity;
    }

    pub(crate) fn kind_count(&self) -> usize {
        self.stores.len()
    }

    pub(crate) fn store_at(&self, index: usize) -> &dyn AnyComponentStore {
        self.stores[index].as_ref()
    }

    pub(crate) fn store_at_mut(&mut self, index: usize) -> &mut dyn AnyComponentStore {
        self.stores[index].as_mut()
    }

    fn reset_components(&mut self, id: EntityId) {
        for store in self.stores.iter_mut() {
            store.remove(id);
        }
    }
}
