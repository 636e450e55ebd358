use std::any::Any;

use replica_serde::{ByteReader, ByteWriter, SerdeErr};

use crate::{bitset::PresenceBitset, component::replicate::Replicate, types::EntityId};

/// Object-safe view of a `ComponentStore<T>`, used by `EntityStore` to fan
/// whole-store operations out over heterogeneous component types without
/// inspecting them.
///
/// Cross-store operations (`copy_from`, `interpolate_from`, ...) require the
/// other store to hold the same component type; a mismatch means two stores
/// were built from different registries, which is a configuration error and
/// panics.
pub trait AnyComponentStore: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn capacity(&self) -> usize;
    fn has(&self, id: EntityId) -> bool;

    /// Mark the component present, leaving any existing value untouched
    fn add_default(&mut self, id: EntityId);
    /// Reset the slot to the default value and clear presence
    fn remove(&mut self, id: EntityId);
    /// Remove every component
    fn clear(&mut self);

    /// Whole-array copy; capacities must match
    fn copy_from(&mut self, other: &dyn AnyComponentStore);
    /// Single-slot copy across possibly different stores/capacities
    fn copy_slot_from(&mut self, to: EntityId, other: &dyn AnyComponentStore, from: EntityId);
    /// Per-slot blend of `a` into `b`; presence ends up equal to `b`'s mask
    fn interpolate_from(
        &mut self,
        a: &dyn AnyComponentStore,
        b: &dyn AnyComponentStore,
        amount: f32,
    );

    /// Whether this slot differs from the same slot in a prior store.
    /// `None` (no prior store) always counts as changed.
    fn has_changed_from(&self, id: EntityId, previous: Option<&dyn AnyComponentStore>) -> bool;

    fn write_delta(&self, id: EntityId, writer: &mut ByteWriter) -> Result<(), SerdeErr>;
    fn read_delta(&mut self, id: EntityId, reader: &mut ByteReader) -> Result<(), SerdeErr>;
}

/// Dense fixed-capacity array of one component type, indexed by entity id,
/// paired with a presence bitset.
///
/// A slot's value is only meaningful while its presence bit is set; removal
/// resets the value to default so stale data never leaks into a reused slot.
pub struct ComponentStore<T: Replicate> {
    values: Vec<T>,
    presence: PresenceBitset,
}

impl<T: Replicate> ComponentStore<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: vec![T::default(); capacity],
            presence: PresenceBitset::new(capacity),
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        if self.presence.get(id as usize) {
            Some(&self.values[id as usize])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        if self.presence.get(id as usize) {
            Some(&mut self.values[id as usize])
        } else {
            None
        }
    }

    /// Idempotent: sets presence and returns the slot for mutation. Existing
    /// data is not reset — callers use this both to ensure presence and to
    /// mutate.
    pub fn add(&mut self, id: EntityId) -> &mut T {
        self.presence.set(id as usize, true);
        &mut self.values[id as usize]
    }
}

fn typed<'a, T: Replicate>(store: &'a dyn AnyComponentStore) -> &'a ComponentStore<T> {
    let Some(typed) = store.as_any().downcast_ref::<ComponentStore<T>>() else {
        panic!("component store type mismatch: stores were built from different registries");
    };
    typed
}

impl<T: Replicate> AnyComponentStore for ComponentStore<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn capacity(&self) -> usize {
        self.values.len()
    }

    fn has(&self, id: EntityId) -> bool {
        self.presence.get(id as usize)
    }

    fn add_default(&mut self, id: EntityId) {
        self.presence.set(id as usize, true);
    }

    fn remove(&mut self, id: EntityId) {
        self.values[id as usize] = T::default();
        self.presence.set(id as usize, false);
    }

    fn clear(&mut self) {
        self.values.fill(T::default());
        self.presence.clear();
    }

    fn copy_from(&mut self, other: &dyn AnyComponentStore) {
        let other = typed::<T>(other);
        assert_eq!(
            self.values.len(),
            other.values.len(),
            "ComponentStore::copy_from requires equal capacities"
        );
        self.values.clone_from_slice(&other.values);
        self.presence.copy_from(&other.presence);
    }

    fn copy_slot_from(&mut self, to: EntityId, other: &dyn AnyComponentStore, from: EntityId) {
        let other = typed::<T>(other);
        self.values[to as usize] = other.values[from as usize].clone();
        self.presence.set(to as usize, other.presence.get(from as usize));
    }

    fn interpolate_from(
        &mut self,
        a: &dyn AnyComponentStore,
        b: &dyn AnyComponentStore,
        amount: f32,
    ) {
        let a = typed::<T>(a);
        let b = typed::<T>(b);
        for index in 0..self.values.len() {
            let id = index as EntityId;
            if b.has(id) {
                // the later snapshot wins structurally; only values blend
                self.values[index] = if let Some(start) = a.get(id) {
                    start.interpolate(&b.values[index], amount)
                } else {
                    b.values[index].clone()
                };
                self.presence.set(index, true);
            } else {
                self.values[index] = T::default();
                self.presence.set(index, false);
            }
        }
    }

    fn has_changed_from(&self, id: EntityId, previous: Option<&dyn AnyComponentStore>) -> bool {
        if !self.has(id) {
            return false;
        }
        let Some(previous) = previous else {
            return true;
        };
        let previous = typed::<T>(previous);
        match previous.get(id) {
            Some(old) => *old != self.values[id as usize],
            None => true,
        }
    }

    fn write_delta(&self, id: EntityId, writer: &mut ByteWriter) -> Result<(), SerdeErr> {
        self.values[id as usize].write_delta(writer)
    }

    fn read_delta(&mut self, id: EntityId, reader: &mut ByteReader) -> Result<(), SerdeErr> {
        self.values[id as usize].read_delta(reader)
    }
}
