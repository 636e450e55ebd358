use crate::types::EntityId;

/// Lifecycle state of one entity slot.
///
/// `Creating` and `Removing` slots are invisible to iteration and id lookup
/// until the tick boundary (`EntityStore::end_update`) commits them, so
/// systems within one tick see a stable entity set regardless of the order
/// structural changes happen in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityState {
    NoEntity,
    Creating,
    Active,
    Removing,
}

/// A non-owning handle to an entity: the owning store's id plus the slot
/// index. Entities are plain values — a capability to address slots, not a
/// pointer into the store.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Entity {
    store_id: u16,
    id: EntityId,
}

impl Entity {
    pub(crate) fn new(store_id: u16, id: EntityId) -> Self {
        Self { store_id, id }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn store_id(&self) -> u16 {
        self.store_id
    }
}
