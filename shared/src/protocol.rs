use std::time::Duration;

use crate::{
    component::{component_kinds::ComponentKinds, replicate::Replicate},
    entity::entity_store::EntityStore,
};

/// Everything both endpoints must agree on before exchanging a byte:
/// the component registration order, the store capacity, and the tick rate.
///
/// Built once at startup, then locked. Mutating a locked protocol is a
/// programming error and panics.
pub struct Protocol {
    pub component_kinds: ComponentKinds,
    /// Fixed entity capacity of every store built from this protocol.
    /// Must be identical on client and server — the delta codec addresses
    /// slots by index.
    pub entity_capacity: usize,
    /// The duration between each tick
    pub tick_interval: Duration,
    locked: bool,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            component_kinds: ComponentKinds::new(),
            entity_capacity: 256,
            tick_interval: Duration::from_millis(50),
            locked: false,
        }
    }
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Register a component type. Call order defines the wire slot index and
    /// must match on both endpoints.
    pub fn add_component<C: Replicate>(&mut self) -> &mut Self {
        self.check_lock();
        self.component_kinds.add_component::<C>();
        self
    }

    pub fn entity_capacity(&mut self, capacity: usize) -> &mut Self {
        self.check_lock();
        self.entity_capacity = capacity;
        self
    }

    pub fn tick_interval(&mut self, duration: Duration) -> &mut Self {
        self.check_lock();
        self.tick_interval = duration;
        self
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        let mut protocol = std::mem::take(self);
        protocol.locked = true;
        protocol
    }

    /// A fresh store sized and shaped by this protocol
    pub fn new_store(&self) -> EntityStore {
        EntityStore::new(&self.component_kinds, self.entity_capacity)
    }
}
