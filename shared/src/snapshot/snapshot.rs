use crate::{entity::entity_store::EntityStore, types::Tick};

/// The full entity/component state at one tick.
///
/// Immutable once produced: history rings and snapshot buffers hand out
/// shared references only. Evicted snapshots give their store back through
/// `into_store` so it can be recycled as decode scratch instead of
/// reallocated.
pub struct Snapshot {
    store: EntityStore,
    tick: Tick,
}

impl Snapshot {
    pub fn new(store: EntityStore, tick: Tick) -> Self {
        Self { store, tick }
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Reclaim the underlying store for reuse
    pub fn into_store(self) -> EntityStore {
        self.store
    }
}
