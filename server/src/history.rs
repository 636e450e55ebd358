use std::collections::VecDeque;

use replica_shared::{
    sequence_greater_than, sequence_less_than, EntityStore, Snapshot, Tick,
};

/// Bounded ring of the most recent per-tick snapshots.
///
/// Serves two lookups: the exact delta basis a client acknowledged, and the
/// nearest retained tick at or before a client's render tick for lag
/// compensation. Evicted snapshots give their store back for reuse, so a
/// saturated ring allocates nothing per tick.
pub struct SnapshotHistory {
    snapshots: VecDeque<Snapshot>,
    max_len: usize,
    spare_stores: Vec<EntityStore>,
}

impl SnapshotHistory {
    pub fn new(max_len: usize) -> Self {
        assert!(max_len > 0, "history must retain at least one snapshot");
        Self {
            snapshots: VecDeque::with_capacity(max_len),
            max_len,
            spare_stores: Vec::new(),
        }
    }

    /// Record the state of `source` as the snapshot for `tick`.
    /// Ticks must arrive in ascending wrapping order.
    pub fn push_copy(&mut self, source: &EntityStore, tick: Tick) {
        if let Some(newest) = self.newest_tick() {
            debug_assert!(sequence_greater_than(tick, newest));
        }
        let mut store = self
            .spare_stores
            .pop()
            .unwrap_or_else(|| EntityStore::new(source.kinds(), source.capacity()));
        store.copy_from(source);
        self.snapshots.push_back(Snapshot::new(store, tick));
        if self.snapshots.len() > self.max_len {
            if let Some(evicted) = self.snapshots.pop_front() {
                self.spare_stores.push(evicted.into_store());
            }
        }
    }

    /// The snapshot taken at exactly `tick`, if still retained
    pub fn get(&self, tick: Tick) -> Option<&EntityStore> {
        self.snapshots
            .iter()
            .rev()
            .find(|snapshot| snapshot.tick() == tick)
            .map(|snapshot| snapshot.store())
    }

    /// The newest retained snapshot at or before `tick`
    pub fn at_or_before(&self, tick: Tick) -> Option<&Snapshot> {
        self.snapshots.iter().rev().find(|snapshot| {
            snapshot.tick() == tick || sequence_less_than(snapshot.tick(), tick)
        })
    }

    pub fn newest_tick(&self) -> Option<Tick> {
        self.snapshots.back().map(|snapshot| snapshot.tick())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
