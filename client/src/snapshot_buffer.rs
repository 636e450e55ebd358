use std::collections::VecDeque;

use replica_shared::{
    sequence_greater_than, sequence_less_than, EntityStore, Snapshot, Tick,
};

/// Bounded buffer of received snapshots, kept in ascending wrapping tick
/// order so out-of-order arrival never disturbs interpolation pair lookup.
///
/// Insertion scans from the back: the common case is an in-order arrival
/// landing at the end. Evicted and rejected snapshots give their stores back
/// as decode scratch.
pub struct SnapshotBuffer {
    list: VecDeque<Snapshot>,
    max_len: usize,
    spare_stores: Vec<EntityStore>,
}

impl SnapshotBuffer {
    pub fn new(max_len: usize) -> Self {
        assert!(max_len > 1, "interpolation needs at least two snapshots");
        Self {
            list: VecDeque::with_capacity(max_len),
            max_len,
            spare_stores: Vec::new(),
        }
    }

    /// Insert in tick order. Returns false for a duplicate tick, which is
    /// dropped and its store recycled.
    pub fn insert(&mut self, snapshot: Snapshot) -> bool {
        let tick = snapshot.tick();
        let mut index = self.list.len();
        while index > 0 {
            let existing = self.list[index - 1].tick();
            if existing == tick {
                self.spare_stores.push(snapshot.into_store());
                return false;
            }
            if sequence_less_than(existing, tick) {
                break;
            }
            index -= 1;
        }
        self.list.insert(index, snapshot);
        if self.list.len() > self.max_len {
            if let Some(evicted) = self.list.pop_front() {
                self.spare_stores.push(evicted.into_store());
            }
        }
        true
    }

    /// The snapshot taken at exactly `tick`, if buffered
    pub fn get(&self, tick: Tick) -> Option<&EntityStore> {
        self.list
            .iter()
            .rev()
            .find(|snapshot| snapshot.tick() == tick)
            .map(|snapshot| snapshot.store())
    }

    /// The newest snapshot at or before `tick`
    pub fn at_or_before(&self, tick: Tick) -> Option<&Snapshot> {
        self.list.iter().rev().find(|snapshot| {
            snapshot.tick() == tick || sequence_less_than(snapshot.tick(), tick)
        })
    }

    /// The oldest snapshot strictly after `tick`
    pub fn first_after(&self, tick: Tick) -> Option<&Snapshot> {
        self.list
            .iter()
            .find(|snapshot| sequence_greater_than(snapshot.tick(), tick))
    }

    pub fn newest(&self) -> Option<&Snapshot> {
        self.list.back()
    }

    pub fn newest_tick(&self) -> Option<Tick> {
        self.list.back().map(|snapshot| snapshot.tick())
    }

    /// A recycled store for decoding into, if one is available
    pub fn take_spare_store(&mut self) -> Option<EntityStore> {
        self.spare_stores.pop()
    }

    /// Hand back a store whose decode failed
    pub fn return_spare_store(&mut self, store: EntityStore) {
        self.spare_stores.push(store);
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
