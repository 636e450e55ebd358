use replica_serde::SerdeErr;
use thiserror::Error;

use crate::types::EntityId;

/// Errors that can occur while applying a received snapshot delta
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The message was truncated or carried an invalid primitive
    #[error(transparent)]
    Serde(#[from] SerdeErr),
    /// The delta was produced for a store of a different capacity
    #[error("snapshot capacity mismatch: destination {dest}, basis {basis}")]
    CapacityMismatch { dest: usize, basis: usize },
    /// A record addressed a slot beyond the store's capacity
    #[error("entity id {id} out of range (capacity {capacity})")]
    EntityIdOutOfRange { id: EntityId, capacity: usize },
    /// A changed component's payload could not be read
    #[error("bad {name} payload for entity {id}: {source}")]
    ComponentPayload {
        id: EntityId,
        name: &'static str,
        source: SerdeErr,
    },
    /// A record's masks referenced unregistered component bits, or marked a
    /// component changed without marking it present
    #[error("malformed record for entity {id}: components {components_mask:#06x}, changed {changed_mask:#06x}")]
    MalformedRecord {
        id: EntityId,
        components_mask: u16,
        changed_mask: u16,
    },
}
