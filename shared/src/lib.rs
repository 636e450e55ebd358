//! # Replica Shared
//! Common functionality shared between the replica-server & replica-client
//! crates: the entity/component store, the delta snapshot codec, command and
//! system traits, and the transport contract.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use replica_serde::{
    ByteReader, ByteWriter, OutgoingPacket, Serde, SerdeErr, MTU_SIZE_BYTES,
};

mod bitset;
mod command;
mod component;
mod entity;
mod protocol;
mod snapshot;
mod systems;
mod transport;
mod types;
mod wrapping_number;

pub use bitset::PresenceBitset;
pub use command::{Command, CommandMessage};
pub use component::{
    component_kinds::{ComponentKind, ComponentKinds, MAX_COMPONENT_KINDS},
    component_store::{AnyComponentStore, ComponentStore},
    replicate::Replicate,
};
pub use entity::{
    entity::{Entity, EntityState},
    entity_store::EntityStore,
};
pub use protocol::Protocol;
pub use snapshot::{
    codec::{read_delta, write_delta},
    error::DecodeError,
    header::SnapshotHeader,
    snapshot::Snapshot,
};
pub use systems::{ClientPredictor, ClientSystem, ServerCommandProcessor, ServerSystem};
pub use transport::{
    conditioner::{ConditionedTransport, LinkConditionerConfig},
    error::TransportError,
    memory::MemoryTransport,
    Transport,
};
pub use types::{EntityId, Tick};
pub use wrapping_number::{sequence_greater_than, sequence_less_than, wrapping_diff};
