//! # Replica Server
//! The authoritative end of the replication engine: runs the simulation at a
//! fixed tick, retains a bounded ring of past snapshots, processes client
//! commands with lag compensation, and sends each connected client a delta
//! snapshot against the basis it last acknowledged.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use replica_shared::{
        ByteReader, ByteWriter, Command, CommandMessage, ComponentKinds, EntityId, EntityStore,
        Protocol, Replicate, Serde, SerdeErr, ServerCommandProcessor, ServerSystem, Snapshot,
        SnapshotHeader, Tick, Transport,
    };
}

mod connection;
mod error;
mod events;
mod history;
mod server;
mod server_config;

pub use error::ReplicaServerError;
pub use events::ServerEvent;
pub use history::SnapshotHistory;
pub use server::{ClientKey, CommandingEntityFn, ReleaseEntityFn, ReplicationServer};
pub use server_config::ServerConfig;
