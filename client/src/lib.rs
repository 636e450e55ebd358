//! # Replica Client
//! The presentation end of the replication engine: buffers server snapshots,
//! renders an interpolated view a configurable delay behind the newest state,
//! and overlays client-side prediction for the entity this client commands.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use replica_shared::{
        ByteReader, ByteWriter, ClientPredictor, ClientSystem, Command, CommandMessage,
        ComponentKinds, EntityId, EntityStore, Protocol, Replicate, Serde, SerdeErr, Snapshot,
        SnapshotHeader, Tick, Transport,
    };
}

mod client;
mod client_config;
mod metrics;
mod snapshot_buffer;

pub use client::ReplicationClient;
pub use client_config::ClientConfig;
pub use metrics::ClientMetrics;
pub use snapshot_buffer::SnapshotBuffer;
