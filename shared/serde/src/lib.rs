//! # Replica Serde
//! Byte-level, little-endian serialization primitives for the replica
//! snapshot protocol: a cursor-based reader/writer pair over pre-allocated
//! buffers, and a `Serde` trait implemented for every wire primitive.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod error;
mod reader;
mod serde;
mod writer;

pub use error::SerdeErr;
pub use reader::ByteReader;
pub use serde::Serde;
pub use writer::{ByteWriter, OutgoingPacket};

/// Maximum transmission unit of a single outgoing message, in bytes.
/// An Ethernet MTU of 1500, minus IP and UDP header overhead.
pub const MTU_SIZE_BYTES: usize = 1472;
