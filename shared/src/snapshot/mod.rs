pub mod codec;
pub mod error;
pub mod header;
pub mod snapshot;

pub use codec::{read_delta, write_delta};
pub use error::DecodeError;
pub use header::SnapshotHeader;
pub use snapshot::Snapshot;
