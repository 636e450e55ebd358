pub mod conditioner;
pub mod error;
pub mod memory;

pub use conditioner::{ConditionedTransport, LinkConditionerConfig};
pub use error::TransportError;
pub use memory::MemoryTransport;

/// The transport contract the engine is written against.
///
/// The core never assumes reliability, ordering, or framing beyond "one call
/// returns at most one complete message". Both calls are non-blocking;
/// simulated unreliable transports are valid implementations.
pub trait Transport: Send {
    /// Poll for the next complete incoming message, if one has arrived
    fn try_receive(&mut self) -> Option<Vec<u8>>;

    /// Queue one complete message for delivery
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}
