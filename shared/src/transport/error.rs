use thiserror::Error;

/// Errors a transport implementation may surface on send
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The payload exceeds what the transport can carry in one message
    #[error("message of {size} bytes exceeds the transport limit of {limit}")]
    MessageTooLarge { size: usize, limit: usize },
    /// The remote endpoint is gone
    #[error("remote endpoint disconnected")]
    Disconnected,
}
