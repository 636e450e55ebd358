use thiserror::Error;

/// Errors that can occur while reading or writing wire primitives
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Attempted to read past the end of the incoming message
    #[error("read of {needed} bytes overruns message, only {left} bytes left")]
    ReadOutOfBounds { needed: usize, left: usize },
    /// Attempted to write past the end of the outgoing buffer
    #[error("write of {needed} bytes overflows buffer, only {space} bytes of space")]
    WriteOverflow { needed: usize, space: usize },
    /// A boolean was encoded as something other than 0 or 1
    #[error("invalid boolean byte: {0}")]
    InvalidBool(u8),
    /// A length-prefixed string did not contain valid UTF-8
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
}
