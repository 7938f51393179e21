use thiserror::Error;

/// Errors produced while decoding inbound device messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Unrecognised keypress status byte: {0}")]
    UnrecognizedStatus(u8),

    #[error("Expected a 3 byte message, got {len} bytes")]
    MalformedMessage { len: usize },
}
