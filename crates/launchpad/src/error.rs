use thiserror::Error;

/// Errors raised by a MIDI transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("MIDI init error: {0}")]
    Init(#[from] midir::InitError),

    #[error("Failed to connect MIDI port: {0}")]
    Connect(String),

    #[error("Failed to send MIDI message: {0}")]
    Send(String),

    #[error("No MIDI port at index {0}")]
    InvalidPort(usize),

    #[error("MIDI port is not open")]
    NotOpen,

    #[error("MIDI port is already open")]
    AlreadyOpen,
}

/// Errors raised by the Launchpad session lifecycle.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot connect: already connected to Launchpad")]
    AlreadyConnected,

    #[error("Cannot disconnect: no active connection to Launchpad")]
    NotConnected,

    #[error("No MIDI port matching '{0}' found")]
    DeviceNotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
