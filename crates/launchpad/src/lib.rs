//! Launchpad session for the padlink protocol crate.
//!
//! This crate owns everything around the pure codec in `padlink-core`:
//! - MIDI transport traits and a `midir` backed implementation
//! - Connect/disconnect lifecycle with at most one live connection
//! - LED output (`set_color`, `reset`)
//! - Key events republished on a broadcast channel
//! - JSON configuration and logging setup
//!
//! # Event order
//!
//! Every inbound message produces exactly two events, in order: a `Key` event
//! carrying the full key press, then either `Down` or `Up` with the button.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod transport;

pub use config::{ConfigError, ConfigManager, LaunchpadConfig};
pub use error::{SessionError, TransportError};
pub use session::{Launchpad, SessionEvent};
pub use transport::{InboundListener, InputPort, MidirInput, MidirOutput, OutputPort};

pub use padlink_core::{
    Button, ButtonType, Color, Intensity, KeyPressEvent, KeyState, MidiMessage, PadEvent,
};
