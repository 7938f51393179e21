//! Protocol layer for Launchpad-style grid controllers.
//!
//! This crate translates between logical button addresses and the three-byte
//! MIDI messages the device speaks:
//! - Address codec: status bytes, position codes and color bytes
//! - Message codec: full outbound messages and decoded key presses
//!
//! # Addressing
//!
//! ```text
//! Automap (top row)  status 176, data1 = 104 + x
//! Grid (8x8)         status 144, data1 = 16 * y + x
//! Scene (right col)  status 144, data1 = 16 * y + 8
//! ```
//!
//! Grid and Scene share a status byte. Column 8 of the linear grid code is the
//! Scene button of that row, and the decoder resolves it that way.
//!
//! Everything here is pure and synchronous; no port I/O happens in this crate.

pub mod address;
pub mod error;
pub mod message;
pub mod types;

pub use address::{color_code, color_code_for_level, position_code, status_byte};
pub use error::ProtocolError;
pub use message::{decode, encode, PadEvent, RESET};
pub use types::{Button, ButtonType, Color, Intensity, KeyPressEvent, KeyState, MidiMessage};
