//! Value types shared by the address and message codecs.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Physical button zone on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    /// Main 8x8 matrix
    Grid,
    /// Side column, one button per row
    #[serde(alias = "right")]
    Scene,
    /// Top row, one button per column
    #[serde(alias = "top")]
    Automap,
}

impl ButtonType {
    /// Alternate name for the side column.
    pub const RIGHT: Self = Self::Scene;
    /// Alternate name for the top row.
    pub const TOP: Self = Self::Automap;
}

/// A logical button address.
///
/// Coordinates are not range checked. Automap buttons use `x` only, Scene
/// buttons use `y` only, Grid buttons use both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: ButtonType,
    pub x: u8,
    pub y: u8,
}

impl Button {
    pub const fn new(kind: ButtonType, x: u8, y: u8) -> Self {
        Self { kind, x, y }
    }

    pub const fn grid(x: u8, y: u8) -> Self {
        Self::new(ButtonType::Grid, x, y)
    }

    /// Scene button for a row. The column is always reported as 0.
    pub const fn scene(y: u8) -> Self {
        Self::new(ButtonType::Scene, 0, y)
    }

    pub const fn automap(x: u8) -> Self {
        Self::new(ButtonType::Automap, x, 0)
    }
}

/// LED color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Amber,
    Yellow,
    Off,
}

/// LED brightness, used as a multiplier on the color channels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low = 1,
    Medium = 2,
    #[default]
    High = 3,
}

impl Intensity {
    /// Numeric brightness level (1-3).
    pub const fn level(self) -> u8 {
        self as u8
    }
}

/// Whether a button went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyState {
    Down,
    Up,
}

impl KeyState {
    /// Any non-zero velocity is a press.
    pub const fn from_velocity(velocity: u8) -> Self {
        if velocity > 0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

impl std::fmt::Display for KeyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyState::Down => write!(f, "down"),
            KeyState::Up => write!(f, "up"),
        }
    }
}

/// Raw three byte message as it travels over the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MidiMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    pub const fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self {
            status,
            data1,
            data2,
        }
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [self.status, self.data1, self.data2]
    }
}

impl From<[u8; 3]> for MidiMessage {
    fn from([status, data1, data2]: [u8; 3]) -> Self {
        Self::new(status, data1, data2)
    }
}

impl From<MidiMessage> for [u8; 3] {
    fn from(message: MidiMessage) -> Self {
        message.to_bytes()
    }
}

impl TryFrom<&[u8]> for MidiMessage {
    type Error = ProtocolError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match *bytes {
            [status, data1, data2] => Ok(Self::new(status, data1, data2)),
            _ => Err(ProtocolError::MalformedMessage { len: bytes.len() }),
        }
    }
}

/// A decoded inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPressEvent {
    pub button: Button,
    pub state: KeyState,
}

impl KeyPressEvent {
    pub const fn new(button: Button, state: KeyState) -> Self {
        Self { button, state }
    }
}
