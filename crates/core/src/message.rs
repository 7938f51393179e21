//! Message codec.
//!
//! Builds outbound LED messages and turns inbound messages into key presses.

use serde::{Deserialize, Serialize};

use crate::address::{
    color_code, position_code, status_byte, AUTOMAP_OFFSET, AUTOMAP_STATUS, GRID_STATUS,
    ROW_STRIDE, SCENE_COLUMN,
};
use crate::error::ProtocolError;
use crate::types::{Button, Color, Intensity, KeyPressEvent, KeyState, MidiMessage};

/// All-LEDs-off message. Addresses no single button.
pub const RESET: MidiMessage = MidiMessage::new(AUTOMAP_STATUS, 0, 0);

/// Build the message that lights `button` with the given color.
pub const fn encode(button: Button, color: Color, intensity: Intensity) -> MidiMessage {
    MidiMessage::new(
        status_byte(button.kind),
        position_code(button),
        color_code(color, intensity),
    )
}

/// Decode an inbound message into the button it addresses and its state.
pub fn decode(message: MidiMessage) -> Result<KeyPressEvent, ProtocolError> {
    let MidiMessage {
        status,
        data1,
        data2,
    } = message;

    let button = match status {
        AUTOMAP_STATUS => Button::automap(data1.wrapping_sub(AUTOMAP_OFFSET)),
        // Also SCENE_STATUS. Column 8 of the grid code is the Scene button.
        GRID_STATUS => {
            let x = data1 % ROW_STRIDE;
            let y = data1 / ROW_STRIDE;
            if x == SCENE_COLUMN {
                Button::scene(y)
            } else {
                Button::grid(x, y)
            }
        }
        other => return Err(ProtocolError::UnrecognizedStatus(other)),
    };

    Ok(KeyPressEvent::new(button, KeyState::from_velocity(data2)))
}

/// One notification derived from a decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "lowercase")]
pub enum PadEvent {
    /// Every key press, with its state
    Key(KeyPressEvent),
    /// Button pressed
    Down(Button),
    /// Button released
    Up(Button),
}

impl KeyPressEvent {
    /// Notifications for this key press, in delivery order.
    ///
    /// Always the full `Key` event first, then exactly one of `Down`/`Up`.
    pub const fn events(self) -> [PadEvent; 2] {
        let edge = match self.state {
            KeyState::Down => PadEvent::Down(self.button),
            KeyState::Up => PadEvent::Up(self.button),
        };
        [PadEvent::Key(self), edge]
    }
}
