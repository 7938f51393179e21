//! Address codec.
//!
//! Maps logical buttons and colors onto the byte values the device expects.
//! Coordinates outside the physical layout are not rejected; they wrap into
//! whatever code the arithmetic produces.

use crate::types::{Button, ButtonType, Color, Intensity};

/// Status byte for Grid buttons (Note On, channel 1).
pub const GRID_STATUS: u8 = 0x90;
/// Status byte for Scene buttons. Shared with the grid.
pub const SCENE_STATUS: u8 = 0x90;
/// Status byte for Automap buttons (Control Change, channel 1).
pub const AUTOMAP_STATUS: u8 = 0xB0;

/// First controller number of the Automap row.
pub const AUTOMAP_OFFSET: u8 = 104;
/// Width of one row in the linear grid code.
pub const ROW_STRIDE: u8 = 16;
/// Column of the linear grid code occupied by the Scene buttons.
pub const SCENE_COLUMN: u8 = 8;

// Color bit patterns. Red lives in the low bits, green in bits 4-5.
const GREEN_BITS: u8 = 0b10000;
const RED_BITS: u8 = 0b00001;
const AMBER_BITS: u8 = 0b10001;
const YELLOW_BITS: u8 = 0b110010;

/// Status byte that must prefix any message addressing this zone.
pub const fn status_byte(kind: ButtonType) -> u8 {
    match kind {
        ButtonType::Grid => GRID_STATUS,
        ButtonType::Scene => SCENE_STATUS,
        ButtonType::Automap => AUTOMAP_STATUS,
    }
}

/// Linear position code of a button within its status byte group.
pub const fn position_code(button: Button) -> u8 {
    match button.kind {
        ButtonType::Automap => button.x.wrapping_add(AUTOMAP_OFFSET),
        ButtonType::Scene => button.y.wrapping_mul(ROW_STRIDE).wrapping_add(SCENE_COLUMN),
        ButtonType::Grid => button.y.wrapping_mul(ROW_STRIDE).wrapping_add(button.x),
    }
}

/// Velocity byte for a color at the given intensity.
pub const fn color_code(color: Color, intensity: Intensity) -> u8 {
    color_code_for_level(color, intensity.level())
}

/// Velocity byte for a color scaled by a raw brightness level.
///
/// Yellow is a fixed pattern and only honours the level as on/off. Off is
/// always zero.
pub const fn color_code_for_level(color: Color, level: u8) -> u8 {
    match color {
        Color::Green => GREEN_BITS.wrapping_mul(level),
        Color::Red => RED_BITS.wrapping_mul(level),
        Color::Amber => AMBER_BITS.wrapping_mul(level),
        Color::Yellow => {
            if level > 0 {
                YELLOW_BITS
            } else {
                0
            }
        }
        Color::Off => 0,
    }
}
