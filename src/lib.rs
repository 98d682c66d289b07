//! Shipgrid - a grid canvas for watching ships move
//!
//! Core modules:
//! - `sim`: Ships, heading math, grid scale and the scene state machine
//! - `renderer`: Immediate-mode drawing through an abstract canvas
//! - `assets`: Best-effort sprite loading
//! - `platform`: Scripted native host and browser canvas host
//! - `settings`: Tunable configuration with compile-time defaults

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{InputEvent, Scene};

/// Configuration constants
pub mod consts {
    /// Grid size in cells.
    /// Some good pairs at a given scale: [12, 10] at 75, [90, 70] at 5.
    pub const GRID_WIDTH: u32 = 12;
    pub const GRID_HEIGHT: u32 = 10;

    /// Pixels between grid lines
    pub const PIXELS_PER_CELL: u32 = 75;

    pub const WRAP_DEFAULT: bool = true;
    pub const MAX_SHIPS: usize = 9;

    /// Frames between automatic advances when the timer is on
    pub const AUTO_ADVANCE_FRAMES: u32 = 30;
    /// Opacity added per frame while fading in after an advance
    pub const FADE_STEP: u8 = 15;
    /// A primary press this soon after the previous release is a double click
    pub const DOUBLE_CLICK_MS: u64 = 100;

    /// Reset places ships this many cells away from the edges
    pub const RESET_MARGIN: u32 = 2;
    /// Reset draws each velocity component from [-3, 3]
    pub const RESET_MAX_SPEED: i32 = 3;

    pub const SPRITE_PATH: &str = "images/playerShip1_orange.png";

    /// Simulated frame length for hosts without a real clock (60 Hz)
    pub const FRAME_MS: u64 = 16;
}

/// Format a coordinate the way telemetry shows it: whole numbers without a
/// fractional part, everything else as-is.
pub fn format_coord(value: f32) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coord() {
        assert_eq!(format_coord(3.0), "3");
        assert_eq!(format_coord(-2.0), "-2");
        assert_eq!(format_coord(0.0), "0");
        assert_eq!(format_coord(1.5), "1.5");
    }
}
