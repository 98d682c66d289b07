//! Input events and the commands they map to

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the scene reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    A,
    D,
    H,
    T,
    W,
    Up,
    Down,
    Left,
    Right,
    /// Number row 1-9
    Digit(u8),
    /// Anything else; ignored
    Other,
}

impl Key {
    /// Parse a key name ("space", "a", "up", "3", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "space" | " " => Key::Space,
            "a" => Key::A,
            "d" => Key::D,
            "h" => Key::H,
            "t" => Key::T,
            "w" => Key::W,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            other => match other.parse::<u8>() {
                Ok(n @ 1..=9) => Key::Digit(n),
                _ => return None,
            },
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held during an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Raw host input. Pointer positions are window pixels, origin bottom-left.
/// `time_ms` is the host's monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    PointerDown {
        pos: Vec2,
        button: Button,
        modifiers: Modifiers,
        time_ms: u64,
    },
    PointerUp {
        pos: Vec2,
        button: Button,
        modifiers: Modifiers,
        time_ms: u64,
    },
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        InputEvent::KeyDown {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn key_up(key: Key) -> Self {
        InputEvent::KeyUp {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn pointer_down(pos: Vec2, button: Button, time_ms: u64) -> Self {
        InputEvent::PointerDown {
            pos,
            button,
            modifiers: Modifiers::default(),
            time_ms,
        }
    }

    pub fn pointer_up(pos: Vec2, button: Button, time_ms: u64) -> Self {
        InputEvent::PointerUp {
            pos,
            button,
            modifiers: Modifiers::default(),
            time_ms,
        }
    }
}

/// A single scene mutation. Cells are grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Back to one freshly randomized ship
    Reset,
    AdvanceAll,
    ToggleDetail,
    ToggleWrap,
    ToggleTimer,
    ShowHelp(bool),
    /// Add to the selected ship's velocity
    Nudge { dx: f32, dy: f32 },
    /// Point the selected ship's velocity at a cell
    Aim(Vec2),
    /// Move the selected ship onto a cell
    Place(Vec2),
    /// Remove the ships on a cell, or add one if it is empty
    ToggleShipAt(Vec2),
    /// Select by 0-based index
    Select(usize),
}

/// Commands bound to a key press; pointer commands need scene state
pub fn key_command(key: Key) -> Option<Command> {
    let command = match key {
        Key::Space => Command::Reset,
        Key::A => Command::AdvanceAll,
        Key::D => Command::ToggleDetail,
        Key::W => Command::ToggleWrap,
        Key::T => Command::ToggleTimer,
        Key::H => Command::ShowHelp(true),
        Key::Up => Command::Nudge { dx: 0.0, dy: 1.0 },
        Key::Down => Command::Nudge { dx: 0.0, dy: -1.0 },
        Key::Right => Command::Nudge { dx: 1.0, dy: 0.0 },
        Key::Left => Command::Nudge { dx: -1.0, dy: 0.0 },
        Key::Digit(n @ 1..=9) => Command::Select(n as usize - 1),
        Key::Digit(_) | Key::Other => return None,
    };
    Some(command)
}
