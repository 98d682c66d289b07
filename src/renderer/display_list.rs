//! Recording canvas
//!
//! Captures draw calls as plain data. The native host dumps it as JSON and
//! the tests inspect it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Canvas, Rgba, TextStyle};
use crate::assets::Texture;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Rect {
        center: Vec2,
        size: Vec2,
        rotation: f32,
        color: Rgba,
    },
    Texture {
        texture: u32,
        center: Vec2,
        size: Vec2,
        rotation: f32,
        alpha: u8,
    },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self, color: Rgba) {
        // Anything drawn before a clear is invisible
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, color: Rgba) {
        self.commands.push(DrawCommand::Rect {
            center,
            size,
            rotation,
            color,
        });
    }

    fn draw_texture(&mut self, texture: &Texture, center: Vec2, size: Vec2, rotation: f32, alpha: u8) {
        self.commands.push(DrawCommand::Texture {
            texture: texture.id,
            center,
            size,
            rotation,
            alpha,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style: *style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_clear_discards_earlier_commands() {
        let mut list = DisplayList::new();
        list.fill_circle(Vec2::ZERO, 1.0, colors::SHIP);
        list.clear(colors::BACKGROUND);
        assert_eq!(list.len(), 1);
        assert!(matches!(list.commands[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_json_is_tagged() {
        let mut list = DisplayList::new();
        list.fill_circle(Vec2::new(1.0, 2.0), 20.0, colors::SHIP);
        let json = list.to_json().unwrap();
        assert!(json.contains(r#""op":"circle""#), "{json}");
        assert!(json.contains("[1.0,2.0]"), "{json}");

        let parsed: DisplayList = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, list);
    }
}
