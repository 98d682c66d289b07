//! Immediate-mode rendering
//!
//! The scene is drawn through the `Canvas` trait, which hosts implement on
//! top of whatever they draw with. Canvas space is window pixels with the
//! origin at the bottom-left and y pointing up. Rotations are degrees,
//! counter-clockwise.

pub mod display_list;
pub mod draw;

pub use display_list::{DisplayList, DrawCommand};
pub use draw::{
    CONTROLS_TEXT, draw_help, draw_hud, draw_layout, draw_scene, draw_ship, hud_text,
    telemetry_box, telemetry_text,
};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Texture;

/// 8-bit RGBA
pub type Rgba = [u8; 4];

/// Where a text position sits relative to the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    BottomLeft,
    Center,
}

/// Horizontal alignment of lines inside the text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub size: f32,
    pub color: Rgba,
    pub anchor: Anchor,
    pub align: Align,
    /// Block width for alignment, if any
    pub width: Option<f32>,
}

impl TextStyle {
    /// Left-aligned text starting at the given point
    pub fn label(size: f32, color: Rgba) -> Self {
        Self {
            size,
            color,
            anchor: Anchor::BottomLeft,
            align: Align::Left,
            width: None,
        }
    }

    /// Text block centered on the given point
    pub fn centered(size: f32, color: Rgba, width: f32) -> Self {
        Self {
            size,
            color,
            anchor: Anchor::Center,
            align: Align::Center,
            width: Some(width),
        }
    }
}

/// Drawing primitives a host must provide
pub trait Canvas {
    fn clear(&mut self, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Filled rectangle of `size`, rotated about its center
    fn fill_rect(&mut self, center: Vec2, size: Vec2, rotation: f32, color: Rgba);
    /// Texture stretched over a rotated rectangle
    fn draw_texture(&mut self, texture: &Texture, center: Vec2, size: Vec2, rotation: f32, alpha: u8);
    /// Text, possibly several lines separated by '\n'
    fn draw_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}

/// Colors for scene elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [255, 255, 255, 255];
    pub const GRID_LINE: Rgba = [0, 0, 0, 255];
    pub const SHIP: Rgba = [255, 0, 0, 255];
    pub const TELEMETRY_BOX: Rgba = [0, 0, 255, 255];
    pub const TELEMETRY_TEXT: Rgba = [255, 255, 255, 255];
    pub const NUMBER_DISC: Rgba = [0, 0, 0, 255];
    pub const NUMBER_TEXT: Rgba = [255, 255, 255, 255];
    pub const HUD_BOX: Rgba = [0, 255, 0, 255];
    pub const HUD_TEXT: Rgba = [0, 0, 0, 255];
    pub const HELP_BOX: Rgba = [127, 127, 127, 255];
    pub const HELP_TEXT: Rgba = [0, 0, 0, 255];

    /// Same color with a different alpha
    pub const fn with_alpha(color: Rgba, alpha: u8) -> Rgba {
        [color[0], color[1], color[2], alpha]
    }
}
