//! Grid dimensions and the grid-to-pixel scale

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A `width` x `height` grid of cells, each `pixels_per_cell` pixels wide.
///
/// Pixel space has its origin at the bottom-left corner with y pointing up,
/// the same orientation as grid space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    pub pixels_per_cell: u32,
}

impl Grid {
    pub const fn new(width: u32, height: u32, pixels_per_cell: u32) -> Self {
        Self {
            width,
            height,
            pixels_per_cell,
        }
    }

    /// Largest coordinate on each axis (inclusive)
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn scale(&self) -> f32 {
        self.pixels_per_cell as f32
    }

    /// Window size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        self.max() * self.scale()
    }

    /// Text size used for labels and telemetry
    pub fn font_size(&self) -> f32 {
        (self.pixels_per_cell / 5) as f32
    }

    pub fn to_pixels(&self, pos: Vec2) -> Vec2 {
        pos * self.scale()
    }

    /// Cell under a pixel, snapped to the cell's bottom-left corner
    pub fn cell_at(&self, pixel: Vec2) -> Vec2 {
        (pixel / self.scale()).floor()
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        let max = self.max();
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_scale() {
        let grid = Grid::new(12, 10, 75);
        assert_eq!(grid.pixel_size(), Vec2::new(900.0, 750.0));
        assert_eq!(grid.to_pixels(Vec2::new(2.0, 3.0)), Vec2::new(150.0, 225.0));
        assert_eq!(grid.font_size(), 15.0);
    }

    #[test]
    fn test_cell_at_floors() {
        let grid = Grid::new(12, 10, 75);
        assert_eq!(grid.cell_at(Vec2::new(0.0, 0.0)), Vec2::ZERO);
        assert_eq!(grid.cell_at(Vec2::new(74.9, 149.0)), Vec2::new(0.0, 1.0));
        assert_eq!(grid.cell_at(Vec2::new(75.0, 150.0)), Vec2::new(1.0, 2.0));
        assert_eq!(grid.cell_at(Vec2::new(899.0, 749.0)), Vec2::new(11.0, 9.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let grid = Grid::new(12, 10, 75);
        assert!(grid.contains(Vec2::new(0.0, 0.0)));
        assert!(grid.contains(Vec2::new(12.0, 10.0)));
        assert!(!grid.contains(Vec2::new(13.0, 5.0)));
        assert!(!grid.contains(Vec2::new(5.0, -1.0)));
    }
}
