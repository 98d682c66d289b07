//! Velocity and heading math

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Grid units per advance, per axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }

    /// Heading in degrees, [0, 360), 0 along +x and counter-clockwise.
    pub fn angle(&self) -> f32 {
        heading_degrees(self.dx, self.dy)
    }
}

impl From<Vec2> for Velocity {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Compass-style heading of (dx, dy) in degrees, in [0, 360).
///
/// Axis-aligned vectors are answered directly. A ship at rest reports 0.
/// Everything else takes the reference angle atan(|dy| / |dx|) and moves
/// it into the vector's quadrant.
pub fn heading_degrees(dx: f32, dy: f32) -> f32 {
    // Straight left or right (and at rest)
    if dy == 0.0 {
        return if dx >= 0.0 { 0.0 } else { 180.0 };
    }

    // Straight up or down; dx is never zero past this point
    if dx == 0.0 {
        return if dy > 0.0 { 90.0 } else { 270.0 };
    }

    let theta = (dy.abs() / dx.abs()).atan().to_degrees();
    let heading = match (dx >= 0.0, dy >= 0.0) {
        (true, true) => theta,
        (true, false) => 360.0 - theta,
        (false, true) => 180.0 - theta,
        (false, false) => 180.0 + theta,
    };

    // A vanishing theta below +x rounds to exactly 360
    if heading >= 360.0 { heading - 360.0 } else { heading }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_axis_headings() {
        assert_eq!(heading_degrees(1.0, 0.0), 0.0);
        assert_eq!(heading_degrees(-1.0, 0.0), 180.0);
        assert_eq!(heading_degrees(0.0, 1.0), 90.0);
        assert_eq!(heading_degrees(0.0, -1.0), 270.0);
    }

    #[test]
    fn test_at_rest_is_zero() {
        assert_eq!(heading_degrees(0.0, 0.0), 0.0);
        assert_eq!(Velocity::default().angle(), 0.0);
    }

    #[test]
    fn test_diagonal_quadrants() {
        assert!(approx(heading_degrees(1.0, 1.0), 45.0));
        assert!(approx(heading_degrees(-1.0, 1.0), 135.0));
        assert!(approx(heading_degrees(-1.0, -1.0), 225.0));
        assert!(approx(heading_degrees(1.0, -1.0), 315.0));
        assert!(approx(heading_degrees(3.0_f32.sqrt(), 1.0), 30.0));
        assert!(approx(heading_degrees(-1.0, -(3.0_f32.sqrt())), 240.0));
    }

    #[test]
    fn test_continuous_across_positive_x() {
        let below = heading_degrees(1.0, -0.001);
        let above = heading_degrees(1.0, 0.001);
        assert!(below > 359.9 && below < 360.0, "below = {below}");
        assert!(above > 0.0 && above < 0.1, "above = {above}");
    }

    #[test]
    fn test_continuous_across_other_axes() {
        assert!(approx(heading_degrees(0.001, 1.0), 90.0 - 0.0573));
        assert!(approx(heading_degrees(-0.001, 1.0), 90.0 + 0.0573));
        assert!(approx(heading_degrees(-1.0, 0.001), 180.0 - 0.0573));
        assert!(approx(heading_degrees(-1.0, -0.001), 180.0 + 0.0573));
        assert!(approx(heading_degrees(-0.001, -1.0), 270.0 - 0.0573));
        assert!(approx(heading_degrees(0.001, -1.0), 270.0 + 0.0573));
    }

    #[test]
    fn test_tiny_negative_dy_stays_in_range() {
        let heading = heading_degrees(1.0, -1e-30);
        assert!((0.0..360.0).contains(&heading));
    }

    proptest! {
        #[test]
        fn prop_heading_in_range(dx in -1000.0f32..1000.0, dy in -1000.0f32..1000.0) {
            let heading = heading_degrees(dx, dy);
            prop_assert!((0.0..360.0).contains(&heading), "heading({dx}, {dy}) = {heading}");
        }

        #[test]
        fn prop_matches_atan2(dx in -100.0f32..100.0, dy in -100.0f32..100.0) {
            prop_assume!(dx.abs() > 1e-3 && dy.abs() > 1e-3);
            let expected = dy.atan2(dx).to_degrees().rem_euclid(360.0);
            let heading = heading_degrees(dx, dy);
            prop_assert!((heading - expected).abs() < 1e-2, "heading({dx}, {dy}) = {heading}, atan2 = {expected}");
        }

        #[test]
        fn prop_positive_x_axis(dx in 0.0f32..1000.0) {
            prop_assert_eq!(heading_degrees(dx, 0.0), 0.0);
        }

        #[test]
        fn prop_negative_x_axis(dx in -1000.0f32..-1e-6) {
            prop_assert_eq!(heading_degrees(dx, 0.0), 180.0);
        }
    }
}
