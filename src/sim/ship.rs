//! Ship entity: a position and a velocity on the grid

use glam::Vec2;
use rand::Rng;

use super::grid::Grid;
use super::velocity::Velocity;
use crate::assets::{LoadError, Texture};
use crate::consts::{RESET_MARGIN, RESET_MAX_SPEED};

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Position in grid units
    pub pos: Vec2,
    pub vel: Velocity,
    /// Sprite for detailed drawing; `None` falls back to a plain box
    sprite: Option<Texture>,
}

impl Ship {
    /// Build a ship from whatever the sprite load produced
    pub fn new(pos: Vec2, vel: Velocity, sprite: Result<Texture, LoadError>) -> Self {
        let sprite = match sprite {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("Ship sprite unavailable, drawing boxes instead: {}", e);
                None
            }
        };
        Self { pos, vel, sprite }
    }

    /// A ship at a random spot with a random velocity
    pub fn random(grid: &Grid, rng: &mut impl Rng, sprite: Result<Texture, LoadError>) -> Self {
        let mut ship = Self::new(Vec2::ZERO, Velocity::default(), sprite);
        ship.reset(grid, rng);
        ship
    }

    pub fn sprite(&self) -> Option<&Texture> {
        self.sprite.as_ref()
    }

    pub fn has_sprite(&self) -> bool {
        self.sprite.is_some()
    }

    /// Heading of the velocity in degrees
    pub fn angle(&self) -> f32 {
        self.vel.angle()
    }

    /// Move by one velocity step, then wrap if enabled
    pub fn advance(&mut self, grid: &Grid, wrap: bool) {
        self.pos += self.vel.as_vec2();

        if wrap {
            self.wrap_off_screen(grid);
        }
    }

    /// Send a coordinate that left the grid to the opposite edge.
    ///
    /// The coordinate lands exactly on the edge; any overshoot past the
    /// bound is dropped rather than carried over.
    pub fn wrap_off_screen(&mut self, grid: &Grid) {
        let max = grid.max();

        if self.pos.x < 0.0 {
            self.pos.x = max.x;
        } else if self.pos.x > max.x {
            self.pos.x = 0.0;
        }

        if self.pos.y < 0.0 {
            self.pos.y = max.y;
        } else if self.pos.y > max.y {
            self.pos.y = 0.0;
        }
    }

    /// Random whole-cell position away from the edges, random whole-unit velocity
    pub fn reset(&mut self, grid: &Grid, rng: &mut impl Rng) {
        let margin = RESET_MARGIN as i64;
        let x = rng.random_range(margin..=grid.width as i64 - margin);
        let y = rng.random_range(margin..=grid.height as i64 - margin);
        self.pos = Vec2::new(x as f32, y as f32);

        let dx = rng.random_range(-RESET_MAX_SPEED..=RESET_MAX_SPEED);
        let dy = rng.random_range(-RESET_MAX_SPEED..=RESET_MAX_SPEED);
        self.vel = Velocity::new(dx as f32, dy as f32);
    }

    /// Whether the ship sits exactly on `cell`
    pub fn is_at(&self, cell: Vec2) -> bool {
        self.pos == cell
    }
}
