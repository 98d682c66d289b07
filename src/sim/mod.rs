//! Scene simulation
//!
//! Everything here is pure state: no drawing, no platform calls, no clock
//! reads. Time only arrives through input event timestamps and `Scene::frame`.

pub mod grid;
pub mod input;
pub mod scene;
pub mod ship;
pub mod velocity;

pub use grid::Grid;
pub use input::{Button, Command, InputEvent, Key, Modifiers, key_command};
pub use scene::{OPAQUE, Scene};
pub use ship::Ship;
pub use velocity::{Velocity, heading_degrees};
