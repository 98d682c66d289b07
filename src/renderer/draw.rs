//! Scene drawing: grid, ships, telemetry, HUD and help overlay

use glam::Vec2;

use super::colors::{self, with_alpha};
use super::{Canvas, TextStyle};
use crate::format_coord;
use crate::sim::scene::OPAQUE;
use crate::sim::{Grid, Scene, Ship};

/// Grid line thickness in pixels
const THICK_LINE: f32 = 15.0;
const THIN_LINE: f32 = 5.0;

const SHIP_RADIUS: f32 = 20.0;
/// Box drawn when a ship has no sprite
const FALLBACK_SHIP_SIZE: Vec2 = Vec2::new(30.0, 100.0);

pub const CONTROLS_TEXT: &str = "CONTROLS:
A - call the advance function for all objects once

D - swap between detailed mode (draw sprite of a ship to see angles better)
    and non-detailed mode (draw point to simplify visuals)
    [without a sprite it draws a rotated 30x100 box]

W - Set ships to wrap around the screen when they advance (on or off)

T - Turn on and off the timer to automatically advance ships

Space Bar - Reset board: 1 ship at a random position and velocity on screen

Number keys - When multiple ships are on screen, chooses the ship to manipulate
              with the left mouse button or arrow keys

Arrow keys - Adjust velocity of the chosen ship
            Up and down arrows adjust velocity in the Y direction
            Left and right arrows adjust velocity in the X direction

Left Mouse Button:
        Single click - Change the ship's velocity based on the cursor's grid position
                        (Goes to bottom left corner of current grid)
        Double click - Reposition the ship to the cursor's grid position
                        (Goes to bottom left corner of current grid)

Right Mouse Button - Create a new ship at the cursor's grid position,
                     or remove the ships already there";

/// Draw a full frame
pub fn draw_scene(scene: &Scene, canvas: &mut impl Canvas) {
    let grid = scene.grid();

    canvas.clear(colors::BACKGROUND);

    // Always fully visible
    draw_layout(grid, canvas);
    draw_hud(scene, canvas);

    for (i, ship) in scene.ships().iter().enumerate() {
        draw_ship(grid, ship, scene.detailed(), scene.alpha(), canvas);
        draw_number(grid, ship, i + 1, scene.detailed(), canvas);
    }

    if scene.show_help() {
        draw_help(grid, canvas);
    }
}

/// Axes along x=0 and y=0, a thin line on every interior grid line, labelled
pub fn draw_layout(grid: &Grid, canvas: &mut impl Canvas) {
    let size = grid.pixel_size();
    let scale = grid.scale();
    let label = TextStyle::label(grid.font_size(), colors::GRID_LINE);
    let half_thick = (THICK_LINE / 2.0).floor();

    canvas.fill_rect(
        Vec2::new((size.x / 2.0).floor(), half_thick),
        Vec2::new(size.x, THICK_LINE),
        0.0,
        colors::GRID_LINE,
    );
    canvas.fill_rect(
        Vec2::new(half_thick, (size.y / 2.0).floor()),
        Vec2::new(THICK_LINE, size.y),
        0.0,
        colors::GRID_LINE,
    );

    for row in 1..grid.height {
        let y = row as f32 * scale;
        canvas.fill_rect(
            Vec2::new((size.x / 2.0).floor(), y),
            Vec2::new(size.x, THIN_LINE),
            0.0,
            colors::GRID_LINE,
        );
        canvas.draw_text(&row.to_string(), Vec2::new(THICK_LINE, y + 5.0), &label);
    }

    for col in 1..grid.width {
        let x = col as f32 * scale;
        canvas.fill_rect(
            Vec2::new(x, (size.y / 2.0).floor()),
            Vec2::new(THIN_LINE, size.y),
            0.0,
            colors::GRID_LINE,
        );
        canvas.draw_text(&col.to_string(), Vec2::new(x + 5.0, THICK_LINE), &label);
    }
}

/// Ship body plus its telemetry box
pub fn draw_ship(grid: &Grid, ship: &Ship, detailed: bool, alpha: u8, canvas: &mut impl Canvas) {
    let center = grid.to_pixels(ship.pos);

    if detailed {
        // The sprite points up; 0 degrees should point right
        let rotation = ship.angle() - 90.0;
        match ship.sprite() {
            Some(texture) => {
                let size = Vec2::new(texture.width as f32, texture.height as f32);
                canvas.draw_texture(texture, center, size, rotation, alpha);
            }
            None => {
                canvas.fill_rect(center, FALLBACK_SHIP_SIZE, rotation, with_alpha(colors::SHIP, alpha));
            }
        }
    } else {
        canvas.fill_circle(center, SHIP_RADIUS, with_alpha(colors::SHIP, alpha));
    }

    let (box_center, box_size) = telemetry_box(grid, ship, detailed);
    canvas.fill_rect(box_center, box_size, 0.0, with_alpha(colors::TELEMETRY_BOX, alpha));
    canvas.draw_text(
        &telemetry_text(ship, detailed),
        box_center,
        &TextStyle::centered(grid.font_size(), colors::TELEMETRY_TEXT, box_size.x),
    );
}

/// Position, velocity and (when detailed) heading
pub fn telemetry_text(ship: &Ship, detailed: bool) -> String {
    let mut info = format!(
        "Center: ({}, {})\nVelocity: ({}, {})",
        format_coord(ship.pos.x),
        format_coord(ship.pos.y),
        format_coord(ship.vel.dx),
        format_coord(ship.vel.dy),
    );
    if detailed {
        info.push_str(&format!("\nAngle: {:.3}", ship.angle()));
    }
    info
}

/// Center and size of a ship's telemetry box.
///
/// The box sits up and right of the ship and is pushed back inside the
/// window horizontally and below the top edge vertically.
pub fn telemetry_box(grid: &Grid, ship: &Ship, detailed: bool) -> (Vec2, Vec2) {
    let font = grid.font_size();
    let window = grid.pixel_size();
    let extra_line = if detailed { 1.0 } else { 0.0 };

    let width = font * 10.0;
    let height = font * (2.5 + extra_line);
    let half_width = (width / 2.0).floor();

    let pixel = grid.to_pixels(ship.pos);
    let offset = (grid.pixels_per_cell / 2) as f32 + font * extra_line;

    let mut x = pixel.x + offset;
    if x > window.x - half_width {
        x = window.x - half_width;
    } else if x < half_width {
        x = half_width;
    }

    let mut y = pixel.y + offset;
    if y >= window.y - height {
        y = window.y - height;
    } else if y <= 0.0 {
        y = height;
    }

    (Vec2::new(x, y), Vec2::new(width, height))
}

/// 1-based ship number drawn on the ship
fn draw_number(grid: &Grid, ship: &Ship, number: usize, detailed: bool, canvas: &mut impl Canvas) {
    let font = grid.font_size();
    let center = grid.to_pixels(ship.pos);

    if detailed {
        canvas.fill_circle(center, (font / 2.0).floor(), colors::NUMBER_DISC);
    }

    let pos = center - Vec2::new((font / 3.0).floor(), (font / 1.5).floor());
    canvas.draw_text(&number.to_string(), pos, &TextStyle::label(font, colors::NUMBER_TEXT));
}

pub fn hud_text(scene: &Scene) -> String {
    let title = |flag: bool| if flag { "On" } else { "Off" };
    format!(
        "Editing {} of {}\n Timer: {}  Wrap: {}\n Hold 'H' for help",
        scene.selected() + 1,
        scene.ships().len(),
        title(scene.auto_advance()),
        title(scene.wrap()),
    )
}

/// Status box in the top-left corner
pub fn draw_hud(scene: &Scene, canvas: &mut impl Canvas) {
    let grid = scene.grid();
    let font = grid.font_size();
    let lines = 3.0;

    let width = font * 12.0;
    let height = font * (lines + 0.5);
    let center = Vec2::new(
        (width / 1.5).floor(),
        grid.pixel_size().y - (height / 1.5).floor(),
    );

    canvas.fill_rect(center, Vec2::new(width, height), 0.0, with_alpha(colors::HUD_BOX, OPAQUE));
    canvas.draw_text(
        &hud_text(scene),
        center,
        &TextStyle::centered(font, colors::HUD_TEXT, width),
    );
}

/// Controls overlay covering most of the window
pub fn draw_help(grid: &Grid, canvas: &mut impl Canvas) {
    let window = grid.pixel_size();
    let font = grid.font_size();
    let center = (window / 2.0).floor();
    let size = (window * 0.8).floor();

    canvas.fill_rect(center, size, 0.0, colors::HELP_BOX);

    let mut style = TextStyle::centered(font, colors::HELP_TEXT, size.x);
    style.align = super::Align::Left;
    canvas.draw_text(CONTROLS_TEXT, center + Vec2::new(font * 3.0, 0.0), &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{LoadError, NoTextures, Texture, TextureLoader};
    use crate::renderer::{DisplayList, DrawCommand};
    use crate::settings::Settings;
    use crate::sim::{Command, InputEvent, Key, Velocity};

    const GRID: Grid = Grid::new(12, 10, 75);

    fn ship_at(x: f32, y: f32, dx: f32, dy: f32) -> Ship {
        Ship::new(Vec2::new(x, y), Velocity::new(dx, dy), Err(LoadError::Unavailable))
    }

    fn render(scene: &Scene) -> DisplayList {
        let mut list = DisplayList::new();
        draw_scene(scene, &mut list);
        list
    }

    #[test]
    fn test_telemetry_text() {
        let ship = ship_at(4.0, 5.0, 1.0, 1.0);
        assert_eq!(telemetry_text(&ship, false), "Center: (4, 5)\nVelocity: (1, 1)");
        assert_eq!(
            telemetry_text(&ship, true),
            "Center: (4, 5)\nVelocity: (1, 1)\nAngle: 45.000"
        );
    }

    #[test]
    fn test_telemetry_box_offset() {
        let ship = ship_at(4.0, 4.0, 0.0, 0.0);
        let (center, size) = telemetry_box(&GRID, &ship, false);
        assert_eq!(size, Vec2::new(150.0, 37.5));
        assert_eq!(center, Vec2::new(300.0 + 37.0, 300.0 + 37.0));

        let (center, size) = telemetry_box(&GRID, &ship, true);
        assert_eq!(size, Vec2::new(150.0, 52.5));
        assert_eq!(center, Vec2::new(300.0 + 52.0, 300.0 + 52.0));
    }

    #[test]
    fn test_telemetry_box_clamped_inside_window() {
        // Right edge and top edge
        let ship = ship_at(12.0, 10.0, 0.0, 0.0);
        let (center, size) = telemetry_box(&GRID, &ship, false);
        assert_eq!(center.x, 900.0 - 75.0);
        assert_eq!(center.y, 750.0 - size.y);

        // Off the left/bottom with wrap disabled
        let ship = ship_at(-3.0, -3.0, 0.0, 0.0);
        let (center, size) = telemetry_box(&GRID, &ship, false);
        assert_eq!(center.x, 75.0);
        assert_eq!(center.y, size.y);
    }

    #[test]
    fn test_layout_lines_and_labels() {
        let mut list = DisplayList::new();
        draw_layout(&GRID, &mut list);

        let rects = list
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        // Two axes, 9 interior rows, 11 interior columns
        assert_eq!(rects, 2 + 9 + 11);

        let labels: Vec<&str> = list.texts().collect();
        assert_eq!(labels.len(), 9 + 11);
        assert_eq!(labels[0], "1");
        assert_eq!(labels[8], "9");
        assert_eq!(labels[19], "11");
    }

    #[test]
    fn test_simple_mode_draws_circles() {
        let scene = Scene::new(Settings::default(), 5, Box::new(NoTextures));
        let list = render(&scene);

        assert!(matches!(list.commands[0], DrawCommand::Clear { .. }));
        let circle = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Circle { center, radius, color } => Some((*center, *radius, *color)),
                _ => None,
            })
            .unwrap();
        assert_eq!(circle.0, GRID.to_pixels(scene.ships()[0].pos));
        assert_eq!(circle.1, 20.0);
        assert_eq!(circle.2, colors::SHIP);
    }

    #[test]
    fn test_detailed_mode_without_sprite_draws_box() {
        let mut scene = Scene::new(Settings::default(), 5, Box::new(NoTextures));
        scene.apply(Command::ToggleDetail);
        let list = render(&scene);

        let expected = scene.ships()[0].angle() - 90.0;
        let fallback = list.commands.iter().any(|c| {
            matches!(c, DrawCommand::Rect { size, rotation, .. }
                if *size == FALLBACK_SHIP_SIZE && (*rotation - expected).abs() < 1e-4)
        });
        assert!(fallback);
        assert!(!list.commands.iter().any(|c| matches!(c, DrawCommand::Texture { .. })));
        assert!(list.texts().any(|t| t.contains("Angle: ")));
    }

    struct Sprite;

    impl TextureLoader for Sprite {
        fn load(&mut self, _path: &str) -> Result<Texture, LoadError> {
            Ok(Texture { id: 7, width: 99, height: 75 })
        }
    }

    #[test]
    fn test_detailed_mode_with_sprite_draws_texture() {
        let mut scene = Scene::new(Settings::default(), 5, Box::new(Sprite));
        scene.apply(Command::ToggleDetail);
        scene.apply(Command::AdvanceAll);
        let list = render(&scene);

        let texture = list.commands.iter().find_map(|c| match c {
            DrawCommand::Texture { texture, size, alpha, .. } => Some((*texture, *size, *alpha)),
            _ => None,
        });
        assert_eq!(texture, Some((7, Vec2::new(99.0, 75.0), 0)));
    }

    #[test]
    fn test_ships_numbered_in_order() {
        let mut scene = Scene::new(Settings::default(), 5, Box::new(NoTextures));
        let base = scene.ships()[0].pos;
        scene.apply(Command::ToggleShipAt(base + Vec2::X));
        scene.apply(Command::ToggleShipAt(base + Vec2::Y));
        let list = render(&scene);

        let numbers: Vec<&str> = list
            .texts()
            .filter(|t| matches!(*t, "1" | "2" | "3"))
            .collect();
        // Grid labels 1-3 appear twice (rows and columns) before the ships
        assert_eq!(&numbers[numbers.len() - 3..], ["1", "2", "3"]);
    }

    #[test]
    fn test_hud_text() {
        let mut scene = Scene::new(Settings::default(), 5, Box::new(NoTextures));
        assert_eq!(
            hud_text(&scene),
            "Editing 1 of 1\n Timer: Off  Wrap: On\n Hold 'H' for help"
        );
        scene.apply(Command::ToggleTimer);
        scene.apply(Command::ToggleWrap);
        assert!(hud_text(&scene).contains("Timer: On  Wrap: Off"));
    }

    #[test]
    fn test_hud_ignores_fade() {
        let mut scene = Scene::new(Settings::default(), 5, Box::new(NoTextures));
        scene.apply(Command::AdvanceAll);
        let list = render(&scene);
        let hud_box = list.commands.iter().any(|c| {
            matches!(c, DrawCommand::Rect { color, .. } if *color == colors::HUD_BOX)
        });
        assert!(hud_box);
    }

    #[test]
    fn test_help_overlay_only_while_held() {
        let mut scene = Scene::new(Settings::default(), 5, Box::new(NoTextures));
        assert!(!render(&scene).texts().any(|t| t.starts_with("CONTROLS")));

        scene.handle(&InputEvent::key_down(Key::H));
        let list = render(&scene);
        assert!(list.texts().last().is_some_and(|t| t.starts_with("CONTROLS")));

        scene.handle(&InputEvent::key_up(Key::H));
        assert!(!render(&scene).texts().any(|t| t.starts_with("CONTROLS")));
    }
}
