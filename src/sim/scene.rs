//! Scene controller
//!
//! Owns the ships and turns input events into ship edits. Every event is
//! applied synchronously; drawing reads the scene through accessors.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::Grid;
use super::input::{Button, Command, InputEvent, Key, key_command};
use super::ship::Ship;
use super::velocity::Velocity;
use crate::assets::TextureLoader;
use crate::settings::Settings;

pub const OPAQUE: u8 = 255;

pub struct Scene {
    settings: Settings,
    grid: Grid,
    /// Insertion order is display and numbering order
    ships: Vec<Ship>,
    /// Index of the ship edited by arrows and clicks; always < ships.len()
    selected: usize,

    detailed: bool,
    wrap: bool,
    auto_advance: bool,
    /// Frames until the next automatic advance
    advance_countdown: u32,
    show_help: bool,

    /// Opacity for ships, rises back to opaque after an advance
    alpha: u8,
    /// Time of the last primary button release, for double clicks
    last_release_ms: Option<u64>,
    frame_count: u64,

    rng: Pcg32,
    textures: Box<dyn TextureLoader>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("grid", &self.grid)
            .field("ships", &self.ships)
            .field("selected", &self.selected)
            .field("detailed", &self.detailed)
            .field("wrap", &self.wrap)
            .field("auto_advance", &self.auto_advance)
            .field("alpha", &self.alpha)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// A scene with one randomly placed ship. Invalid settings fall back to
    /// the defaults.
    pub fn new(settings: Settings, seed: u64, textures: Box<dyn TextureLoader>) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Settings::default()
            }
        };
        let grid = settings.grid();
        let mut scene = Self {
            wrap: settings.wrap,
            settings,
            grid,
            ships: Vec::with_capacity(crate::consts::MAX_SHIPS),
            selected: 0,
            detailed: false,
            auto_advance: false,
            advance_countdown: 0,
            show_help: false,
            alpha: OPAQUE,
            last_release_ms: None,
            frame_count: 0,
            rng: Pcg32::seed_from_u64(seed),
            textures,
        };

        let ship = scene.build_random_ship();
        scene.ships.push(ship);

        log::info!(
            "Scene ready: {}x{} grid, seed {}",
            scene.grid.width,
            scene.grid.height,
            seed
        );
        scene
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_ship(&self) -> &Ship {
        &self.ships[self.selected]
    }

    pub fn detailed(&self) -> bool {
        self.detailed
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Single entry point for host input
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, .. } => {
                if let Some(command) = key_command(key) {
                    self.apply(command);
                }
            }
            InputEvent::KeyUp { key, .. } => {
                if key == Key::H {
                    self.apply(Command::ShowHelp(false));
                }
            }
            InputEvent::PointerDown {
                pos,
                button,
                time_ms,
                ..
            } => {
                let cell = self.grid.cell_at(pos);
                match button {
                    Button::Secondary => self.apply(Command::ToggleShipAt(cell)),
                    Button::Primary => {
                        if self.is_double_click(time_ms) {
                            self.apply(Command::Place(cell));
                        } else {
                            self.apply(Command::Aim(cell));
                        }
                    }
                    Button::Middle => {}
                }
            }
            InputEvent::PointerUp {
                button, time_ms, ..
            } => {
                if button == Button::Primary {
                    self.last_release_ms = Some(time_ms);
                }
            }
        }
    }

    fn is_double_click(&self, press_ms: u64) -> bool {
        self.last_release_ms
            .is_some_and(|released| press_ms.saturating_sub(released) <= self.settings.double_click_ms)
    }

    /// Apply one command
    pub fn apply(&mut self, command: Command) {
        log::debug!("apply {:?}", command);

        match command {
            Command::Reset => {
                self.ships.truncate(1);
                let grid = self.grid;
                self.ships[0].reset(&grid, &mut self.rng);
                self.selected = 0;
                let ship = self.selected_ship();
                log::info!("Reset: ship at {:?} moving {:?}", ship.pos, ship.vel);
            }
            Command::AdvanceAll => self.advance_all(),
            Command::ToggleDetail => self.detailed = !self.detailed,
            Command::ToggleWrap => {
                self.wrap = !self.wrap;
                let grid = self.grid;
                for ship in &mut self.ships {
                    ship.wrap_off_screen(&grid);
                }
            }
            Command::ToggleTimer => self.auto_advance = !self.auto_advance,
            Command::ShowHelp(show) => self.show_help = show,
            Command::Nudge { dx, dy } => {
                let ship = &mut self.ships[self.selected];
                ship.vel.dx += dx;
                ship.vel.dy += dy;
            }
            Command::Aim(cell) => {
                let ship = &mut self.ships[self.selected];
                ship.vel = Velocity::from(cell - ship.pos);
            }
            Command::Place(cell) => self.ships[self.selected].pos = cell,
            Command::ToggleShipAt(cell) => self.toggle_ship_at(cell),
            Command::Select(index) => {
                if index < self.ships.len() {
                    self.selected = index;
                }
            }
        }
    }

    /// Advance every ship once and restart the fade-in
    pub fn advance_all(&mut self) {
        let grid = self.grid;
        for ship in &mut self.ships {
            ship.advance(&grid, self.wrap);
        }
        self.alpha = 0;
    }

    /// Per-frame housekeeping: fade-in and the auto-advance timer
    pub fn frame(&mut self) {
        self.frame_count += 1;

        if self.alpha < OPAQUE {
            self.alpha = self.alpha.saturating_add(self.settings.fade_step);
        }

        if self.auto_advance {
            self.advance_countdown = self.advance_countdown.saturating_sub(1);
            if self.advance_countdown == 0 {
                self.advance_all();
                self.advance_countdown = self.settings.auto_advance_frames;
            }
        }
    }

    /// Remove every ship on `cell` (never the last one), or add a ship there
    fn toggle_ship_at(&mut self, cell: Vec2) {
        if self.ships.iter().any(|s| s.is_at(cell)) {
            while self.ships.len() > 1 {
                match self.ships.iter().position(|s| s.is_at(cell)) {
                    Some(index) => {
                        self.ships.remove(index);
                    }
                    None => break,
                }
            }
            if self.selected >= self.ships.len() {
                self.selected = self.ships.len() - 1;
            }
            return;
        }

        if self.ships.len() >= self.settings.max_ships {
            log::debug!("Ship limit ({}) reached", self.settings.max_ships);
            return;
        }

        let mut ship = self.build_random_ship();
        ship.pos = cell;
        self.ships.push(ship);
    }

    fn build_random_ship(&mut self) -> Ship {
        let sprite = self.textures.load(&self.settings.sprite_path);
        Ship::random(&self.grid, &mut self.rng, sprite)
    }

    /// One-line summary for logs and the native host
    pub fn status_line(&self) -> String {
        let ships = self
            .ships
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "{}:({}, {})+({}, {})",
                    i + 1,
                    crate::format_coord(s.pos.x),
                    crate::format_coord(s.pos.y),
                    crate::format_coord(s.vel.dx),
                    crate::format_coord(s.vel.dy),
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "editing {} of {} | timer {} | wrap {} | detail {} | {}",
            self.selected + 1,
            self.ships.len(),
            on_off(self.auto_advance),
            on_off(self.wrap),
            on_off(self.detailed),
            ships
        )
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
