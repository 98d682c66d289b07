//! Scene settings
//!
//! Defaults come from `consts`. Hosts may override them from JSON
//! (a file on native, LocalStorage in the browser).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Grid;

/// Settings could not be parsed or describe an unusable scene
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    GridTooSmall { width: u32, height: u32, min: u32 },
    #[error("pixels per cell must be positive")]
    ZeroScale,
    #[error("max ships must be between 1 and 9, got {0}")]
    ShipLimit(usize),
    #[error("{0} must be positive")]
    ZeroTiming(&'static str),
}

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid size in cells
    pub grid_width: u32,
    pub grid_height: u32,
    /// Pixels between grid lines
    pub pixels_per_cell: u32,

    /// Upper bound on ships in the scene (digit keys reach at most 9)
    pub max_ships: usize,
    /// Whether ships wrap at the grid edges on startup
    pub wrap: bool,

    /// Frames between automatic advances
    pub auto_advance_frames: u32,
    /// Opacity gained per frame after an advance
    pub fade_step: u8,
    /// Double click window in milliseconds
    pub double_click_ms: u64,

    /// Ship sprite, relative to the working directory (or page on web)
    pub sprite_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            pixels_per_cell: PIXELS_PER_CELL,
            max_ships: MAX_SHIPS,
            wrap: WRAP_DEFAULT,
            auto_advance_frames: AUTO_ADVANCE_FRAMES,
            fade_step: FADE_STEP,
            double_click_ms: DOUBLE_CLICK_MS,
            sprite_path: SPRITE_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Smallest grid on which reset still has a cell to land in
    pub const MIN_GRID: u32 = 2 * RESET_MARGIN + 1;

    /// Parse and validate settings. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps or non-finite floats, serialization can't fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_width < Self::MIN_GRID || self.grid_height < Self::MIN_GRID {
            return Err(SettingsError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
                min: Self::MIN_GRID,
            });
        }
        if self.pixels_per_cell == 0 {
            return Err(SettingsError::ZeroScale);
        }
        if !(1..=9).contains(&self.max_ships) {
            return Err(SettingsError::ShipLimit(self.max_ships));
        }
        if self.auto_advance_frames == 0 {
            return Err(SettingsError::ZeroTiming("auto_advance_frames"));
        }
        if self.fade_step == 0 {
            return Err(SettingsError::ZeroTiming("fade_step"));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height, self.pixels_per_cell)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "shipgrid_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid_width, 12);
        assert_eq!(settings.grid_height, 10);
        assert_eq!(settings.max_ships, 9);
        assert!(settings.wrap);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "grid_width": 20, "wrap": false }"#).unwrap();
        assert_eq!(settings.grid_width, 20);
        assert!(!settings.wrap);
        assert_eq!(settings.grid_height, GRID_HEIGHT);
        assert_eq!(settings.pixels_per_cell, PIXELS_PER_CELL);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            grid_width: 90,
            grid_height: 70,
            pixels_per_cell: 5,
            ..Default::default()
        };
        let parsed = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "grid_width": 4 }"#),
            Err(SettingsError::GridTooSmall { width: 4, .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "pixels_per_cell": 0 }"#),
            Err(SettingsError::ZeroScale)
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "max_ships": 10 }"#),
            Err(SettingsError::ShipLimit(10))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "max_ships": 0 }"#),
            Err(SettingsError::ShipLimit(0))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "fade_step": 0 }"#),
            Err(SettingsError::ZeroTiming("fade_step"))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
