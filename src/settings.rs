//! Game settings and preferences
//!
//! Persisted separately from the high score, as an enveloped JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::persistence::{self, PersistError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Fixed session seed; a fresh one is drawn per session when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            master_volume: 1.0,
            sfx_volume: 0.5,
            music_volume: 0.3,
            muted: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Clamp volumes into range and reject degenerate field sizes
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        if !(self.field_width.is_finite() && self.field_width > 0.0) {
            self.field_width = FIELD_WIDTH;
        }
        if !(self.field_height.is_finite() && self.field_height > 0.0) {
            self.field_height = FIELD_HEIGHT;
        }
        self
    }

    /// Load settings, falling back to defaults if missing or unreadable
    pub fn load(path: &Path) -> Self {
        match persistence::load_json::<Settings>(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::scratch_path;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.field_width, 800.0);
        assert_eq!(settings.music_volume, 0.3);
        assert_eq!(settings.sfx_volume, 0.5);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: -1.0,
            field_width: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.field_width, FIELD_WIDTH);
    }

    #[test]
    fn test_save_load() {
        let path = scratch_path("settings.json");
        let settings = Settings {
            seed: Some(7),
            muted: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_corrupt_falls_back_to_defaults() {
        let path = scratch_path("settings-corrupt.json");
        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_path("settings-partial.json");
        std::fs::write(&path, r#"{"version": 1, "payload": {"seed": 12}}"#).unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.seed, Some(12));
        assert_eq!(settings.field_height, FIELD_HEIGHT);
    }
}
