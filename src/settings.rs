//! Game settings
//!
//! Persisted as a JSON file next to where the game is launched.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Environment variable overriding the settings file location
pub const SETTINGS_ENV: &str = "PACMAN_DUEL_SETTINGS";
/// Default settings file name
pub const SETTINGS_FILE: &str = "pacman-duel.json";
/// Largest field a settings file may ask for
pub const MAX_DOT_COUNT: usize = 1000;

/// Failure reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round ===
    /// Countdown length in seconds
    pub round_secs: f32,
    /// Dots per field
    pub dot_count: usize,
    /// Fraction of each field that is special (0.0 - 1.0)
    pub special_ratio: f32,
    /// Fixed RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,

    // === Display ===
    /// Frame rate the loop is paced to
    pub target_fps: u32,
    /// How long the result stays on screen before exit
    pub result_display_secs: f32,
    /// Multiplier on the 800x600 logical window
    pub window_scale: f32,

    // === Assets ===
    /// Directory holding the `pacman_<direction>.png` sprites
    pub asset_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_secs: ROUND_DURATION_SECS,
            dot_count: DOT_COUNT,
            special_ratio: SPECIAL_RATIO,
            seed: None,

            target_fps: TARGET_FPS,
            result_display_secs: RESULT_DISPLAY_SECS,
            window_scale: 1.0,

            asset_dir: PathBuf::from("resources"),
        }
    }
}

impl Settings {
    /// Settings file location: `$PACMAN_DUEL_SETTINGS` or `./pacman-duel.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    /// Parse settings from a file
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from a JSON string; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp every field into a playable range
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !self.special_ratio.is_finite() {
            self.special_ratio = defaults.special_ratio;
        }
        self.special_ratio = self.special_ratio.clamp(0.0, 1.0);
        if !self.round_secs.is_finite() || self.round_secs < 1.0 {
            self.round_secs = 1.0;
        }
        if !self.result_display_secs.is_finite() || self.result_display_secs < 0.0 {
            self.result_display_secs = 0.0;
        }
        if !self.window_scale.is_finite() || self.window_scale <= 0.0 {
            self.window_scale = defaults.window_scale;
        }
        self.target_fps = self.target_fps.max(1);
        // An empty field would be regenerated every frame
        self.dot_count = self.dot_count.clamp(1, MAX_DOT_COUNT);
        self
    }

    /// One frame at the target rate
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}
