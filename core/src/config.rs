use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::*;

pub const DEFAULT_MAP_PATH: &str = "assets/maps/level1.csv";

/// Tunables read from an optional TOML file. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub target_fps: u32,
    /// Upper bound on a single frame's delta time, in seconds.
    pub max_frame_delta: f32,
    pub map_path: PathBuf,
    pub cursor_blink_interval: f32,
    pub result_display_secs: f32,
    pub burn_secs: f32,
    pub typewriter_delay: f32,
    pub player_move_cooldown: f32,
    /// Seed for particle and screen shake jitter.
    pub effects_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frame_delta: 0.1,
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            cursor_blink_interval: 0.4,
            result_display_secs: 3.0,
            burn_secs: 2.0,
            typewriter_delay: 0.04,
            player_move_cooldown: 0.15,
            effects_seed: 0x0C1C_0E5C,
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads settings from `path`, falling back to defaults when it is absent
    /// or unreadable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings: {:?}", err);
                Self::default()
            }
        }
    }

    pub(crate) fn puzzle_timing(&self) -> PuzzleTiming {
        PuzzleTiming {
            blink_interval: self.cursor_blink_interval,
            result_secs: self.result_display_secs,
            burn_secs: self.burn_secs,
        }
    }
}
