//! Game settings
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or no file at all) still yields a playable game.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::audio::DEFAULT_VOLUME;
use crate::consts::*;
use crate::sim::level::LevelTable;
use crate::sim::state::Viewport;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical viewport the simulation runs in
    pub viewport: Viewport,
    /// Ticks per second
    pub tick_rate: u32,
    /// Lives at the start of every game
    pub starting_lives: u32,
    /// Seconds to survive, unless a level overrides it
    pub level_duration_secs: f32,
    /// Where the score table is kept
    pub score_file: PathBuf,
    /// Silence all sound effects
    pub muted: bool,
    /// Effect volume (0.0 - 1.0)
    pub volume: f32,
    /// Levels in play order
    pub levels: LevelTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            tick_rate: TICK_RATE,
            starting_lives: STARTING_LIVES,
            level_duration_secs: LEVEL_DURATION,
            score_file: PathBuf::from("scoreboard.json"),
            muted: false,
            volume: DEFAULT_VOLUME,
            levels: LevelTable::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON and repair out-of-range values
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("parsing settings")?;
        Ok(settings.sanitized())
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Seconds per tick
    pub fn tick_secs(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        if self.tick_rate == 0 {
            log::warn!("tick_rate must be positive, using {}", defaults.tick_rate);
            self.tick_rate = defaults.tick_rate;
        }
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be positive, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            log::warn!("Viewport must have positive size, using default");
            self.viewport = defaults.viewport;
        }
        if !(0.0..=1.0).contains(&self.volume) {
            log::warn!("volume {} out of range, clamping", self.volume);
            self.volume = if self.volume.is_nan() {
                defaults.volume
            } else {
                self.volume.clamp(0.0, 1.0)
            };
        }
        if !(self.level_duration_secs > 0.0) {
            log::warn!("level_duration_secs must be positive, using default");
            self.level_duration_secs = defaults.level_duration_secs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{LevelSpec, generate};

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "starting_lives": 3, "muted": true }"#).unwrap();
        assert_eq!(settings.starting_lives, 3);
        assert!(settings.muted);
        assert_eq!(settings.tick_rate, TICK_RATE);
        assert_eq!(settings.levels.len(), LevelTable::default().len());
    }

    #[test]
    fn test_bad_values_are_repaired() {
        let settings = Settings::from_json(
            r#"{ "tick_rate": 0, "starting_lives": 0, "levels": [],
                 "viewport": { "width": -1.0, "height": 600.0 } }"#,
        )
        .unwrap();
        assert_eq!(settings.tick_rate, TICK_RATE);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
        assert_eq!(settings.viewport, Viewport::default());
        assert!(!settings.levels.is_empty());

        let loud = Settings::from_json(r#"{ "volume": 4.5 }"#).unwrap();
        assert_eq!(loud.volume, 1.0);
    }

    #[test]
    fn test_level_ranges_are_repaired() {
        let settings = Settings::from_json(
            r#"{ "levels": [{ "name": "Backwards", "duration_secs": -4.0,
                 "spec": { "mode": "endless", "seed": 1, "gap_min": -300, "gap_max": -260,
                           "vertical_offset_min": 0, "vertical_offset_max": 0,
                           "platform_y_min": 500, "platform_y_max": 500,
                           "obstacle_chance": 0.0, "obstacle_max_per_platform": 0,
                           "coin_chance": 0.0 } }] }"#,
        )
        .unwrap();
        let entry = &settings.levels.entries()[0];
        assert_eq!(entry.duration_secs, None);
        let LevelSpec::Endless(params) = &entry.spec else {
            panic!("expected an endless level");
        };
        assert_eq!((params.gap_min, params.gap_max), (0, 0));

        let level = generate(&entry.spec, &settings.viewport, settings.level_duration_secs);
        assert!(level.platforms.last().unwrap().pos.x >= settings.viewport.width);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(Settings::from_json("[1, 2").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/definitely/not/here.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir()
            .join(format!("square-dash-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.starting_lives = 4;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }
}
