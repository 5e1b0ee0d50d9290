//! Game settings
//!
//! Tunables for a run, loaded from a JSON file. Missing fields fall back to
//! the defaults, so a config file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{self, PersistError};
use crate::sim::Bounds;

/// Problem loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial playfield size (the host may resize it every tick)
    pub playfield: Bounds,
    /// Timer interval between ticks in milliseconds
    pub tick_interval_ms: u64,

    // === Run ===
    pub initial_lives: u32,
    /// Asteroids kept on the field at the start
    pub initial_difficulty: u32,
    /// Running ticks between difficulty increments
    pub difficulty_ramp_ticks: u32,
    /// Points needed (strictly exceeded) for an extra life
    pub bonus_life_threshold: u32,

    // === Player ===
    /// Live bullet cap; firing past it evicts the oldest
    pub max_bullets: usize,
    /// Ticks the simulation freezes after the ship is hit
    pub stun_ticks: u32,

    // === Spawning ===
    /// Side of the square kept clear around the ship when spawning
    pub safe_zone_size: f32,
    /// Placement attempts before falling back to the corner
    pub max_spawn_attempts: u32,

    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Bounds::new(800.0, 600.0),
            // 100ms timer: ten ticks per second
            tick_interval_ms: 100,

            initial_lives: 3,
            initial_difficulty: 10,
            difficulty_ramp_ticks: 50,
            bonus_life_threshold: 10_000,

            max_bullets: 8,
            stun_ticks: 10,

            safe_zone_size: 200.0,
            max_spawn_attempts: 64,

            seed: None,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings: Settings = persistence::load_json(path)?;
        settings.validate()?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like `load`, but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Persist(e)) if e.is_not_found() => {
                log::info!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write settings as JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        persistence::save_json(path, self)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let Bounds { width, height } = self.playfield;
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(invalid(
                "playfield",
                format!("size must be positive, got {width}x{height}"),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms", "must be at least 1"));
        }
        if self.initial_lives == 0 {
            return Err(invalid("initial_lives", "must be at least 1"));
        }
        if self.difficulty_ramp_ticks == 0 {
            return Err(invalid("difficulty_ramp_ticks", "must be at least 1"));
        }
        if self.max_bullets == 0 {
            return Err(invalid("max_bullets", "must be at least 1"));
        }
        if !(self.safe_zone_size >= 0.0) {
            return Err(invalid("safe_zone_size", "must not be negative"));
        }
        if self.max_spawn_attempts == 0 {
            return Err(invalid("max_spawn_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "initial_lives": 5, "seed": 9 }"#).unwrap();
        assert_eq!(settings.initial_lives, 5);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.max_bullets, 8);
        assert_eq!(settings.playfield, Bounds::new(800.0, 600.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.playfield = Bounds::new(0.0, 600.0);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "playfield", .. })
        ));

        let mut settings = Settings::default();
        settings.max_bullets = 0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid { field: "max_bullets", .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("asteroids-settings-{}", std::process::id()));
        let path = dir.join("settings.json");
        let mut settings = Settings::default();
        settings.initial_difficulty = 4;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("asteroids-no-such-settings.json");
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
    }
}
