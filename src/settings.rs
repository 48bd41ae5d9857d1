//! Arena and base option configuration
//!
//! Loaded once per session. The embedded `GameOptions` are the level 1
//! values; later levels scale them.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, PersistenceError};
use crate::sim::state::{Arena, GameOptions};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Viewport width
    pub arena_width: f32,
    /// Viewport height
    pub arena_height: f32,
    /// Fraction of the height, from the top, where bricks spawn
    pub spawn_ratio: f32,

    // === Layout ===
    pub brick_gutter: f32,
    pub paddle_height: f32,
    /// Gap between a spawned ball and the paddle
    pub ball_spawn_clearance: f32,

    // === Timing ===
    /// Delay between consecutive ball releases
    pub release_delay_ms: u64,

    /// RNG seed for brick angles and ball directions
    pub seed: u64,

    /// Level 1 options
    pub options: GameOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            spawn_ratio: SPAWN_REGION_RATIO,

            brick_gutter: BRICK_GUTTER,
            paddle_height: PADDLE_HEIGHT,
            ball_spawn_clearance: BALL_SPAWN_CLEARANCE,

            release_delay_ms: RELEASE_DELAY_MS,

            seed: 0,

            options: GameOptions::default(),
        }
    }
}

impl Settings {
    /// Parse settings, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Settings for a specific viewport
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        self.arena_width = width;
        self.arena_height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations that cannot produce a playable first level
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_ok = |v: f32| v.is_finite() && v > 0.0;
        if !size_ok(self.arena_width) || !size_ok(self.arena_height) {
            return Err(ConfigError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(self.spawn_ratio > 0.0 && self.spawn_ratio <= 1.0) {
            return Err(ConfigError::InvalidSpawnRatio(self.spawn_ratio));
        }

        let arena = Arena {
            width: self.arena_width,
            height: self.arena_height,
            spawn_ratio: self.spawn_ratio,
        };
        self.options.validate(&arena, self.brick_gutter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "arena_width": 800, "options": { "cols_bricks": 3 } }"#)
                .unwrap();
        assert_eq!(settings.arena_width, 800.0);
        assert_eq!(settings.arena_height, DEFAULT_ARENA_HEIGHT);
        assert_eq!(settings.options.cols_bricks, 3);
        assert_eq!(settings.options.rows_bricks, DEFAULT_ROWS_BRICKS);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::default().with_seed(9).with_arena(640.0, 480.0);
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(PersistenceError::Corrupt(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let bad_arena = Settings::default().with_arena(0.0, 600.0);
        assert!(matches!(
            bad_arena.validate(),
            Err(ConfigError::InvalidArena { .. })
        ));

        let mut no_balls = Settings::default();
        no_balls.options.ball_count = 0;
        assert_eq!(no_balls.validate(), Err(ConfigError::NoBalls));

        let mut wide_gutter = Settings::default();
        wide_gutter.brick_gutter = 1000.0;
        assert!(matches!(
            wide_gutter.validate(),
            Err(ConfigError::GutterTooWide { .. })
        ));

        let mut no_spawn = Settings::default();
        no_spawn.spawn_ratio = 0.0;
        assert_eq!(no_spawn.validate(), Err(ConfigError::InvalidSpawnRatio(0.0)));
    }
}
