//! Arkanoid - A breakout-style arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, level progression)
//! - `game`: Session driver wiring the simulation to its collaborators
//! - `platform`: Clock, storage, name prompt and render sink abstractions
//! - `highscores`: Per-player score ledger
//! - `settings`: Arena and base option configuration

pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, PersistenceError};
pub use game::Game;
pub use highscores::{HighScore, ScoreLedger};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum paddle bounce angle (75 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = 5.0 * std::f32::consts::PI / 12.0;

    /// Level 1 defaults
    pub const DEFAULT_BRICKS_LIVES: u32 = 1;
    pub const DEFAULT_COLS_BRICKS: u32 = 5;
    pub const DEFAULT_ROWS_BRICKS: u32 = 2;
    pub const DEFAULT_BALL_COUNT: u32 = 1;
    pub const DEFAULT_BALL_SPEED: f32 = 10.0;
    pub const DEFAULT_BALL_RADIUS: f32 = 15.0;
    pub const DEFAULT_PADDLE_WIDTH: f32 = 200.0;

    /// Arena defaults (the viewport size on a typical desktop)
    pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;

    /// Fraction of arena height reserved for bricks
    pub const SPAWN_REGION_RATIO: f32 = 0.3;
    /// Space between bricks
    pub const BRICK_GUTTER: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between a freshly spawned ball and the paddle top
    pub const BALL_SPAWN_CLEARANCE: f32 = 10.0;
    /// Delay between consecutive ball releases, per spawn index
    pub const RELEASE_DELAY_MS: u64 = 500;

    /// Session start
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_LEVEL: u32 = 1;

    /// Key under which the score ledger is persisted
    pub const STORAGE_KEY: &str = "arkano-id";
    /// Recorded when the player gives no name
    pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";
}
