//! Error types
//!
//! Configuration errors are fatal and surface when a level is set up.
//! Persistence errors are reported to the caller but never stop a session.

use std::fmt;

/// Invalid arena or level configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Arena width or height is not a positive finite number
    InvalidArena { width: f32, height: f32 },
    /// Brick grid would have no cells
    EmptyBrickGrid { cols: u32, rows: u32 },
    /// Level would spawn no balls
    NoBalls,
    /// Paddle width must be positive (it divides the bounce offset)
    InvalidPaddleWidth(f32),
    /// Ball radius must be finite and non-negative
    InvalidBallRadius(f32),
    /// Ball speed must be finite
    InvalidBallSpeed(f32),
    /// Gutter leaves no room for a brick in its cell
    GutterTooWide { gutter: f32, cell_width: f32, cell_height: f32 },
    /// Spawn region ratio outside (0, 1]
    InvalidSpawnRatio(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArena { width, height } => {
                write!(f, "invalid arena size: {width}x{height}")
            }
            ConfigError::EmptyBrickGrid { cols, rows } => {
                write!(f, "brick grid must have at least one cell, got {cols}x{rows}")
            }
            ConfigError::NoBalls => write!(f, "level must spawn at least one ball"),
            ConfigError::InvalidPaddleWidth(w) => {
                write!(f, "paddle width must be positive, got {w}")
            }
            ConfigError::InvalidBallRadius(r) => {
                write!(f, "ball radius must be non-negative, got {r}")
            }
            ConfigError::InvalidBallSpeed(s) => write!(f, "ball speed must be finite, got {s}"),
            ConfigError::GutterTooWide {
                gutter,
                cell_width,
                cell_height,
            } => write!(
                f,
                "brick gutter {gutter} does not fit in a {cell_width}x{cell_height} cell"
            ),
            ConfigError::InvalidSpawnRatio(r) => {
                write!(f, "spawn region ratio must be in (0, 1], got {r}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure reading or writing persisted data
#[derive(Debug)]
pub enum PersistenceError {
    /// Backing storage could not be reached
    Unavailable(String),
    /// Stored data could not be parsed or encoded
    Corrupt(serde_json::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            PersistenceError::Corrupt(e) => write!(f, "corrupt stored data: {e}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Corrupt(e) => Some(e),
            PersistenceError::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Corrupt(e)
    }
}
