//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock reads (time is passed in)
//! - Seeded RNG only
//! - Stable iteration order (spawn order for balls, column-major for bricks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, paddle_bounce_direction};
pub use geometry::{
    Circle, Rect, circle_intersects_rect, circle_intersects_rotated_rect, degrees_to_radians,
    distance,
};
pub use level::{
    Transition, did_player_run_out_of_balls, is_game_over, is_level_over, scale_options,
};
pub use spawn::{generate_balls, generate_bricks, generate_paddle};
pub use state::{
    Arena, Ball, Brick, GameOptions, GamePhase, Paddle, Release, Session, World,
    balls_follow_paddle, release_balls, rotate_bricks,
};
pub use tick::{Frame, GameEvent, TickInput, tick};
