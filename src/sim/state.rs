//! World state and entity types
//!
//! The `World` aggregate owns everything a level needs. Only `Session`
//! survives a level transition; every entity is regenerated.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect, degrees_to_radians};
use super::{level, spawn};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (including balls waiting on the paddle)
    Playing,
    /// Every brick is gone; the next level is being set up
    LevelCleared,
    /// Out of lives, simulation halted
    GameOver,
}

/// The playable rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Fraction of the height, from the top, where bricks are laid out
    pub spawn_ratio: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            spawn_ratio: SPAWN_REGION_RATIO,
        }
    }

    #[inline]
    pub fn spawn_region_height(&self) -> f32 {
        self.height * self.spawn_ratio
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Ball release progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Release {
    /// Riding on the paddle, no release scheduled
    Held,
    /// Release scheduled at the given clock reading
    Pending { at: Duration },
    /// Moving freely
    Released,
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Spawn order within the current ball set
    pub index: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Direction, deliberately not normalized
    pub dir: Vec2,
    pub release: Release,
    pub alive: bool,
}

impl Ball {
    #[inline]
    pub fn is_released(&self) -> bool {
        self.release == Release::Released
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Schedule the release `delay` after `now`, unless already scheduled
    pub fn schedule_release(&mut self, now: Duration, delay: Duration) {
        if self.release == Release::Held {
            self.release = Release::Pending { at: now + delay };
        }
    }

    /// Flip a due pending release; returns true if the ball was released
    pub fn update_release(&mut self, now: Duration) -> bool {
        match self.release {
            Release::Pending { at } if at <= now => {
                self.release = Release::Released;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn bounce_x(&mut self) {
        self.dir.x = -self.dir.x;
    }

    #[inline]
    pub fn bounce_y(&mut self) {
        self.dir.y = -self.dir.y;
    }

    /// Mark as lost through the bottom wall
    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

/// A brick entity, possibly rotated about its center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub col: u32,
    pub row: u32,
    /// Top-left corner before rotation
    pub pos: Vec2,
    pub size: Vec2,
    /// Radians
    pub angle: f32,
    pub lives: u32,
}

impl Brick {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
            angle: self.angle,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance rotation by one degree
    ///
    /// Resets to zero when the angle is an exact multiple of a full turn.
    /// Accumulated float error means this may never fire after the first turn.
    pub fn rotate(&mut self) {
        if !self.is_alive() {
            return;
        }
        if self.angle % degrees_to_radians(360.0) == 0.0 {
            self.angle = 0.0;
        }
        self.angle += degrees_to_radians(1.0);
    }

    /// Take one hit
    pub fn hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Center the paddle on the pointer. Not clamped to the arena.
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        self.pos.x = pointer_x - self.width / 2.0;
    }
}

/// Level-derived configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    pub bricks_lives: u32,
    pub cols_bricks: u32,
    pub rows_bricks: u32,
    pub ball_count: u32,
    pub ball_speed: f32,
    pub ball_radius: f32,
    pub paddle_width: f32,
    pub bricks_rotating: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            bricks_lives: DEFAULT_BRICKS_LIVES,
            cols_bricks: DEFAULT_COLS_BRICKS,
            rows_bricks: DEFAULT_ROWS_BRICKS,
            ball_count: DEFAULT_BALL_COUNT,
            ball_speed: DEFAULT_BALL_SPEED,
            ball_radius: DEFAULT_BALL_RADIUS,
            paddle_width: DEFAULT_PADDLE_WIDTH,
            bricks_rotating: false,
        }
    }
}

impl GameOptions {
    /// Check the options can produce a playable level in `arena`
    pub fn validate(&self, arena: &Arena, gutter: f32) -> Result<(), ConfigError> {
        if self.cols_bricks == 0 || self.rows_bricks == 0 {
            return Err(ConfigError::EmptyBrickGrid {
                cols: self.cols_bricks,
                rows: self.rows_bricks,
            });
        }
        if self.ball_count == 0 {
            return Err(ConfigError::NoBalls);
        }
        if !(self.paddle_width.is_finite() && self.paddle_width > 0.0) {
            return Err(ConfigError::InvalidPaddleWidth(self.paddle_width));
        }
        if !(self.ball_radius.is_finite() && self.ball_radius >= 0.0) {
            return Err(ConfigError::InvalidBallRadius(self.ball_radius));
        }
        if !self.ball_speed.is_finite() {
            return Err(ConfigError::InvalidBallSpeed(self.ball_speed));
        }

        let cell_width = arena.width / self.cols_bricks as f32;
        let cell_height = arena.spawn_region_height() / self.rows_bricks as f32;
        let inset = gutter / 2.0;
        if !(inset >= 0.0 && inset < cell_width && inset < cell_height) {
            return Err(ConfigError::GutterTooWide {
                gutter,
                cell_width,
                cell_height,
            });
        }
        Ok(())
    }
}

/// Score, lives and level: the only state carried across levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub level: u32,
    pub score: u64,
    pub lives: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            level: STARTING_LEVEL,
            score: 0,
            lives: STARTING_LIVES,
        }
    }
}

/// Complete simulation state, owned by the driver
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub arena: Arena,
    pub options: GameOptions,
    pub session: Session,
    pub phase: GamePhase,
    pub paddle: Paddle,
    /// Spawn order
    pub balls: Vec<Ball>,
    /// Column-major grid order
    pub bricks: Vec<Brick>,
    /// Set by the activate input; cleared whenever a fresh ball set spawns
    pub player_clicked: bool,
    rng: Pcg32,
}

impl World {
    /// Build the world and set up the first level
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let arena = Arena {
            width: settings.arena_width,
            height: settings.arena_height,
            spawn_ratio: settings.spawn_ratio,
        };
        let mut world = Self {
            arena,
            options: settings.options.clone(),
            session: Session::default(),
            phase: GamePhase::Playing,
            paddle: spawn::generate_paddle(&settings.options, &arena, settings.paddle_height),
            balls: Vec::new(),
            bricks: Vec::new(),
            player_clicked: false,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
        };
        world.setup_level(STARTING_LEVEL)?;
        Ok(world)
    }

    /// Scale options for level `number`, enter it and regenerate every entity
    ///
    /// Any pending ball releases are dropped along with the old ball set.
    /// If the scaled options cannot be laid out the world is left untouched.
    pub fn setup_level(&mut self, number: u32) -> Result<(), ConfigError> {
        let mut options = self.options.clone();
        level::scale_options(&mut options, number);
        options.validate(&self.arena, self.settings.brick_gutter)?;

        self.options = options;
        self.session.level = number;
        self.player_clicked = false;
        self.bricks = spawn::generate_bricks(
            &self.options,
            &self.arena,
            self.settings.brick_gutter,
            &mut self.rng,
        );
        self.paddle =
            spawn::generate_paddle(&self.options, &self.arena, self.settings.paddle_height);
        self.respawn_balls();
        self.phase = GamePhase::Playing;

        log::info!(
            "Level {}: {}x{} bricks ({} lives), {} balls at speed {}, rotating={}",
            self.session.level,
            self.options.cols_bricks,
            self.options.rows_bricks,
            self.options.bricks_lives,
            self.options.ball_count,
            self.options.ball_speed,
            self.options.bricks_rotating
        );
        Ok(())
    }

    /// Replace the ball set with fresh held balls; bricks and session untouched
    pub fn respawn_balls(&mut self) {
        self.player_clicked = false;
        self.balls = spawn::generate_balls(
            self.options.ball_count,
            &self.paddle,
            &self.options,
            &self.arena,
            self.settings.ball_spawn_clearance,
            &mut self.rng,
        );
    }

    pub fn release_delay(&self) -> Duration {
        Duration::from_millis(self.settings.release_delay_ms)
    }

    pub fn living_balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.alive)
    }

    pub fn living_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_alive())
    }
}

/// Schedule every held ball, staggered by spawn index
pub fn release_balls(balls: &mut [Ball], now: Duration, delay: Duration) {
    for ball in balls.iter_mut() {
        ball.schedule_release(now, delay * ball.index);
    }
}

/// Release every ball whose scheduled time has come; returns how many
pub fn update_releases(balls: &mut [Ball], now: Duration) -> u32 {
    balls
        .iter_mut()
        .map(|b| b.update_release(now))
        .filter(|&released| released)
        .count() as u32
}

/// Pin every unreleased ball to the paddle center
pub fn balls_follow_paddle(balls: &mut [Ball], paddle: &Paddle) {
    let x = paddle.center_x();
    for ball in balls.iter_mut().filter(|b| !b.is_released()) {
        ball.pos.x = x;
    }
}

/// Advance every living released ball by `dir * speed`
pub fn move_balls(balls: &mut [Ball], speed: f32) {
    for ball in balls.iter_mut().filter(|b| b.alive && b.is_released()) {
        ball.pos += ball.dir * speed;
    }
}

/// Rotate every living brick by one degree
pub fn rotate_bricks(bricks: &mut [Brick]) {
    for brick in bricks.iter_mut() {
        brick.rotate();
    }
}
