//! Level progression and terminal conditions

use serde::{Deserialize, Serialize};

use super::state::{Ball, Brick, GamePhase, GameOptions, Session, World};
use crate::error::ConfigError;

/// Apply the difficulty step for `level` to `options` in place
///
/// Steps accumulate across levels; options are never reset to defaults.
pub fn scale_options(options: &mut GameOptions, level: u32) {
    if level >= 2 {
        options.bricks_rotating = true;
    }
    if level.is_multiple_of(3) {
        options.ball_count *= 2;
    }
    if level.is_multiple_of(5) {
        options.ball_speed += 1.0;
    }
    if level.is_multiple_of(2) {
        options.cols_bricks += 3;
        options.rows_bricks += 1;
    }
    if level.is_multiple_of(7) {
        options.bricks_lives += 1;
    }
}

/// Every brick is down
pub fn is_level_over(bricks: &[Brick]) -> bool {
    bricks.iter().all(|b| !b.is_alive())
}

/// Every ball is destroyed
pub fn did_player_run_out_of_balls(balls: &[Ball]) -> bool {
    balls.iter().all(|b| !b.alive)
}

pub fn is_game_over(session: &Session) -> bool {
    session.lives == 0
}

/// Outcome of the end-of-tick check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Nothing to do
    Continue,
    /// Out of lives
    GameOver,
    /// Every brick destroyed
    LevelCleared,
    /// Every ball lost but lives remain
    BallsExhausted,
}

/// Decide what the world does after this tick's collisions
///
/// Game over wins over a level clear on the same tick, so a session never
/// resumes from zero lives.
pub fn evaluate(world: &World) -> Transition {
    if is_game_over(&world.session) {
        Transition::GameOver
    } else if is_level_over(&world.bricks) {
        Transition::LevelCleared
    } else if did_player_run_out_of_balls(&world.balls) {
        Transition::BallsExhausted
    } else {
        Transition::Continue
    }
}

/// Move to the next level: one more level, one more life, fresh entities
///
/// On error nothing changes, so the cleared grid stays cleared and the
/// session keeps its level and lives.
pub fn advance_level(world: &mut World) -> Result<(), ConfigError> {
    let previous = world.phase;
    world.phase = GamePhase::LevelCleared;
    if let Err(e) = world.setup_level(world.session.level + 1) {
        world.phase = previous;
        return Err(e);
    }
    world.session.lives += 1;
    log::info!(
        "Level cleared! Now level {} with {} lives, score {}",
        world.session.level,
        world.session.lives,
        world.session.score
    );
    Ok(())
}
