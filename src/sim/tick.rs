//! Per-frame simulation step
//!
//! One call per rendered frame. Motion is per tick, not per second.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::collision;
use super::level::{self, Transition};
use super::state::{
    Ball, Brick, GamePhase, Paddle, Session, World, balls_follow_paddle, move_balls,
    release_balls, rotate_bricks, update_releases,
};
use crate::error::ConfigError;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x in arena coordinates; the paddle centers on it
    pub pointer_x: Option<f32>,
    /// Click/tap: release the balls
    pub activate: bool,
    /// Demo mode - paddle tracks the balls, overriding the pointer
    pub autopilot: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BallsReleased { count: u32 },
    BricksHit { count: u32 },
    BallsLost { count: u32 },
    /// A fresh ball set waits on the paddle
    BallsRespawned,
    /// Entered `level`
    LevelCleared { level: u32 },
    GameOver { score: u64 },
}

/// Everything the render sink needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Living balls only
    pub balls: Vec<Ball>,
    /// Living bricks only
    pub bricks: Vec<Brick>,
    pub paddle: Paddle,
    pub session: Session,
    pub phase: GamePhase,
    pub events: Vec<GameEvent>,
}

impl Frame {
    pub fn capture(world: &World, events: Vec<GameEvent>) -> Self {
        Self {
            balls: world.living_balls().cloned().collect(),
            bricks: world.living_bricks().cloned().collect(),
            paddle: world.paddle.clone(),
            session: world.session,
            phase: world.phase,
            events,
        }
    }

    pub fn has_event(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }
}

/// Park the paddle under each ball in turn; the last one in spawn order
/// wins, even once it is lost
fn autopilot(world: &mut World) {
    if let Some(ball) = world.balls.last() {
        let x = ball.pos.x;
        world.paddle.follow_pointer(x);
    }
}

/// Advance the world by one tick at clock reading `now`
///
/// A game that is over stays frozen. A level transition that cannot lay out
/// the next level fails with the configuration error.
pub fn tick(world: &mut World, input: &TickInput, now: Duration) -> Result<Frame, ConfigError> {
    let mut events = Vec::new();

    if world.phase == GamePhase::GameOver {
        return Ok(Frame::capture(world, events));
    }

    if input.autopilot {
        autopilot(world);
    } else if let Some(x) = input.pointer_x {
        world.paddle.follow_pointer(x);
    }

    if input.activate {
        world.player_clicked = true;
        let delay = world.release_delay();
        release_balls(&mut world.balls, now, delay);
    }

    let released = update_releases(&mut world.balls, now);
    if released > 0 {
        log::debug!("Released {released} ball(s)");
        events.push(GameEvent::BallsReleased { count: released });
    }

    if world.options.bricks_rotating {
        rotate_bricks(&mut world.bricks);
    }

    if world.player_clicked {
        move_balls(&mut world.balls, world.options.ball_speed);
    }
    balls_follow_paddle(&mut world.balls, &world.paddle);

    let report = collision::resolve(world);
    if report.brick_hits > 0 {
        events.push(GameEvent::BricksHit {
            count: report.brick_hits,
        });
    }
    if report.balls_lost > 0 {
        log::debug!(
            "Lost {} ball(s), {} lives left",
            report.balls_lost,
            world.session.lives
        );
        events.push(GameEvent::BallsLost {
            count: report.balls_lost,
        });
    }

    match level::evaluate(world) {
        Transition::Continue => {}
        Transition::GameOver => {
            world.phase = GamePhase::GameOver;
            log::info!(
                "Game over at level {} with score {}",
                world.session.level,
                world.session.score
            );
            events.push(GameEvent::GameOver {
                score: world.session.score,
            });
        }
        Transition::LevelCleared => {
            level::advance_level(world)?;
            events.push(GameEvent::LevelCleared {
                level: world.session.level,
            });
        }
        Transition::BallsExhausted => {
            log::debug!("Out of balls, respawning on the paddle");
            world.respawn_balls();
            events.push(GameEvent::BallsRespawned);
        }
    }

    Ok(Frame::capture(world, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::state::Release;
    use glam::Vec2;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn world() -> World {
        World::new(Settings::default()).unwrap()
    }

    #[test]
    fn test_held_ball_tracks_pointer() {
        let mut world = world();
        let y = world.balls[0].pos.y;
        let input = TickInput {
            pointer_x: Some(300.0),
            ..Default::default()
        };
        let frame = tick(&mut world, &input, ms(0)).unwrap();

        assert_eq!(world.paddle.pos.x, 200.0);
        assert_eq!(world.balls[0].pos, Vec2::new(300.0, y));
        assert!(frame.events.is_empty());
    }

    #[test]
    fn test_activate_releases_and_moves() {
        let mut world = world();
        let start = world.balls[0].pos;
        let dir = world.balls[0].dir;
        let activate = TickInput {
            activate: true,
            ..Default::default()
        };
        let frame = tick(&mut world, &activate, ms(1000)).unwrap();

        assert!(world.player_clicked);
        assert!(frame.has_event(&GameEvent::BallsReleased { count: 1 }));
        // Released before the paddle snap, so it moves from the spawn point
        let expected_x = start.x + dir.x * 10.0;
        assert!((world.balls[0].pos.x - expected_x).abs() < 1e-3);
        assert!(world.balls[0].pos.y < start.y);
    }

    #[test]
    fn test_staggered_release_with_virtual_time() {
        let mut settings = Settings::default();
        settings.options.ball_count = 3;
        let mut world = World::new(settings).unwrap();

        let activate = TickInput {
            activate: true,
            ..Default::default()
        };
        tick(&mut world, &activate, ms(0)).unwrap();
        let released = |w: &World| w.balls.iter().filter(|b| b.is_released()).count();
        assert_eq!(released(&world), 1);

        tick(&mut world, &TickInput::default(), ms(499)).unwrap();
        assert_eq!(released(&world), 1);
        // Still waiting balls ride the paddle
        assert_eq!(world.balls[2].pos.x, world.paddle.center_x());

        tick(&mut world, &TickInput::default(), ms(500)).unwrap();
        assert_eq!(released(&world), 2);
        tick(&mut world, &TickInput::default(), ms(1000)).unwrap();
        assert_eq!(released(&world), 3);
    }

    #[test]
    fn test_respawn_cancels_pending_releases() {
        let mut settings = Settings::default();
        settings.options.ball_count = 2;
        let mut world = World::new(settings).unwrap();

        let activate = TickInput {
            activate: true,
            ..Default::default()
        };
        tick(&mut world, &activate, ms(0)).unwrap();
        assert!(matches!(world.balls[1].release, Release::Pending { .. }));

        // Drop everything through the floor
        for ball in &mut world.balls {
            ball.pos.y = world.arena.height + 100.0;
        }
        let frame = tick(&mut world, &TickInput::default(), ms(10)).unwrap();
        assert!(frame.has_event(&GameEvent::BallsLost { count: 2 }));
        assert!(frame.has_event(&GameEvent::BallsRespawned));
        assert_eq!(world.session.lives, 1);
        assert!(!world.player_clicked);

        // The old schedule must not leak into the new set
        tick(&mut world, &TickInput::default(), ms(5000)).unwrap();
        assert!(world.balls.iter().all(|b| b.release == Release::Held && b.alive));
    }

    #[test]
    fn test_cleared_grid_advances_level() {
        let mut world = world();
        world.bricks.iter_mut().for_each(|b| b.lives = 0);

        let frame = tick(&mut world, &TickInput::default(), ms(0)).unwrap();
        assert!(frame.has_event(&GameEvent::LevelCleared { level: 2 }));
        assert_eq!(world.session.level, 2);
        assert_eq!(world.session.lives, 4);
        assert_eq!(frame.bricks.len(), 24);
    }

    #[test]
    fn test_clearing_ten_bricks_scores_ten() {
        let mut world = world();
        world.player_clicked = true;
        world.balls[0].release = Release::Released;
        world.balls[0].dir = Vec2::ZERO;

        let targets: Vec<Vec2> = world.bricks.iter().map(|b| b.rect().center()).collect();
        let mut transitions = 0;
        for (i, target) in targets.into_iter().enumerate() {
            world.balls[0].pos = target;
            let frame = tick(&mut world, &TickInput::default(), ms(i as u64)).unwrap();
            transitions += frame
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
                .count();
        }

        assert_eq!(world.session.score, 10);
        assert_eq!(transitions, 1);
        assert_eq!(world.session.level, 2);
        assert_eq!(world.session.lives, 4);
    }

    #[test]
    fn test_game_over_halts() {
        let mut world = world();
        world.session.lives = 0;

        let frame = tick(&mut world, &TickInput::default(), ms(0)).unwrap();
        assert_eq!(frame.phase, GamePhase::GameOver);
        assert_eq!(frame.events, vec![GameEvent::GameOver { score: 0 }]);

        let paddle = world.paddle.clone();
        let input = TickInput {
            pointer_x: Some(10.0),
            activate: true,
            ..Default::default()
        };
        let frame = tick(&mut world, &input, ms(16)).unwrap();
        assert!(frame.events.is_empty());
        assert_eq!(world.paddle, paddle);
        assert!(!world.player_clicked);
    }

    #[test]
    fn test_autopilot_follows_last_ball() {
        let mut settings = Settings::default();
        settings.options.ball_count = 2;
        let mut world = World::new(settings).unwrap();
        world.player_clicked = true;
        for (ball, x) in world.balls.iter_mut().zip([200.0, 900.0]) {
            ball.release = Release::Released;
            ball.pos = Vec2::new(x, 400.0);
            ball.dir = Vec2::ZERO;
        }

        let input = TickInput {
            pointer_x: Some(50.0),
            autopilot: true,
            ..Default::default()
        };
        tick(&mut world, &input, ms(0)).unwrap();
        assert_eq!(world.paddle.center_x(), 900.0);
    }

    #[test]
    fn test_autopilot_keeps_tracking_lost_last_ball() {
        let mut settings = Settings::default();
        settings.options.ball_count = 2;
        let mut world = World::new(settings).unwrap();
        world.player_clicked = true;
        for (ball, x) in world.balls.iter_mut().zip([200.0, 900.0]) {
            ball.release = Release::Released;
            ball.pos = Vec2::new(x, 400.0);
            ball.dir = Vec2::ZERO;
        }
        world.balls[1].destroy();

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut world, &input, ms(0)).unwrap();
        assert_eq!(world.paddle.center_x(), 900.0);
    }

    #[test]
    fn test_frame_skips_dead_entities() {
        let mut settings = Settings::default();
        settings.options.ball_count = 2;
        let mut world = World::new(settings).unwrap();

        let frame = tick(&mut world, &TickInput::default(), ms(0)).unwrap();
        assert_eq!(frame.bricks.len(), 10);
        assert_eq!(frame.balls.len(), 2);

        world.bricks[4].lives = 0;
        world.balls[0].destroy();
        let frame = tick(&mut world, &TickInput::default(), ms(16)).unwrap();
        assert_eq!(frame.bricks.len(), 9);
        assert_eq!(frame.balls.len(), 1);
        assert!(frame.bricks.iter().all(|b| b.is_alive()));
        assert_eq!(frame.balls[0].index, 1);
    }

    #[test]
    fn test_unplayable_next_level_does_not_drift() {
        let mut world = world();
        world.options.rows_bricks = 200;
        world.bricks.iter_mut().for_each(|b| b.lives = 0);

        for i in 0..2 {
            assert!(matches!(
                tick(&mut world, &TickInput::default(), ms(i * 16)),
                Err(ConfigError::GutterTooWide { .. })
            ));
            assert_eq!(world.session.level, 1);
            assert_eq!(world.session.lives, 3);
            assert_eq!(world.phase, GamePhase::Playing);
        }
    }

    #[test]
    fn test_rotation_only_when_enabled() {
        let mut world = world();
        tick(&mut world, &TickInput::default(), ms(0)).unwrap();
        assert!(world.bricks.iter().all(|b| b.angle == 0.0));

        world.options.bricks_rotating = true;
        tick(&mut world, &TickInput::default(), ms(16)).unwrap();
        assert!(world.bricks.iter().all(|b| b.angle > 0.0));
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(Settings::default()).unwrap();
        let mut b = World::new(Settings::default()).unwrap();
        a.bricks.iter_mut().for_each(|b| b.lives = 0);
        b.bricks.iter_mut().for_each(|b| b.lives = 0);

        let inputs = [
            TickInput::default(),
            TickInput {
                activate: true,
                ..Default::default()
            },
            TickInput {
                pointer_x: Some(400.0),
                ..Default::default()
            },
        ];
        for (i, input) in inputs.iter().enumerate() {
            tick(&mut a, input, ms(i as u64 * 16)).unwrap();
            tick(&mut b, input, ms(i as u64 * 16)).unwrap();
        }
        assert_eq!(a.bricks, b.bricks);
        assert_eq!(a.balls, b.balls);
    }
}
