//! Collision detection and response
//!
//! Resolution order per tick is walls, then bricks, then paddle. Bricks run
//! before the paddle so a ball cannot both score and be redirected by the
//! paddle on the same tick.

use glam::Vec2;

use super::geometry::{circle_intersects_rect, circle_intersects_rotated_rect};
use super::state::{Arena, Ball, Brick, Paddle, World};
use crate::consts::MAX_BOUNCE_ANGLE;

/// What one collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Balls that left through the bottom wall
    pub balls_lost: u32,
    /// (ball, brick) intersections; each one scores a point
    pub brick_hits: u32,
    pub paddle_hits: u32,
}

/// Bounce balls off the side and top walls; destroy balls past the bottom
///
/// Returns the number of balls lost.
pub fn collide_walls(balls: &mut [Ball], arena: &Arena) -> u32 {
    let mut lost = 0;
    for ball in balls.iter_mut().filter(|b| b.alive) {
        if ball.pos.x + ball.radius > arena.width || ball.pos.x < ball.radius {
            ball.bounce_x();
        }

        if ball.pos.y < ball.radius {
            ball.bounce_y();
        } else if ball.pos.y + ball.radius > arena.height {
            ball.destroy();
            lost += 1;
        }
    }
    lost
}

/// Test every living brick against every living ball
///
/// A hit reverses vertical direction when the ball's bottom edge is past the
/// brick's bottom edge, horizontal otherwise. Every hit costs the brick one
/// life and counts once. Returns the number of hits.
pub fn collide_bricks(balls: &mut [Ball], bricks: &mut [Brick]) -> u32 {
    let mut hits = 0;
    for brick in bricks.iter_mut() {
        for ball in balls.iter_mut() {
            if !brick.is_alive() || !ball.alive {
                continue;
            }
            if !circle_intersects_rotated_rect(&ball.circle(), &brick.rect()) {
                continue;
            }

            if brick.bottom() < ball.pos.y + ball.radius {
                ball.bounce_y();
            } else {
                ball.bounce_x();
            }

            brick.hit();
            hits += 1;
        }
    }
    hits
}

/// Direction a ball leaves the paddle with, from where it struck
///
/// `dy` takes the cosine of the normalized offset rather than the bounce
/// angle. Paddle width must be positive; `GameOptions::validate` enforces it.
pub fn paddle_bounce_direction(ball_x: f32, paddle: &Paddle) -> Vec2 {
    let offset = ball_x - paddle.center_x();
    let normalized = offset / (paddle.width / 2.0);
    let bounce_angle = normalized * MAX_BOUNCE_ANGLE;

    Vec2::new(bounce_angle.sin(), -normalized.cos())
}

/// Redirect every living ball touching the paddle; returns the hit count
pub fn collide_paddle(balls: &mut [Ball], paddle: &Paddle) -> u32 {
    let rect = paddle.rect();
    let mut hits = 0;
    for ball in balls.iter_mut().filter(|b| b.alive) {
        if circle_intersects_rect(&ball.circle(), &rect) {
            ball.dir = paddle_bounce_direction(ball.pos.x, paddle);
            hits += 1;
        }
    }
    hits
}

/// Run a full collision pass and apply its score and life deltas
pub fn resolve(world: &mut World) -> CollisionReport {
    let report = CollisionReport {
        balls_lost: collide_walls(&mut world.balls, &world.arena),
        brick_hits: collide_bricks(&mut world.balls, &mut world.bricks),
        paddle_hits: collide_paddle(&mut world.balls, &world.paddle),
    };

    world.session.lives = world.session.lives.saturating_sub(report.balls_lost);
    world.session.score += u64::from(report.brick_hits);
    report
}
