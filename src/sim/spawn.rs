//! Entity generation at level start and ball respawn

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::degrees_to_radians;
use super::state::{Arena, Ball, Brick, GameOptions, Paddle, Release};

/// Lay out the brick grid over the spawn region, column-major
///
/// Each cell is inset by half the gutter from its top-left corner.
pub fn generate_bricks(
    options: &GameOptions,
    arena: &Arena,
    gutter: f32,
    rng: &mut Pcg32,
) -> Vec<Brick> {
    let cell_width = arena.width / options.cols_bricks as f32;
    let cell_height = arena.spawn_region_height() / options.rows_bricks as f32;
    let inset = gutter / 2.0;

    let mut bricks = Vec::with_capacity((options.cols_bricks * options.rows_bricks) as usize);
    for col in 0..options.cols_bricks {
        for row in 0..options.rows_bricks {
            let angle = if options.bricks_rotating {
                degrees_to_radians(rng.random_range(0.0..360.0))
            } else {
                0.0
            };
            bricks.push(Brick {
                col,
                row,
                pos: Vec2::new(
                    cell_width * col as f32 + inset,
                    cell_height * row as f32 + inset,
                ),
                size: Vec2::new(cell_width - inset, cell_height - inset),
                angle,
                lives: options.bricks_lives,
            });
        }
    }
    bricks
}

/// Spawn `count` held balls just above the paddle, at arena center
///
/// Directions are random and unnormalized, always heading up.
pub fn generate_balls(
    count: u32,
    paddle: &Paddle,
    options: &GameOptions,
    arena: &Arena,
    clearance: f32,
    rng: &mut Pcg32,
) -> Vec<Ball> {
    let radius = options.ball_radius;
    let y = arena.height - paddle.height - radius - clearance;

    (0..count)
        .map(|index| Ball {
            index,
            pos: Vec2::new(arena.center_x(), y),
            radius,
            speed: options.ball_speed,
            dir: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..-0.9)),
            release: Release::Held,
            alive: true,
        })
        .collect()
}

/// Paddle pinned to the arena bottom
pub fn generate_paddle(options: &GameOptions, arena: &Arena, height: f32) -> Paddle {
    Paddle {
        pos: Vec2::new(
            arena.center_x() + options.paddle_width / 2.0,
            arena.height - height,
        ),
        width: options.paddle_width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn arena() -> Arena {
        Arena::new(1000.0, 600.0)
    }

    #[test]
    fn test_brick_grid_layout() {
        let mut rng = Pcg32::seed_from_u64(1);
        let options = GameOptions::default();
        let bricks = generate_bricks(&options, &arena(), 10.0, &mut rng);

        assert_eq!(bricks.len(), 10);
        // Column-major: second brick is the row below the first
        assert_eq!((bricks[1].col, bricks[1].row), (0, 1));
        assert_eq!((bricks[2].col, bricks[2].row), (1, 0));

        // 200x90 cells, inset 5 from the top-left
        let b = &bricks[3];
        assert_eq!(b.pos, Vec2::new(205.0, 95.0));
        assert_eq!(b.size, Vec2::new(195.0, 85.0));
        assert!(bricks.iter().all(|b| b.bottom() <= 180.0 + 1e-3));
        assert!(bricks.iter().all(|b| b.angle == 0.0 && b.lives == 1));
    }

    #[test]
    fn test_rotating_bricks_get_random_angles() {
        let mut rng = Pcg32::seed_from_u64(7);
        let options = GameOptions {
            bricks_rotating: true,
            bricks_lives: 3,
            ..Default::default()
        };
        let bricks = generate_bricks(&options, &arena(), 10.0, &mut rng);
        let full_turn = degrees_to_radians(360.0);
        assert!(bricks.iter().all(|b| (0.0..full_turn).contains(&b.angle)));
        assert!(bricks.iter().any(|b| b.angle != 0.0));
        assert!(bricks.iter().all(|b| b.lives == 3));
    }

    #[test]
    fn test_ball_spawn() {
        let mut rng = Pcg32::seed_from_u64(42);
        let options = GameOptions::default();
        let paddle = generate_paddle(&options, &arena(), 20.0);
        let balls = generate_balls(4, &paddle, &options, &arena(), 10.0, &mut rng);

        assert_eq!(balls.len(), 4);
        for (i, ball) in balls.iter().enumerate() {
            assert_eq!(ball.index, i as u32);
            assert_eq!(ball.pos, Vec2::new(500.0, 555.0));
            assert!((-1.0..1.0).contains(&ball.dir.x));
            assert!((-1.0..-0.9).contains(&ball.dir.y));
            assert_eq!(ball.release, Release::Held);
            assert!(ball.alive);
        }
    }

    #[test]
    fn test_paddle_spawn() {
        let paddle = generate_paddle(&GameOptions::default(), &arena(), 20.0);
        assert_eq!(paddle.pos, Vec2::new(600.0, 580.0));
        assert_eq!(paddle.width, 200.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let options = GameOptions {
            bricks_rotating: true,
            ..Default::default()
        };
        let a = generate_bricks(&options, &arena(), 10.0, &mut Pcg32::seed_from_u64(3));
        let b = generate_bricks(&options, &arena(), 10.0, &mut Pcg32::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
