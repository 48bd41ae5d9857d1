//! Arkanoid entry point
//!
//! Runs a headless autopilot session against a virtual clock and reports
//! the outcome. Usage: `arkanoid [settings.json]`. `ARKANOID_PLAYER` sets
//! the recorded player name. Native builds keep scores in memory; WASM builds
//! record them in browser LocalStorage.

mod headless {
    use std::time::Duration;

    use arkanoid::game::Hud;
    #[cfg(target_arch = "wasm32")]
    use arkanoid::platform::LocalStore;
    #[cfg(not(target_arch = "wasm32"))]
    use arkanoid::platform::MemoryStore;
    use arkanoid::platform::{Clock, RenderSink, SystemClock, VirtualClock};
    use arkanoid::sim::{Frame, GameEvent, TickInput};
    use arkanoid::{Game, Settings};

    #[cfg(not(target_arch = "wasm32"))]
    fn score_store() -> MemoryStore {
        MemoryStore::new()
    }

    #[cfg(target_arch = "wasm32")]
    fn score_store() -> LocalStore {
        LocalStore
    }

    /// 60 frames per second
    const FRAME: Duration = Duration::from_micros(16_667);
    /// Five minutes of play
    const MAX_TICKS: u32 = 60 * 60 * 5;

    /// Tallies what the renderer would have shown
    #[derive(Default)]
    struct SummarySink {
        frames: u32,
        bricks_hit: u32,
        balls_lost: u32,
        last_hud: Hud,
    }

    impl RenderSink for SummarySink {
        fn present(&mut self, frame: &Frame, hud: &Hud) {
            self.frames += 1;
            for event in &frame.events {
                match *event {
                    GameEvent::BricksHit { count } => self.bricks_hit += count,
                    GameEvent::BallsLost { count } => self.balls_lost += count,
                    GameEvent::LevelCleared { level } => {
                        println!(
                            "Tick {:>6}: reached level {level} (score {}, lives {})",
                            self.frames, frame.session.score, frame.session.lives
                        );
                    }
                    _ => {}
                }
            }
            self.last_hud = hud.clone();
        }
    }

    fn load_settings() -> Result<Settings, String> {
        match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| format!("could not read {path}: {e}"))?;
                Settings::from_json(&json).map_err(|e| format!("could not parse {path}: {e}"))
            }
            None => Ok(Settings::default()),
        }
    }

    pub fn run() -> Result<(), String> {
        let settings = load_settings()?;
        let clock = VirtualClock::new(SystemClock::new().unix_millis());
        let mut game =
            Game::new(settings, clock, score_store()).map_err(|e| e.to_string())?;
        let player = game
            .ensure_player_name(&mut || std::env::var("ARKANOID_PLAYER").ok())
            .to_string();
        log::info!("Arkanoid (headless) starting for {player}");

        let mut sink = SummarySink::default();
        for _ in 0..MAX_TICKS {
            let input = TickInput {
                activate: !game.world().player_clicked,
                autopilot: true,
                ..Default::default()
            };
            game.run_frame(&input, &mut sink)
                .map_err(|e| e.to_string())?;
            if game.is_over() {
                break;
            }
            game.clock_mut().advance(FRAME);
        }

        let session = game.world().session;
        println!(
            "{} after {} ticks: level {}, score {}, lives {} ({} brick hits, {} balls lost)",
            if game.is_over() { "Game over" } else { "Stopped" },
            sink.frames,
            session.level,
            session.score,
            session.lives,
            sink.bricks_hit,
            sink.balls_lost
        );
        let best = &sink.last_hud.high_score;
        if best.max_score > 0 {
            println!("High score: {} by {}", best.max_score, best.playername);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    if let Err(e) = headless::run() {
        log::error!("{e}");
    }
}
