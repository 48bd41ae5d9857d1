//! Session driver
//!
//! Owns the world and its collaborators: samples the clock each tick, asks
//! for the player name once, hands frames to the render sink, and records
//! the final score exactly once when the game ends. The stored ledger is
//! re-read right before that write and the write is skipped if it cannot be
//! read. Storage failures are logged and never interrupt play.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PLAYER_NAME;
use crate::error::ConfigError;
use crate::highscores::{HighScore, ScoreLedger};
use crate::platform::{Clock, KeyValueStore, NamePrompt, RenderSink};
use crate::settings::Settings;
use crate::sim::{self, Frame, GameEvent, GamePhase, TickInput, World};

/// Session data shown alongside the playfield
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hud {
    pub player_name: String,
    /// Best stored score, or the empty default
    pub high_score: HighScore,
}

pub struct Game<C: Clock, S: KeyValueStore> {
    world: World,
    clock: C,
    store: S,
    ledger: ScoreLedger,
    player_name: Option<String>,
    score_recorded: bool,
}

impl<C: Clock, S: KeyValueStore> Game<C, S> {
    /// Set up level 1 and load the score ledger
    ///
    /// An unreadable ledger is replaced by an empty one.
    pub fn new(settings: Settings, clock: C, store: S) -> Result<Self, ConfigError> {
        let world = World::new(settings)?;
        let ledger = ScoreLedger::load(&store).unwrap_or_else(|e| {
            log::warn!("Could not read scores, starting with none: {e}");
            ScoreLedger::new()
        });

        Ok(Self {
            world,
            clock,
            store,
            ledger,
            player_name: None,
            score_recorded: false,
        })
    }

    /// The player's name, asking `prompt` only if it is not known yet
    pub fn ensure_player_name(&mut self, prompt: &mut impl NamePrompt) -> &str {
        self.player_name.get_or_insert_with(|| {
            prompt
                .request_name()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string())
        })
    }

    pub fn player_name(&self) -> &str {
        self.player_name.as_deref().unwrap_or(DEFAULT_PLAYER_NAME)
    }

    /// Advance one tick at the clock's current reading
    pub fn tick(&mut self, input: &TickInput) -> Result<Frame, ConfigError> {
        let now = self.clock.now();
        let frame = sim::tick(&mut self.world, input, now)?;

        for event in &frame.events {
            if let GameEvent::GameOver { score } = *event {
                self.record_final_score(score);
            }
        }
        Ok(frame)
    }

    /// Tick, then present the result
    pub fn run_frame(
        &mut self,
        input: &TickInput,
        sink: &mut impl RenderSink,
    ) -> Result<(), ConfigError> {
        let frame = self.tick(input)?;
        sink.present(&frame, &self.hud());
        Ok(())
    }

    fn record_final_score(&mut self, score: u64) {
        if self.score_recorded {
            return;
        }
        self.score_recorded = true;

        let name = self.player_name().to_string();
        let timestamp = self.clock.unix_millis();

        // Re-read so entries written since startup are not clobbered
        let mut ledger = match ScoreLedger::load(&self.store) {
            Ok(ledger) => ledger,
            Err(e) => {
                log::warn!("Could not read scores, score {score} for {name} not saved: {e}");
                self.ledger.record_score(&name, score, timestamp);
                return;
            }
        };
        if ledger.record_score(&name, score, timestamp) {
            match ledger.save(&mut self.store) {
                Ok(()) => log::info!("Recorded score {score} for {name}"),
                Err(e) => log::warn!("Could not save score {score} for {name}: {e}"),
            }
        } else {
            log::info!("Score {score} is not a new best for {name}");
        }
        self.ledger = ledger;
    }

    pub fn high_score(&self) -> Option<HighScore> {
        self.ledger.high_score()
    }

    pub fn hud(&self) -> Hud {
        Hud {
            player_name: self.player_name().to_string(),
            high_score: self.high_score().unwrap_or_default(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.world.phase == GamePhase::GameOver
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
