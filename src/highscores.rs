//! Per-player score ledger
//!
//! One entry per player, holding their best score. Persisted as a JSON array
//! under a fixed key.

use serde::{Deserialize, Serialize};

use crate::consts::STORAGE_KEY;
use crate::error::PersistenceError;
use crate::platform::KeyValueStore;

/// A player's best score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub playername: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// The best score across all players
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub playername: String,
    pub max_score: u64,
    pub timestamp: Option<f64>,
}

/// Score ledger
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreLedger {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored best for `playername`
    pub fn score_for(&self, playername: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.playername == playername)
            .map(|e| e.score)
    }

    /// Record a finished session's score
    ///
    /// A new player is always added. An existing player's entry is only
    /// overwritten by a strictly greater score. Returns true if the ledger
    /// changed.
    pub fn record_score(&mut self, playername: &str, score: u64, timestamp: f64) -> bool {
        match self.entries.iter_mut().find(|e| e.playername == playername) {
            Some(entry) if score > entry.score => {
                entry.score = score;
                entry.timestamp = timestamp;
                true
            }
            Some(_) => false,
            None => {
                self.entries.push(ScoreEntry {
                    playername: playername.to_string(),
                    score,
                    timestamp,
                });
                true
            }
        }
    }

    /// Best score overall; `None` until someone scores above zero
    ///
    /// Ties keep the earlier entry.
    pub fn high_score(&self) -> Option<HighScore> {
        let mut best: Option<&ScoreEntry> = None;
        for entry in &self.entries {
            if entry.score > best.map_or(0, |b| b.score) {
                best = Some(entry);
            }
        }
        best.map(|e| HighScore {
            playername: e.playername.clone(),
            max_score: e.score,
            timestamp: Some(e.timestamp),
        })
    }

    /// Load the ledger; a missing key is an empty ledger
    pub fn load(store: &impl KeyValueStore) -> Result<Self, PersistenceError> {
        match store.get_item(STORAGE_KEY)? {
            Some(json) => {
                let ledger: ScoreLedger = serde_json::from_str(&json)?;
                log::info!("Loaded {} score entries", ledger.entries.len());
                Ok(ledger)
            }
            None => {
                log::info!("No scores found, starting fresh");
                Ok(Self::new())
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self)?;
        store.set_item(STORAGE_KEY, &json)?;
        log::info!("Scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_new_player_is_added() {
        let mut ledger = ScoreLedger::new();
        assert!(ledger.record_score("ana", 12, 1.0));
        assert_eq!(ledger.score_for("ana"), Some(12));
        assert_eq!(ledger.entries.len(), 1);
    }

    #[test]
    fn test_lower_or_equal_score_is_ignored() {
        let mut ledger = ScoreLedger::new();
        ledger.record_score("ana", 12, 1.0);

        assert!(!ledger.record_score("ana", 5, 2.0));
        assert!(!ledger.record_score("ana", 12, 3.0));
        assert_eq!(ledger.entries[0].score, 12);
        assert_eq!(ledger.entries[0].timestamp, 1.0);
    }

    #[test]
    fn test_higher_score_overwrites_with_new_timestamp() {
        let mut ledger = ScoreLedger::new();
        ledger.record_score("ana", 12, 1.0);

        assert!(ledger.record_score("ana", 30, 9.0));
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].score, 30);
        assert_eq!(ledger.entries[0].timestamp, 9.0);
    }

    #[test]
    fn test_high_score() {
        let mut ledger = ScoreLedger::new();
        assert_eq!(ledger.high_score(), None);

        ledger.record_score("zero", 0, 1.0);
        assert_eq!(ledger.high_score(), None);

        ledger.record_score("ana", 20, 2.0);
        ledger.record_score("bo", 35, 3.0);
        ledger.record_score("cy", 35, 4.0);
        assert_eq!(
            ledger.high_score(),
            Some(HighScore {
                playername: "bo".to_string(),
                max_score: 35,
                timestamp: Some(3.0),
            })
        );
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = MemoryStore::new();
        assert!(ScoreLedger::load(&store).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut ledger = ScoreLedger::new();
        ledger.record_score("ana", 7, 100.0);
        ledger.save(&mut store).unwrap();

        // Stored as a bare array
        let raw = store.get_item(STORAGE_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));

        assert_eq!(ScoreLedger::load(&store).unwrap(), ledger);
    }

    #[test]
    fn test_corrupt_data() {
        let mut store = MemoryStore::new();
        store.set_item(STORAGE_KEY, "{\"oops\"").unwrap();
        assert!(matches!(
            ScoreLedger::load(&store),
            Err(PersistenceError::Corrupt(_))
        ));
    }
}
