//! High score table
//!
//! Every finished game appends one `{name, score}` record. The table is a
//! JSON array stored under a single key of a [`KeyValueStore`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::KeyValueStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A blob is stored but is not a valid score list
    #[error("failed to decode high scores: {0}")]
    Decode(#[source] serde_json::Error),
    /// The score list could not be encoded
    #[error("failed to encode high scores: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("high score storage: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished game's result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub name: String,
    /// Final score, rounded to one decimal place
    pub score: f64,
}

impl GameScore {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// High score history backed by a key-value store
#[derive(Debug, Clone)]
pub struct HighScoreTable<S> {
    store: S,
}

impl<S: KeyValueStore> HighScoreTable<S> {
    /// Storage key for the score list
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All records in insertion order. Empty if nothing has been stored yet.
    pub fn load(&self) -> Result<Vec<GameScore>, StoreError> {
        match self.store.get(Self::STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(StoreError::Decode),
            None => Ok(Vec::new()),
        }
    }

    /// Append a record to the stored list.
    ///
    /// A malformed existing blob is reported and left in place rather than
    /// overwritten.
    pub fn append(&mut self, record: GameScore) -> Result<(), StoreError> {
        if !record.score.is_finite() {
            return Err(StoreError::Encode(serde::ser::Error::custom(format!(
                "score {} is not a finite number",
                record.score
            ))));
        }

        let mut scores = self.load()?;
        scores.push(record);
        let json = serde_json::to_string(&scores).map_err(StoreError::Encode)?;
        self.store.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }

    /// Forget every record
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(Self::STORAGE_KEY)?;
        log::info!("High scores cleared");
        Ok(())
    }

    /// Best score on record, 0 if there is none
    pub fn read_high_score(&self) -> Result<f64, StoreError> {
        let scores = self.load()?;
        Ok(scores.iter().map(|s| s.score).fold(0.0, f64::max))
    }

    /// Records best first (ties keep insertion order)
    pub fn ranked(&self) -> Result<Vec<GameScore>, StoreError> {
        let mut scores = self.load()?;
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scores)
    }
}
