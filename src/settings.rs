//! Per-player game settings
//!
//! Chosen before a game starts: who is playing, how long the game lasts and
//! how many bubbles a batch may hold.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_DURATION_SECS, DEFAULT_MAX_BUBBLES};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("a player name is required")]
    NameRequired,
    #[error("game duration must be at least one second")]
    ZeroDuration,
    #[error("max bubbles must be at least 1")]
    ZeroMaxBubbles,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Name recorded with the final score
    pub player_name: String,
    /// Game length in seconds (one tick per second)
    pub duration_secs: u32,
    /// Upper bound on bubbles per batch
    pub max_bubbles: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            duration_secs: DEFAULT_DURATION_SECS,
            max_bubbles: DEFAULT_MAX_BUBBLES,
        }
    }
}

impl Settings {
    /// Default settings for a named player
    pub fn for_player(name: impl Into<String>) -> Self {
        Self {
            player_name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn with_max_bubbles(mut self, max: u32) -> Self {
        self.max_bubbles = max;
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player_name.trim().is_empty() {
            return Err(SettingsError::NameRequired);
        }
        if self.duration_secs == 0 {
            return Err(SettingsError::ZeroDuration);
        }
        if self.max_bubbles == 0 {
            return Err(SettingsError::ZeroMaxBubbles);
        }
        Ok(())
    }
}
