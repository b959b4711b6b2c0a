//! Bubble Pop - a timed bubble-popping arcade core
//!
//! Core modules:
//! - `sim`: Seeded simulation (bubble placement, combo scoring, countdown driver)
//! - `tuning`: Data-driven game balance (tier odds, margins, budgets)
//! - `settings`: Per-player choices made before a game
//! - `highscores`: High score table on top of a key-value store
//! - `persistence`: Key-value storage backends

pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{GameScore, HighScoreTable, StoreError};
pub use settings::{Settings, SettingsError};
pub use tuning::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Bubble edge length (bubbles are circles inscribed in a square region)
    pub const BUBBLE_SIZE: f32 = 50.0;
    /// Gap kept around every bubble when testing for overlap
    pub const OVERLAP_MARGIN: f32 = 10.0;
    /// Position attempts per bubble before a batch is abandoned
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 150;
    /// Score multiplier for popping the same tier twice in a row
    pub const COMBO_MULTIPLIER: f64 = 1.5;

    /// Top band of the screen reserved for the HUD
    pub const PLAYFIELD_TOP_MARGIN: f32 = 200.0;

    /// Default game length (one tick per second)
    pub const DEFAULT_DURATION_SECS: u32 = 60;
    /// Default upper bound on bubbles per batch
    pub const DEFAULT_MAX_BUBBLES: u32 = 15;
    /// Remaining seconds at which bubbles start floating twice as fast
    pub const HURRY_UP_SECS: u32 = 15;
    /// Seconds a bubble takes to float off screen
    pub const FLOAT_DURATION_SECS: f32 = 10.0;
    /// Float duration once the hurry-up threshold is reached
    pub const HURRY_FLOAT_DURATION_SECS: f32 = 5.0;
}

/// Round to one decimal place, ties away from zero.
///
/// Used for both the live high-score comparison and the persisted score.
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(2.5), 2.5);
        assert_eq!(round_to_tenth(1.25), 1.3);
        assert_eq!(round_to_tenth(4.04), 4.0);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }
}
