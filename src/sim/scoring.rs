//! Scoring session: running score, combo streak and high score
//!
//! A combo is two consecutive pops of the same tier, wherever the bubbles
//! were on screen. Each combo pop earns the configured multiplier.

use serde::{Deserialize, Serialize};

use super::state::Bubble;
use super::tier::Tier;
use crate::highscores::GameScore;
use crate::round_to_tenth;
use crate::tuning::GameConfig;

/// Outcome of a single pop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDelta {
    /// Points added by this pop (multiplier applied)
    pub points: f64,
    /// Whether this pop repeated the previous tier
    pub combo: bool,
    /// Streak after this pop (0 on a tier change)
    pub combo_streak: u32,
    /// Running score after this pop
    pub score: f64,
    /// True if this pop raised the high score
    pub new_high_score: bool,
}

/// Score state for one game. Consumed by [`ScoringSession::finish`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSession {
    combo_multiplier: f64,
    score: f64,
    last_popped_tier: Option<Tier>,
    combo_streak: u32,
    high_score: f64,
}

impl ScoringSession {
    /// Start a session against the best score recorded so far
    pub fn new(config: &GameConfig, high_score: f64) -> Self {
        Self {
            combo_multiplier: config.combo_multiplier,
            score: 0.0,
            last_popped_tier: None,
            combo_streak: 0,
            high_score,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn combo_streak(&self) -> u32 {
        self.combo_streak
    }

    pub fn last_popped_tier(&self) -> Option<Tier> {
        self.last_popped_tier
    }

    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    /// Score a popped bubble
    pub fn register_pop(&mut self, bubble: &Bubble) -> ScoreDelta {
        self.register_tier(bubble.tier)
    }

    /// Score a pop of the given tier
    pub fn register_tier(&mut self, tier: Tier) -> ScoreDelta {
        let combo = self.last_popped_tier == Some(tier);
        let multiplier = if combo { self.combo_multiplier } else { 1.0 };

        let points = tier.point_value() as f64 * multiplier;
        self.score += points;

        if combo {
            self.combo_streak += 1;
        } else {
            self.combo_streak = 0;
        }
        self.last_popped_tier = Some(tier);

        let new_high_score = self.refresh_high_score();

        ScoreDelta {
            points,
            combo,
            combo_streak: self.combo_streak,
            score: self.score,
            new_high_score,
        }
    }

    /// Raise the high score to the rounded current score if it beats it
    fn refresh_high_score(&mut self) -> bool {
        let rounded = round_to_tenth(self.score);
        if rounded > self.high_score {
            self.high_score = rounded;
            true
        } else {
            false
        }
    }

    /// End the session and produce the record to persist
    pub fn finish(self, name: impl Into<String>) -> GameScore {
        GameScore {
            name: name.into(),
            score: round_to_tenth(self.score),
        }
    }
}
