//! Data-driven game balance
//!
//! One structure holds every knob the placement engine and scoring session
//! read, so both are built from the same numbers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::tier::{TIER_ROLL_SIDES, TierTable};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tier weights sum to {0}, expected 100")]
    TierWeights(u32),
    #[error("bubble size must be positive, got {0}")]
    BubbleSize(f32),
    #[error("overlap margin must not be negative, got {0}")]
    OverlapMargin(f32),
    #[error("attempt budget must be at least 1")]
    AttemptBudget,
    #[error("combo multiplier must be finite and at least 1, got {0}")]
    ComboMultiplier(f64),
    #[error("playfield {width}x{height} with top margin {min_y} cannot hold a {size} bubble")]
    PlayfieldTooSmall {
        width: f32,
        height: f32,
        min_y: f32,
        size: f32,
    },
}

/// Balance settings shared by placement and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Edge length of a bubble's square hit region
    pub bubble_size: f32,
    /// Gap added around each bubble on every side for the overlap test
    pub overlap_margin: f32,
    /// Position attempts allowed per bubble
    pub max_attempts: u32,
    /// Multiplier applied to a pop that repeats the previous tier
    pub combo_multiplier: f64,
    /// Tier spawn odds
    pub tiers: TierTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bubble_size: BUBBLE_SIZE,
            overlap_margin: OVERLAP_MARGIN,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
            combo_multiplier: COMBO_MULTIPLIER,
            tiers: TierTable::default(),
        }
    }
}

impl GameConfig {
    /// Check the invariants the engine and session rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.tiers.total_weight();
        if total != TIER_ROLL_SIDES {
            return Err(ConfigError::TierWeights(total));
        }
        if !(self.bubble_size > 0.0 && self.bubble_size.is_finite()) {
            return Err(ConfigError::BubbleSize(self.bubble_size));
        }
        if !(self.overlap_margin >= 0.0 && self.overlap_margin.is_finite()) {
            return Err(ConfigError::OverlapMargin(self.overlap_margin));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::AttemptBudget);
        }
        if !(self.combo_multiplier >= 1.0 && self.combo_multiplier.is_finite()) {
            return Err(ConfigError::ComboMultiplier(self.combo_multiplier));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tier::{Tier, TierOdds};

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_weights() {
        let mut config = GameConfig::default();
        config.tiers.rows.push(TierOdds {
            tier: Tier::Black,
            weight: 5,
        });
        assert_eq!(config.validate(), Err(ConfigError::TierWeights(105)));
    }

    #[test]
    fn test_rejects_zero_budget_and_size() {
        let config = GameConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::AttemptBudget));

        let config = GameConfig {
            bubble_size: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BubbleSize(0.0)));
    }
}
