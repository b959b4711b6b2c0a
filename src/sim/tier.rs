//! Bubble value tiers and the spawn-odds table
//!
//! Every bubble carries one tier. The tier fixes its point value and colour;
//! how often each tier spawns comes from a cumulative table rolled with a
//! uniform integer in `[1, 100]`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Sides of the percentile die used for tier rolls
pub const TIER_ROLL_SIDES: u32 = 100;

/// Bubble tiers, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Red,
    Pink,
    Green,
    Blue,
    Black,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::Red, Tier::Pink, Tier::Green, Tier::Blue, Tier::Black];

    /// Points awarded for popping a bubble of this tier (before combo)
    pub fn point_value(&self) -> u32 {
        match self {
            Tier::Red => 1,
            Tier::Pink => 2,
            Tier::Green => 5,
            Tier::Blue => 8,
            Tier::Black => 10,
        }
    }

    /// Display colour (linear RGBA)
    pub fn color(&self) -> [f32; 4] {
        match self {
            Tier::Red => [1.0, 0.0, 0.0, 1.0],
            Tier::Pink => [1.0, 0.75, 0.8, 1.0], // light pink
            Tier::Green => [0.0, 1.0, 0.0, 1.0],
            Tier::Blue => [0.0, 0.0, 1.0, 1.0],
            Tier::Black => [0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Red => "Red",
            Tier::Pink => "Pink",
            Tier::Green => "Green",
            Tier::Blue => "Blue",
            Tier::Black => "Black",
        }
    }
}

/// One row of the spawn table: a tier and its share of the 100-sided roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierOdds {
    pub tier: Tier,
    /// Percent chance (rows must sum to 100)
    pub weight: u32,
}

/// Cumulative spawn-odds table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable {
    pub rows: Vec<TierOdds>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            rows: vec![
                TierOdds { tier: Tier::Red, weight: 40 },
                TierOdds { tier: Tier::Pink, weight: 30 },
                TierOdds { tier: Tier::Green, weight: 15 },
                TierOdds { tier: Tier::Blue, weight: 10 },
                TierOdds { tier: Tier::Black, weight: 5 },
            ],
        }
    }
}

impl TierTable {
    /// Sum of all row weights
    pub fn total_weight(&self) -> u32 {
        self.rows.iter().map(|r| r.weight).sum()
    }

    /// Map a roll in `[1, 100]` onto a tier.
    ///
    /// Rolls past the last row land on the last row, so a table that does not
    /// quite reach 100 still yields a tier.
    pub fn tier_for_roll(&self, roll: u32) -> Option<Tier> {
        let mut ceiling = 0;
        for row in &self.rows {
            ceiling += row.weight;
            if roll <= ceiling {
                return Some(row.tier);
            }
        }
        self.rows.last().map(|r| r.tier)
    }

    /// Roll the percentile die and pick a tier
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Tier {
        let roll = rng.random_range(1..=TIER_ROLL_SIDES);
        // Validated tables are never empty
        self.tier_for_roll(roll).unwrap_or(Tier::Red)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_boundaries() {
        let table = TierTable::default();
        let cases = [
            (1, Tier::Red),
            (40, Tier::Red),
            (41, Tier::Pink),
            (70, Tier::Pink),
            (71, Tier::Green),
            (85, Tier::Green),
            (86, Tier::Blue),
            (95, Tier::Blue),
            (96, Tier::Black),
            (100, Tier::Black),
        ];
        for (roll, tier) in cases {
            assert_eq!(table.tier_for_roll(roll), Some(tier), "roll {roll}");
        }
    }

    #[test]
    fn test_point_values_ascend() {
        let points: Vec<u32> = Tier::ALL.iter().map(|t| t.point_value()).collect();
        assert_eq!(points, vec![1, 2, 5, 8, 10]);
    }

    #[test]
    fn test_default_table_sums_to_100() {
        assert_eq!(TierTable::default().total_weight(), TIER_ROLL_SIDES);
    }

    #[test]
    fn test_sampling_converges_to_table() {
        let table = TierTable::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let draws = 100_000;
        let mut counts = [0u32; 5];
        for _ in 0..draws {
            let tier = table.sample(&mut rng);
            counts[tier as usize] += 1;
        }

        let expected = [0.40, 0.30, 0.15, 0.10, 0.05];
        for (i, &p) in expected.iter().enumerate() {
            let observed = counts[i] as f64 / draws as f64;
            assert!(
                (observed - p).abs() < 0.01,
                "{}: observed {observed:.4}, expected {p}",
                Tier::ALL[i].as_str()
            );
        }
    }

    #[test]
    fn test_empty_table_has_no_tier() {
        let table = TierTable { rows: Vec::new() };
        assert_eq!(table.tier_for_roll(1), None);
    }
}
