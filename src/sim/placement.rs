//! Bubble placement engine
//!
//! Places a random-sized batch of non-overlapping bubbles with a bounded
//! retry search. The attempt budget is the only guard against impossible
//! density requests: a crowded playfield fails fast instead of looping.

use glam::Vec2;
use rand::Rng;
use thiserror::Error;

use super::collision::overlaps_any;
use super::geometry::{Playfield, Rect};
use super::state::{Bubble, BubbleId};
use crate::tuning::{ConfigError, GameConfig};

#[derive(Debug, Error, PartialEq)]
pub enum PlacementError {
    /// A single bubble found no free spot within the attempt budget
    #[error("bubble placement exhausted after {attempts} attempts ({placed} already placed)")]
    PlacementExhausted { placed: usize, attempts: u32 },
    /// The playfield's bounds were computed for a different bubble size
    #[error("playfield is laid out for {playfield} unit bubbles, engine places {engine}")]
    PlayfieldMismatch { playfield: f32, engine: f32 },
}

/// Places bubbles and keeps them until cleared
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    config: GameConfig,
    /// Bubbles from successful batches, in placement order
    bubbles: Vec<Bubble>,
    next_id: BubbleId,
}

impl PlacementEngine {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            bubbles: Vec::new(),
            next_id: 1,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Bubbles currently on the playfield
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Playfield sized for this engine's bubbles
    pub fn playfield(&self, width: f32, height: f32, min_y: f32) -> Result<Playfield, ConfigError> {
        Playfield::new(width, height, min_y, self.config.bubble_size)
    }

    /// Generate a batch of between 1 and `requested_max` bubbles.
    ///
    /// Each bubble's tier is rolled once, then positions are sampled until its
    /// margin-inflated region clears every bubble already placed in this
    /// batch. If any bubble exhausts the attempt budget the whole batch is
    /// dropped and nothing is retained. The playfield must have been built
    /// for this engine's bubble size (see [`PlacementEngine::playfield`]).
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        requested_max: u32,
        playfield: &Playfield,
    ) -> Result<Vec<Bubble>, PlacementError> {
        let size = self.config.bubble_size;
        if playfield.bubble_size != size {
            return Err(PlacementError::PlayfieldMismatch {
                playfield: playfield.bubble_size,
                engine: size,
            });
        }
        if requested_max == 0 {
            return Ok(Vec::new());
        }

        let count = rng.random_range(1..=requested_max) as usize;
        let margin = self.config.overlap_margin;
        let (min, max) = playfield.origin_bounds();

        // Grown as bubbles land; `count` may be far more than the field holds
        let mut batch: Vec<Bubble> = Vec::new();
        let mut regions: Vec<Rect> = Vec::new();
        let mut next_id = self.next_id;

        for placed in 0..count {
            let tier = self.config.tiers.sample(rng);

            let mut spot = None;
            for _ in 0..self.config.max_attempts {
                let origin = Vec2::new(
                    sample_axis(rng, min.x, max.x),
                    sample_axis(rng, min.y, max.y),
                );
                let region = Rect::square(origin, size);
                if !overlaps_any(&region, &regions, margin) {
                    spot = Some(region);
                    break;
                }
            }

            let Some(region) = spot else {
                log::debug!(
                    "Placement gave up on bubble {} of {} ({} attempts)",
                    placed + 1,
                    count,
                    self.config.max_attempts
                );
                return Err(PlacementError::PlacementExhausted {
                    placed,
                    attempts: self.config.max_attempts,
                });
            };

            regions.push(region);
            batch.push(Bubble {
                id: next_id,
                region,
                tier,
            });
            next_id = next_id.wrapping_add(1);
        }

        self.next_id = next_id;
        self.bubbles.extend(batch.iter().cloned());
        log::debug!("Placed {} of max {} bubbles", batch.len(), requested_max);
        Ok(batch)
    }

    /// Remove a single bubble (popped). Returns `None` if it is gone already.
    pub fn take(&mut self, id: BubbleId) -> Option<Bubble> {
        let index = self.bubbles.iter().position(|b| b.id == id)?;
        Some(self.bubbles.remove(index))
    }

    /// Remove every bubble (start of a new generation pass)
    pub fn clear(&mut self) {
        self.bubbles.clear();
    }
}

/// Uniform sample in `[lo, hi]`, tolerating a zero-width range
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}
