//! Seeded simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only (injected, never global)
//! - One tick per second of game time, driven from outside
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod placement;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod tier;

pub use collision::{overlaps_any, regions_overlap};
pub use geometry::{Playfield, Rect};
pub use placement::{PlacementEngine, PlacementError};
pub use scoring::{ScoreDelta, ScoringSession};
pub use state::{Bubble, BubbleId};
pub use tick::{Frame, Game, GamePhase, Screen, StartError, TickOutcome};
pub use tier::{Tier, TierOdds, TierTable};
