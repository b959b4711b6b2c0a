//! Bubble records handed across the display boundary
//!
//! A bubble is plain data: the display layer draws it and reports pops back
//! by id. It never changes once placed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::tier::Tier;

/// Opaque bubble identity, unique for the lifetime of an engine
pub type BubbleId = u32;

/// A placed, poppable bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: BubbleId,
    /// Square hit region (the bubble is the inscribed circle)
    pub region: Rect,
    pub tier: Tier,
}

impl Bubble {
    pub fn point_value(&self) -> u32 {
        self.tier.point_value()
    }

    pub fn color(&self) -> [f32; 4] {
        self.tier.color()
    }

    pub fn center(&self) -> Vec2 {
        self.region.center()
    }

    pub fn radius(&self) -> f32 {
        self.region.size.x.min(self.region.size.y) * 0.5
    }

    /// Circular hit test, for drivers that forward raw taps
    pub fn hit(&self, point: Vec2) -> bool {
        self.center().distance_squared(point) <= self.radius() * self.radius()
    }
}
