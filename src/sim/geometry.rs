//! Axis-aligned rectangles and the playfield bounds
//!
//! Screen coordinates: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// An axis-aligned rectangle (origin + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Square region of edge `size` at `origin`
    pub fn square(origin: Vec2, size: f32) -> Self {
        Self::new(origin, Vec2::splat(size))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Grow outward by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            origin: self.origin - Vec2::splat(margin),
            size: self.size + Vec2::splat(2.0 * margin),
        }
    }

    /// True if the two rects share a region of positive area.
    ///
    /// Rects that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// True if `other` lies entirely inside `self` (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        b_min.x >= a_min.x && b_min.y >= a_min.y && b_max.x <= a_max.x && b_max.y <= a_max.y
    }
}

/// The area bubbles may spawn in.
///
/// A band of `min_y` at the top is reserved for the HUD. A bubble's whole
/// region always fits: its origin ranges over `[0, width - size]` by
/// `[min_y, height - size]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Reserved top margin (no bubble origin above this y)
    pub min_y: f32,
    /// Bubble edge length the bounds were computed for
    pub bubble_size: f32,
}

impl Playfield {
    /// Build a playfield, rejecting one that cannot fit a single bubble
    pub fn new(width: f32, height: f32, min_y: f32, bubble_size: f32) -> Result<Self, ConfigError> {
        let fits = width.is_finite()
            && height.is_finite()
            && min_y >= 0.0
            && width - bubble_size >= 0.0
            && height - bubble_size >= min_y;
        if !fits {
            return Err(ConfigError::PlayfieldTooSmall {
                width,
                height,
                min_y,
                size: bubble_size,
            });
        }
        Ok(Self {
            width,
            height,
            min_y,
            bubble_size,
        })
    }

    /// Range of legal bubble origins, as (min corner, max corner)
    pub fn origin_bounds(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(0.0, self.min_y),
            Vec2::new(self.width - self.bubble_size, self.height - self.bubble_size),
        )
    }

    /// The rectangle every bubble region must stay inside
    pub fn spawn_area(&self) -> Rect {
        Rect::new(
            Vec2::new(0.0, self.min_y),
            Vec2::new(self.width, self.height - self.min_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inflate() {
        let r = Rect::square(Vec2::new(100.0, 100.0), 50.0).inflate(10.0);
        assert_eq!(r.min(), Vec2::new(90.0, 90.0));
        assert_eq!(r.max(), Vec2::new(160.0, 160.0));
    }

    #[test]
    fn test_intersects_overlap_and_edge_contact() {
        let a = Rect::square(Vec2::ZERO, 50.0);
        let b = Rect::square(Vec2::new(25.0, 25.0), 50.0);
        let touching = Rect::square(Vec2::new(50.0, 0.0), 50.0);
        let apart = Rect::square(Vec2::new(200.0, 0.0), 50.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_playfield_bounds() {
        let field = Playfield::new(300.0, 600.0, 200.0, 50.0).unwrap();
        let (min, max) = field.origin_bounds();
        assert_eq!(min, Vec2::new(0.0, 200.0));
        assert_eq!(max, Vec2::new(250.0, 550.0));

        let lowest = Rect::square(max, 50.0);
        assert!(field.spawn_area().contains_rect(&lowest));
    }

    #[test]
    fn test_playfield_too_small() {
        assert!(Playfield::new(40.0, 600.0, 0.0, 50.0).is_err());
        assert!(Playfield::new(300.0, 220.0, 200.0, 50.0).is_err());
        // Exactly one legal position is still a playfield
        assert!(Playfield::new(50.0, 50.0, 0.0, 50.0).is_ok());
    }
}
