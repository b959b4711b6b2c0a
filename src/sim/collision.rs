//! Overlap tests between bubble regions
//!
//! Bubbles are kept visually apart, not merely non-touching: each region is
//! grown by the overlap margin before the intersection test.

use super::geometry::Rect;

/// True if `a` and `b` collide once both are inflated by `margin`
#[inline]
pub fn regions_overlap(a: &Rect, b: &Rect, margin: f32) -> bool {
    a.inflate(margin).intersects(&b.inflate(margin))
}

/// True if `candidate` collides with any region in `placed`
pub fn overlaps_any<'a, I>(candidate: &Rect, placed: I, margin: f32) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    let inflated = candidate.inflate(margin);
    placed
        .into_iter()
        .any(|other| inflated.intersects(&other.inflate(margin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_margin_separates_near_bubbles() {
        let a = Rect::square(Vec2::new(0.0, 0.0), 50.0);
        // 15 units apart: clear without a margin, too close with 10 on each side
        let b = Rect::square(Vec2::new(65.0, 0.0), 50.0);
        assert!(!regions_overlap(&a, &b, 0.0));
        assert!(regions_overlap(&a, &b, 10.0));
    }

    #[test]
    fn test_gap_of_twice_margin_is_clear() {
        let a = Rect::square(Vec2::new(0.0, 0.0), 50.0);
        let b = Rect::square(Vec2::new(70.0, 0.0), 50.0);
        assert!(!regions_overlap(&a, &b, 10.0));
    }

    #[test]
    fn test_overlaps_any() {
        let placed = [
            Rect::square(Vec2::new(0.0, 0.0), 50.0),
            Rect::square(Vec2::new(200.0, 200.0), 50.0),
        ];
        let near_second = Rect::square(Vec2::new(240.0, 240.0), 50.0);
        let far = Rect::square(Vec2::new(100.0, 400.0), 50.0);

        assert!(overlaps_any(&near_second, &placed, 10.0));
        assert!(!overlaps_any(&far, &placed, 10.0));
        assert!(!overlaps_any(&far, &[], 10.0));
    }
}
