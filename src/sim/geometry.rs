//! 2D intersection primitives for hit tests
//!
//! Boundary contact is not an intersection: segments that merely
//! touch (or are collinear) do not cross, and circles that exactly touch do
//! not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (min = top-left, max = bottom-right)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box from its top-left corner and size
    pub fn from_corner(top_left: Vec2, size: Vec2) -> Self {
        Self {
            min: top_left,
            max: top_left + size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Edges inclusive
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Signed area of the triangle (a, b, c); the sign tells which side of ab c is on
#[inline]
fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

#[inline]
fn opposite_sides(d1: f32, d2: f32) -> bool {
    (d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0)
}

/// Proper crossing of segment p1-p2 with segment p3-p4
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d1 = cross(p1, p2, p3);
    let d2 = cross(p1, p2, p4);
    let d3 = cross(p3, p4, p1);
    let d4 = cross(p3, p4, p2);

    opposite_sides(d1, d2) && opposite_sides(d3, d4)
}

/// Segment against the four edges of a rectangle
///
/// A segment lying entirely inside the rectangle crosses no edge and is
/// therefore not reported.
pub fn segment_intersects_rect(start: Vec2, end: Vec2, rect: &Rect) -> bool {
    let top_left = rect.min;
    let top_right = Vec2::new(rect.max.x, rect.min.y);
    let bottom_left = Vec2::new(rect.min.x, rect.max.y);
    let bottom_right = rect.max;

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, bottom_left, bottom_right)
        || segments_intersect(start, end, top_left, bottom_left)
        || segments_intersect(start, end, top_right, bottom_right)
}

/// Circles overlap when their centers are strictly closer than the radii sum
#[inline]
pub fn circles_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    c1.distance(c2) < r1 + r2
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crossing_segments() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
        ));
    }

    #[test]
    fn test_parallel_segments() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(10.0, 5.0),
        ));
    }

    #[test]
    fn test_touching_endpoint_is_not_intersection() {
        // T-junction: second segment ends exactly on the first
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 10.0),
        ));
    }

    #[test]
    fn test_collinear_overlap_is_not_intersection() {
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(15.0, 0.0),
        ));
    }

    #[test]
    fn test_segment_through_rect() {
        let rect = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::splat(16.0));
        assert!(segment_intersects_rect(
            Vec2::new(0.0, 50.0),
            Vec2::new(100.0, 50.0),
            &rect
        ));
    }

    #[test]
    fn test_segment_inside_rect_not_reported() {
        let rect = Rect::new(Vec2::ZERO, Vec2::splat(100.0));
        assert!(!segment_intersects_rect(
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 20.0),
            &rect
        ));
    }

    #[test]
    fn test_segment_missing_rect() {
        let rect = Rect::new(Vec2::ZERO, Vec2::splat(16.0));
        assert!(!segment_intersects_rect(
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 100.0),
            &rect
        ));
    }

    #[test]
    fn test_circles_overlap_strict() {
        assert!(circles_overlap(Vec2::ZERO, 8.0, Vec2::new(9.0, 0.0), 2.0));
        assert!(!circles_overlap(Vec2::ZERO, 8.0, Vec2::new(10.0, 0.0), 2.0));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::from_corner(Vec2::new(10.0, 10.0), Vec2::new(100.0, 50.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(110.0, 60.0)));
        assert!(!rect.contains(Vec2::new(111.0, 60.0)));
        assert_eq!(rect.size(), Vec2::new(100.0, 50.0));
    }

    fn point() -> impl Strategy<Value = Vec2> {
        (-500i32..500, -500i32..500).prop_map(|(x, y)| Vec2::new(x as f32, y as f32))
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in point(), b in point(), c in point(), d in point()) {
            let forward = segments_intersect(a, b, c, d);
            prop_assert_eq!(forward, segments_intersect(c, d, a, b));
            prop_assert_eq!(forward, segments_intersect(b, a, d, c));
        }

        #[test]
        fn prop_circle_overlap_is_symmetric(
            a in point(),
            b in point(),
            r1 in 1.0f32..50.0,
            r2 in 1.0f32..50.0,
        ) {
            prop_assert_eq!(circles_overlap(a, r1, b, r2), circles_overlap(b, r2, a, r1));
        }
    }
}
