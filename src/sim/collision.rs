//! Proximity tests shared by every system
//!
//! Hit detection is box-shaped: two points collide when both axis deltas
//! are under the threshold.

use glam::Vec2;

/// Axis-aligned proximity: `|Δx| < threshold ∧ |Δy| < threshold`
#[inline]
pub fn within_box(a: Vec2, b: Vec2, threshold: f32) -> bool {
    (a.x - b.x).abs() < threshold && (a.y - b.y).abs() < threshold
}

/// Inclusive circular proximity (used by the dash AoE)
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}

/// Closest point to `point` on the segment `[start, end]`
///
/// The projection parameter is clamped to `[0, 1]`. A degenerate segment
/// collapses to its start point.
pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let segment = end - start;
    let length_sq = segment.length_squared();
    if length_sq <= f32::EPSILON {
        return start;
    }
    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    start + segment * t
}

/// Distance from `point` to the segment `[start, end]`
#[inline]
pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    point.distance(closest_point_on_segment(point, start, end))
}

/// Unit vector from `from` toward `to`, or zero when they coincide
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_is_strict() {
        let a = Vec2::ZERO;
        assert!(within_box(a, Vec2::new(0.069, -0.069), 0.07));
        assert!(!within_box(a, Vec2::new(0.07, 0.0), 0.07));
        // Diagonal corner still counts, unlike a circle test
        assert!(within_box(a, Vec2::new(0.06, 0.06), 0.07));
    }

    #[test]
    fn test_radius_is_inclusive() {
        assert!(within_radius(Vec2::ZERO, Vec2::new(0.5, 0.0), 0.5));
        assert!(!within_radius(Vec2::ZERO, Vec2::new(0.5001, 0.0), 0.5));
    }

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(1.0, 0.0);
        assert_eq!(closest_point_on_segment(Vec2::new(-2.0, 1.0), start, end), start);
        assert_eq!(closest_point_on_segment(Vec2::new(3.0, -1.0), start, end), end);
        assert_eq!(closest_point_on_segment(Vec2::new(0.25, 0.4), start, end), Vec2::new(0.25, 0.0));
    }

    #[test]
    fn test_segment_distance() {
        let start = Vec2::new(-0.5, 0.2);
        let end = Vec2::new(0.5, 0.2);
        assert!((distance_to_segment(Vec2::new(0.0, 0.5), start, end) - 0.3).abs() < 1e-6);
        assert!((distance_to_segment(Vec2::new(0.9, 0.2), start, end) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec2::new(0.3, 0.4);
        assert!((distance_to_segment(p, Vec2::ZERO, Vec2::ZERO) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_heading_guards_zero_length() {
        assert_eq!(heading(Vec2::ONE, Vec2::ONE), Vec2::ZERO);
        let h = heading(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((h - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }
}
