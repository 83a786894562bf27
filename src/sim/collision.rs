//! Proximity queries shared by every entity update
//!
//! All scans are linear over the current collections and deterministic:
//! candidates are visited in collection order and ties keep the first found.

use glam::Vec2;

/// Find the candidate strictly closer than `max_distance`, nearest first.
///
/// Returns the candidate's key and its distance. Equal distances keep the
/// earlier candidate.
pub fn nearest<K, I>(from: Vec2, candidates: I, max_distance: f32) -> Option<(K, f32)>
where
    I: IntoIterator<Item = (K, Vec2)>,
{
    let mut best: Option<(K, f32)> = None;
    let mut min_distance = max_distance;
    for (key, pos) in candidates {
        let distance = from.distance(pos);
        if distance < min_distance {
            min_distance = distance;
            best = Some((key, distance));
        }
    }
    best
}

/// First candidate (in scan order, not nearest) strictly within `radius`
pub fn first_within<K, I>(from: Vec2, candidates: I, radius: f32) -> Option<K>
where
    I: IntoIterator<Item = (K, Vec2)>,
{
    candidates
        .into_iter()
        .find(|(_, pos)| from.distance(*pos) < radius)
        .map(|(key, _)| key)
}

/// Whether a point lies outside the arena rectangle `[0, width] x [0, height]`
#[inline]
pub fn out_of_bounds(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x < 0.0 || pos.x > width || pos.y < 0.0 || pos.y > height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_respects_range() {
        let points = [Vec2::new(200.0, 0.0), Vec2::new(100.0, 0.0)];
        let hit = nearest(Vec2::ZERO, points.iter().copied().enumerate(), 150.0);
        assert_eq!(hit.map(|(i, _)| i), Some(1));

        let miss = nearest(Vec2::ZERO, points.iter().copied().enumerate(), 50.0);
        assert!(miss.is_none());
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let points = [Vec2::new(10.0, 0.0), Vec2::new(-10.0, 0.0)];
        let hit = nearest(Vec2::ZERO, points.iter().copied().enumerate(), f32::INFINITY);
        assert_eq!(hit.map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_nearest_range_is_strict() {
        let points = [Vec2::new(150.0, 0.0)];
        assert!(nearest(Vec2::ZERO, points.iter().copied().enumerate(), 150.0).is_none());
    }

    #[test]
    fn test_first_within_is_scan_order() {
        // Second point is closer, but the first is also in range
        let points = [Vec2::new(15.0, 0.0), Vec2::new(1.0, 0.0)];
        let hit = first_within(Vec2::ZERO, points.iter().copied().enumerate(), 20.0);
        assert_eq!(hit, Some(0));
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(!out_of_bounds(Vec2::new(0.0, 600.0), 800.0, 600.0));
        assert!(out_of_bounds(Vec2::new(-0.1, 10.0), 800.0, 600.0));
        assert!(out_of_bounds(Vec2::new(10.0, 600.5), 800.0, 600.0));
    }
}
