//! Random placement helpers shared by enemies, the boss and orbs

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::Playfield;

/// Screen edge an entity enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Uniform choice, 25% each
    pub fn random(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..4u8) {
            0 => Edge::Top,
            1 => Edge::Bottom,
            2 => Edge::Left,
            _ => Edge::Right,
        }
    }
}

/// Uniform sample from `[lo, hi]`, collapsing to `lo` for an empty range
pub fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

/// Point just past `edge`, `buffer` off-screen, inset by `inset` along the edge
pub fn edge_point(rng: &mut Pcg32, field: Playfield, edge: Edge, inset: f32, buffer: f32) -> Vec2 {
    let a = field.aspect;
    match edge {
        Edge::Top => Vec2::new(uniform(rng, -a + inset, a - inset), 1.0 + buffer),
        Edge::Bottom => Vec2::new(uniform(rng, -a + inset, a - inset), -1.0 - buffer),
        Edge::Left => Vec2::new(-a - buffer, uniform(rng, -1.0 + inset, 1.0 - inset)),
        Edge::Right => Vec2::new(a + buffer, uniform(rng, -1.0 + inset, 1.0 - inset)),
    }
}

/// Random edge, then a point on it
pub fn random_edge_point(rng: &mut Pcg32, field: Playfield, inset: f32, buffer: f32) -> Vec2 {
    let edge = Edge::random(rng);
    edge_point(rng, field, edge, inset, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_edge_points_sit_off_screen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = Playfield::new(1.5);
        for _ in 0..200 {
            let p = random_edge_point(&mut rng, field, 0.1, 0.1);
            let off_x = (p.x.abs() - 1.6).abs() < 1e-6;
            let off_y = (p.y.abs() - 1.1).abs() < 1e-6;
            assert!(off_x || off_y, "{p:?} should be on an edge band");
            assert!(p.x.abs() <= 1.6 + 1e-6 && p.y.abs() <= 1.1 + 1e-6);
        }
    }

    #[test]
    fn test_every_edge_is_used() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..100 {
            let idx = match Edge::random(&mut rng) {
                Edge::Top => 0,
                Edge::Bottom => 1,
                Edge::Left => 2,
                Edge::Right => 3,
            };
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_uniform_empty_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(uniform(&mut rng, 0.5, 0.5), 0.5);
        assert_eq!(uniform(&mut rng, 0.5, 0.1), 0.5);
    }
}
