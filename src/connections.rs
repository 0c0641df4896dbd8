//! Proximity links between particles and to the cursor.
//!
//! The pair scan visits every unordered pair once, so it is O(n²) in the
//! particle count. With the default 120 particles that is 7140 distance
//! checks per frame; fields of a few thousand particles would want a
//! spatial grid instead.

use glam::Vec2;

use crate::particle::Particle;
use crate::physics::proximity;

/// A link between particles `a` and `b`, with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    /// Opacity factor in `[0, 1)`: 1 for coincident particles, 0 at the threshold.
    pub strength: f32,
}

/// A line from a particle to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorLink {
    pub index: usize,
    pub distance: f32,
    /// `1 - distance / radius`, in `(0, 1]`.
    pub proximity: f32,
}

/// Linear falloff of a link: `1 - d / max`, or 0 at and beyond `max`.
#[inline]
pub fn link_strength(distance: f32, max_distance: f32) -> f32 {
    if distance < max_distance {
        1.0 - distance / max_distance
    } else {
        0.0
    }
}

/// All unordered pairs closer than `max_distance`.
pub fn find_connections(particles: &[Particle], max_distance: f32) -> Vec<Connection> {
    let mut connections = Vec::new();
    let max_sq = max_distance * max_distance;

    for (i, pi) in particles.iter().enumerate() {
        for (j, pj) in particles.iter().enumerate().skip(i + 1) {
            let dist_sq = pi.position.distance_squared(pj.position);
            if dist_sq >= max_sq {
                continue;
            }
            let distance = dist_sq.sqrt();
            connections.push(Connection {
                a: i,
                b: j,
                distance,
                strength: link_strength(distance, max_distance),
            });
        }
    }

    connections
}

/// Every particle strictly within `radius` of `pointer`.
pub fn cursor_links(particles: &[Particle], pointer: Vec2, radius: f32) -> Vec<CursorLink> {
    particles
        .iter()
        .enumerate()
        .filter_map(|(index, p)| {
            let distance = p.position.distance(pointer);
            (distance < radius).then(|| CursorLink {
                index,
                distance,
                proximity: proximity(distance, radius),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dots(points: &[(f32, f32)]) -> Vec<Particle> {
        points
            .iter()
            .map(|&(x, y)| Particle::at(Vec2::new(x, y)))
            .collect()
    }

    #[test]
    fn test_pairs_are_unique_and_ordered() {
        let ps = dots(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (500.0, 500.0)]);
        let conns = find_connections(&ps, 140.0);

        assert_eq!(conns.len(), 3);
        assert!(conns.iter().all(|c| c.a < c.b));
        assert!(conns.iter().all(|c| c.b != 3));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let ps = dots(&[(0.0, 0.0), (140.0, 0.0)]);
        assert!(find_connections(&ps, 140.0).is_empty());
        assert_eq!(link_strength(140.0, 140.0), 0.0);
    }

    #[test]
    fn test_strength_falls_off_linearly() {
        assert_eq!(link_strength(0.0, 140.0), 1.0);
        assert!((link_strength(70.0, 140.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cursor_links() {
        let ps = dots(&[(0.0, 0.0), (100.0, 0.0), (300.0, 0.0)]);
        let links = cursor_links(&ps, Vec2::ZERO, 250.0);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].proximity, 1.0);
        assert!((links[1].proximity - 0.6).abs() < 1e-6);
    }
}
