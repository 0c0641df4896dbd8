//! Particle emitter.
//!
//! The emitter populates a fresh [`ParticleSet`] for a surface. It runs once
//! at startup and again on every resize: the old collection is dropped and a
//! new one drawn, never resized in place.
//!
//! Every parameter is drawn independently per particle from the ranges in
//! [`SpawnConfig`], so no two particles share a twinkle rhythm or orbit.
//!
//! # Example
//!
//! ```
//! use starfield::{Emitter, SpawnConfig};
//!
//! let mut emitter = Emitter::new(SpawnConfig::default(), Some(42));
//! let particles = emitter.initialize(800.0, 600.0, 120);
//! assert_eq!(particles.len(), 120);
//! ```

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{SampleRange, SpawnConfig};
use crate::particle::{Particle, ParticleSet};

/// Spawns particles uniformly over a surface.
#[derive(Debug)]
pub struct Emitter {
    spawn: SpawnConfig,
    rng: StdRng,
}

impl Emitter {
    /// Create an emitter. With a seed the sequence of fields is reproducible.
    pub fn new(spawn: SpawnConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { spawn, rng }
    }

    /// Draw `count` particles with positions uniform over `[0, width) × [0, height)`.
    pub fn initialize(&mut self, width: f32, height: f32, count: usize) -> ParticleSet {
        let xs = SampleRange::new(0.0, width.max(0.0));
        let ys = SampleRange::new(0.0, height.max(0.0));

        (0..count)
            .map(|_| {
                let position = Vec2::new(xs.sample(&mut self.rng), ys.sample(&mut self.rng));
                self.spawn_at(position)
            })
            .collect()
    }

    fn spawn_at(&mut self, position: Vec2) -> Particle {
        let s = &self.spawn;
        let rng = &mut self.rng;

        let velocity = Vec2::new(s.velocity.sample(rng), s.velocity.sample(rng));
        let base_radius = s.base_radius.sample(rng);
        let base_alpha = s.base_alpha.sample(rng);

        Particle {
            position,
            velocity,
            base_radius,
            radius: base_radius,
            base_alpha,
            alpha: base_alpha,
            twinkle_speed: s.twinkle_speed.sample(rng),
            twinkle_phase: s.twinkle_phase.sample(rng),
            orbit_radius: s.orbit_radius.sample(rng),
            orbit_speed: s.orbit_speed.sample(rng),
            orbit_angle: s.orbit_angle.sample(rng),
        }
    }
}
