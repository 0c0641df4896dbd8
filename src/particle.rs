//! The particle record.

use glam::Vec2;

/// One simulated point of the field.
///
/// `radius` and `alpha` are derived every tick from their `base_*`
/// counterparts; everything else except `position`, `velocity` and
/// `orbit_angle` is fixed at spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub base_radius: f32,
    pub radius: f32,
    pub base_alpha: f32,
    pub alpha: f32,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub orbit_angle: f32,
}

/// The particle collection of one surface-size epoch.
pub type ParticleSet = Vec<Particle>;

impl Particle {
    /// A motionless particle with no twinkle or orbit.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            base_radius: 1.0,
            radius: 1.0,
            base_alpha: 0.5,
            alpha: 0.5,
            twinkle_speed: 0.0,
            twinkle_phase: 0.0,
            orbit_radius: 0.0,
            orbit_speed: 0.0,
            orbit_angle: 0.0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set base and current radius/alpha together.
    pub fn with_appearance(mut self, radius: f32, alpha: f32) -> Self {
        self.base_radius = radius;
        self.radius = radius;
        self.base_alpha = alpha;
        self.alpha = alpha;
        self
    }

    pub fn with_twinkle(mut self, speed: f32, phase: f32) -> Self {
        self.twinkle_speed = speed;
        self.twinkle_phase = phase;
        self
    }

    pub fn with_orbit(mut self, radius: f32, speed: f32, angle: f32) -> Self {
        self.orbit_radius = radius;
        self.orbit_speed = speed;
        self.orbit_angle = angle;
        self
    }
}
