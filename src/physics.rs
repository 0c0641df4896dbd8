//! Per-tick particle stepper.
//!
//! [`advance`] moves every particle one frame forward. For each particle it
//! runs, in this order:
//!
//! | Step | Effect |
//! |------|--------|
//! | Twinkle | `alpha`, `radius` oscillate around their bases |
//! | Orbit | `orbit_angle` advances, giving a circular offset |
//! | Integrate | `position += velocity + offset` |
//! | Wrap | crossing an edge by more than the margin teleports to the far side |
//! | Cursor | brighten, enlarge and push away when the pointer is near |
//! | Damping | `velocity *= damping` |
//!
//! The ordering matters: the cursor step overrides the twinkle-derived
//! radius, and the only clamp on `alpha` happens in the cursor step.

use glam::Vec2;

use crate::config::PhysicsConfig;
use crate::input::PointerState;
use crate::particle::Particle;

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether `position` lies within the surface grown by `margin` on every side.
    pub fn contains_with_margin(&self, position: Vec2, margin: f32) -> bool {
        (-margin..=self.width + margin).contains(&position.x)
            && (-margin..=self.height + margin).contains(&position.y)
    }
}

impl From<(u32, u32)> for Bounds {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f32, height as f32)
    }
}

/// Fraction of the cursor radius remaining at distance `d`, in `(0, 1]`
/// for `0 <= d < radius`.
#[inline]
pub fn proximity(distance: f32, radius: f32) -> f32 {
    (radius - distance) / radius
}

/// Advance all particles one tick, in place.
pub fn advance(
    particles: &mut [Particle],
    pointer: PointerState,
    tick: u64,
    bounds: Bounds,
    params: &PhysicsConfig,
) {
    let t = tick as f32;
    let pointer = pointer.position();

    for p in particles.iter_mut() {
        twinkle(p, t, params);
        let offset = orbit(p);
        p.position += p.velocity + offset;
        wrap(&mut p.position, bounds, params.wrap_margin);

        if let Some(pointer) = pointer {
            cursor(p, pointer, params);
        }

        p.velocity *= params.damping;
    }
}

fn twinkle(p: &mut Particle, t: f32, params: &PhysicsConfig) {
    let phase = (t * p.twinkle_speed + p.twinkle_phase).sin();
    p.alpha = p.base_alpha + phase * p.base_alpha * params.twinkle_alpha;
    p.radius = p.base_radius + phase * p.base_radius * params.twinkle_radius;
}

/// Positional offset for this tick only; never folded into velocity.
fn orbit(p: &mut Particle) -> Vec2 {
    p.orbit_angle += p.orbit_speed;
    Vec2::from_angle(p.orbit_angle) * p.orbit_radius
}

fn wrap(position: &mut Vec2, bounds: Bounds, margin: f32) {
    if position.x < -margin {
        position.x = bounds.width + margin;
    }
    if position.x > bounds.width + margin {
        position.x = -margin;
    }
    if position.y < -margin {
        position.y = bounds.height + margin;
    }
    if position.y > bounds.height + margin {
        position.y = -margin;
    }
}

fn cursor(p: &mut Particle, pointer: Vec2, params: &PhysicsConfig) {
    let delta = p.position - pointer;
    let dist = delta.length();
    // Coincident particles get no push; there is no direction to push along.
    if dist >= params.mouse_radius || dist <= 0.0 {
        return;
    }

    let prox = proximity(dist, params.mouse_radius);
    p.alpha = (p.alpha + prox * params.cursor_brighten).min(1.0);
    p.radius = p.base_radius + prox * params.cursor_enlarge;

    let force = prox * prox * params.repulsion;
    p.velocity += delta / dist * force;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn test_still_particle_stays_put() {
        let mut ps = vec![Particle::at(Vec2::new(50.0, 50.0))];
        advance(&mut ps, PointerState::Absent, 1, Bounds::new(100.0, 100.0), &params());
        assert_eq!(ps[0].position, Vec2::new(50.0, 50.0));
        assert_eq!(ps[0].alpha, 0.5);
        assert_eq!(ps[0].radius, 1.0);
    }

    #[test]
    fn test_twinkle_formula() {
        let mut ps = vec![Particle::at(Vec2::splat(5.0))
            .with_appearance(2.0, 0.4)
            .with_twinkle(0.5, 0.25)];
        advance(&mut ps, PointerState::Absent, 3, Bounds::new(10.0, 10.0), &params());

        let s = (3.0f32 * 0.5 + 0.25).sin();
        assert!((ps[0].alpha - (0.4 + s * 0.4 * 0.6)).abs() < 1e-6);
        assert!((ps[0].radius - (2.0 + s * 2.0 * 0.3)).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_offset_not_accumulated() {
        let mut ps = vec![Particle::at(Vec2::new(50.0, 50.0)).with_orbit(0.3, 0.0, 0.0)];
        let bounds = Bounds::new(100.0, 100.0);
        advance(&mut ps, PointerState::Absent, 1, bounds, &params());
        advance(&mut ps, PointerState::Absent, 2, bounds, &params());

        assert!((ps[0].position.x - 50.6).abs() < 1e-4);
        assert_eq!(ps[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_wrap_teleports_to_far_margin() {
        let bounds = Bounds::new(100.0, 80.0);
        let mut ps = vec![
            Particle::at(Vec2::new(-10.0, 40.0)).with_velocity(Vec2::new(-0.5, 0.0)),
            Particle::at(Vec2::new(110.0, 40.0)).with_velocity(Vec2::new(0.5, 0.0)),
            Particle::at(Vec2::new(50.0, 90.0)).with_velocity(Vec2::new(0.0, 0.5)),
        ];
        advance(&mut ps, PointerState::Absent, 1, bounds, &params());

        assert_eq!(ps[0].position.x, 110.0);
        assert_eq!(ps[1].position.x, -10.0);
        assert_eq!(ps[2].position.y, -10.0);
    }

    #[test]
    fn test_cursor_brighten_clamps_to_one() {
        let mut ps = vec![Particle::at(Vec2::new(50.0, 50.0)).with_appearance(1.0, 0.9)];
        let pointer = PointerState::Present(Vec2::new(51.0, 50.0));
        advance(&mut ps, pointer, 1, Bounds::new(100.0, 100.0), &params());
        assert_eq!(ps[0].alpha, 1.0);
    }

    #[test]
    fn test_cursor_overrides_twinkle_radius() {
        let mut ps = vec![Particle::at(Vec2::new(0.0, 0.0))
            .with_appearance(1.0, 0.3)
            .with_twinkle(1.0, 0.0)];
        let pointer = PointerState::Present(Vec2::new(125.0, 0.0));
        advance(&mut ps, pointer, 1, Bounds::new(300.0, 300.0), &params());

        // proximity = (250 - 125) / 250 = 0.5
        assert!((ps[0].radius - (1.0 + 0.5 * 2.5)).abs() < 1e-5);
    }

    #[test]
    fn test_coincident_pointer_has_no_effect() {
        let mut ps = vec![Particle::at(Vec2::new(20.0, 20.0))];
        let pointer = PointerState::Present(Vec2::new(20.0, 20.0));
        advance(&mut ps, pointer, 1, Bounds::new(100.0, 100.0), &params());
        assert_eq!(ps[0].velocity, Vec2::ZERO);
        assert_eq!(ps[0].alpha, 0.5);
    }

    #[test]
    fn test_outside_radius_untouched() {
        let mut ps = vec![Particle::at(Vec2::new(0.0, 0.0))];
        let pointer = PointerState::Present(Vec2::new(250.0, 0.0));
        advance(&mut ps, pointer, 1, Bounds::new(400.0, 400.0), &params());
        assert_eq!(ps[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_contains_with_margin() {
        let b = Bounds::new(10.0, 10.0);
        assert!(b.contains_with_margin(Vec2::new(-10.0, 20.0), 10.0));
        assert!(!b.contains_with_margin(Vec2::new(-10.5, 0.0), 10.0));
    }
}
