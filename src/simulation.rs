//! The particle field: state store, stepper and renderer in one place.

use crate::config::FieldConfig;
use crate::emitter::Emitter;
use crate::input::PointerState;
use crate::particle::{Particle, ParticleSet};
use crate::physics::{self, Bounds};
use crate::render::{FrameStats, Renderer};
use crate::surface::Surface;

/// An animated particle field bound to one drawing surface.
///
/// Owns the particle collection and the simulation clock. The clock counts
/// ticks, not wall time: every [`step`](ParticleField::step) advances it by
/// one before moving the particles, so the first tick is 1.
///
/// # Example
///
/// ```
/// use starfield::{Canvas, FieldConfig, ParticleField, PointerState, Surface};
///
/// let config = FieldConfig::default().with_seed(1);
/// let mut canvas = Canvas::new(320, 200, config.render.background);
/// let mut field = ParticleField::new(320, 200, config);
///
/// let stats = field.frame(&mut canvas, PointerState::Absent);
/// assert_eq!(stats.particles, 120);
/// assert_eq!(field.tick(), 1);
/// ```
#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    emitter: Emitter,
    renderer: Renderer,
    particles: ParticleSet,
    bounds: Bounds,
    tick: u64,
}

impl ParticleField {
    /// Create a field and spawn its particles over a `width × height` surface.
    pub fn new(width: u32, height: u32, config: FieldConfig) -> Self {
        let mut emitter = Emitter::new(config.spawn.clone(), config.seed);
        let bounds = Bounds::from((width, height));
        let particles = emitter.initialize(bounds.width, bounds.height, config.particle_count);
        log::debug!(
            "spawned {} particles over {}x{}",
            particles.len(),
            width,
            height
        );

        Self {
            renderer: Renderer::new(config.render.clone(), &config.physics),
            config,
            emitter,
            particles,
            bounds,
            tick: 0,
        }
    }

    /// Create a field for a surface that may not exist.
    ///
    /// Without a surface the field is simply not applicable: this returns
    /// `None` and the host should skip the animation entirely.
    pub fn mount(surface_size: Option<(u32, u32)>, config: FieldConfig) -> Option<Self> {
        match surface_size {
            Some((width, height)) => Some(Self::new(width, height, config)),
            None => {
                log::debug!("no drawing surface; particle field disabled");
                None
            }
        }
    }

    /// Create a field with an explicit particle collection instead of
    /// spawning one. A later [`resize`](ParticleField::resize) still
    /// respawns from the config.
    pub fn with_particles(width: u32, height: u32, config: FieldConfig, particles: ParticleSet) -> Self {
        let emitter = Emitter::new(config.spawn.clone(), config.seed);
        Self {
            renderer: Renderer::new(config.render.clone(), &config.physics),
            config,
            emitter,
            particles,
            bounds: Bounds::from((width, height)),
            tick: 0,
        }
    }

    /// Discard every particle and spawn a fresh set for the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.bounds = Bounds::from((width, height));
        self.particles = self.emitter.initialize(
            self.bounds.width,
            self.bounds.height,
            self.config.particle_count,
        );
        log::debug!(
            "surface resized to {}x{}; respawned {} particles",
            width,
            height,
            self.particles.len()
        );
    }

    /// Advance the clock and every particle by one tick.
    pub fn step(&mut self, pointer: PointerState) {
        self.tick += 1;
        physics::advance(
            &mut self.particles,
            pointer,
            self.tick,
            self.bounds,
            &self.config.physics,
        );
    }

    /// Paint the current state.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, pointer: PointerState) -> FrameStats {
        self.renderer.render(surface, &self.particles, pointer)
    }

    /// Step, then render.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, pointer: PointerState) -> FrameStats {
        self.step(pointer);
        let stats = self.render(surface, pointer);
        log::trace!(
            "tick {}: {} links, {} cursor links, {} glows",
            self.tick,
            stats.connections,
            stats.cursor_links,
            stats.glows
        );
        stats
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CommandRecorder;
    use glam::Vec2;

    #[test]
    fn test_mount_without_surface() {
        assert!(ParticleField::mount(None, FieldConfig::default()).is_none());
        assert!(ParticleField::mount(Some((10, 10)), FieldConfig::default()).is_some());
    }

    #[test]
    fn test_step_advances_clock() {
        let mut field = ParticleField::new(100, 100, FieldConfig::default().with_seed(2));
        field.step(PointerState::Absent);
        field.step(PointerState::Absent);
        assert_eq!(field.tick(), 2);
    }

    #[test]
    fn test_resize_replaces_collection() {
        let config = FieldConfig::default().with_seed(5).with_particle_count(30);
        let mut field = ParticleField::with_particles(100, 100, config, vec![Particle::at(Vec2::ZERO)]);
        assert_eq!(field.particles().len(), 1);

        field.resize(50, 40);
        assert_eq!(field.particles().len(), 30);
        assert_eq!(field.bounds(), Bounds::new(50.0, 40.0));
    }

    #[test]
    fn test_frame_renders_after_step() {
        let config = FieldConfig::default().with_seed(8).with_particle_count(5);
        let mut field = ParticleField::new(200, 200, config);
        let mut rec = CommandRecorder::new(200, 200);
        let stats = field.frame(&mut rec, PointerState::Absent);

        assert_eq!(field.tick(), 1);
        assert_eq!(stats.particles, 5);
        assert_eq!(rec.circles().count(), 5);
    }
}
