//! Configuration for a particle field.
//!
//! Every tunable of the field lives here: how particles are spawned, how the
//! stepper moves them, and how the renderer paints them. All structs
//! deserialize with defaults for missing fields, so a config file only needs
//! to name what it changes:
//!
//! ```json
//! {
//!     "particle_count": 200,
//!     "physics": { "mouse_radius": 180.0 },
//!     "render": { "connection_distance": 120.0 }
//! }
//! ```

use std::f32::consts::TAU;
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::surface::Rgba;

/// Number of particles spawned per surface-size epoch.
pub const PARTICLE_COUNT: usize = 120;
/// Pairs closer than this are joined by a line.
pub const CONNECTION_DIST: f32 = 140.0;
/// Radius of cursor influence, in pixels.
pub const MOUSE_RADIUS: f32 = 250.0;
/// How far past an edge a particle may drift before wrapping.
pub const WRAP_MARGIN: f32 = 10.0;

/// A closed-open interval `[min, max)` sampled uniformly.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// A range that always yields `value`.
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Range symmetric around zero.
    pub const fn symmetric(half_width: f32) -> Self {
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    /// Draw one value. Degenerate ranges return `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Distributions for the per-particle parameters drawn at spawn time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Initial velocity, sampled independently per axis (px/tick).
    pub velocity: SampleRange,
    pub base_radius: SampleRange,
    pub base_alpha: SampleRange,
    /// Twinkle angular speed (radians/tick).
    pub twinkle_speed: SampleRange,
    pub twinkle_phase: SampleRange,
    /// Radius of the circular drift (px).
    pub orbit_radius: SampleRange,
    /// Orbit angular speed (radians/tick).
    pub orbit_speed: SampleRange,
    pub orbit_angle: SampleRange,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            velocity: SampleRange::symmetric(0.2),
            base_radius: SampleRange::new(0.5, 2.5),
            base_alpha: SampleRange::new(0.15, 0.55),
            twinkle_speed: SampleRange::new(0.008, 0.038),
            twinkle_phase: SampleRange::new(0.0, TAU),
            orbit_radius: SampleRange::new(0.1, 0.4),
            orbit_speed: SampleRange::symmetric(0.004),
            orbit_angle: SampleRange::new(0.0, TAU),
        }
    }
}

/// Parameters of the per-tick stepper.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Distance past an edge at which a particle teleports to the far side.
    pub wrap_margin: f32,
    /// Radius of cursor influence.
    pub mouse_radius: f32,
    /// Twinkle amplitude as a fraction of `base_alpha`.
    pub twinkle_alpha: f32,
    /// Twinkle amplitude as a fraction of `base_radius`.
    pub twinkle_radius: f32,
    /// Alpha added at full proximity.
    pub cursor_brighten: f32,
    /// Radius added at full proximity.
    pub cursor_enlarge: f32,
    /// Repulsive impulse at full proximity; scaled by `proximity²`.
    pub repulsion: f32,
    /// Per-tick velocity multiplier.
    pub damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            wrap_margin: WRAP_MARGIN,
            mouse_radius: MOUSE_RADIUS,
            twinkle_alpha: 0.6,
            twinkle_radius: 0.3,
            cursor_brighten: 0.5,
            cursor_enlarge: 2.5,
            repulsion: 0.12,
            damping: 0.985,
        }
    }
}

/// Colours and line metrics used by the renderer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Colour the surface is cleared to each frame.
    pub background: Rgba,
    /// Pairs closer than this are joined by a line.
    pub connection_distance: f32,
    pub link_color: Rgba,
    /// Opacity of a link between coincident particles.
    pub link_opacity: f32,
    pub link_width: f32,
    pub cursor_color: Rgba,
    /// Centre opacity of the cursor halo gradient.
    pub cursor_halo_opacity: f32,
    /// Opacity of a cursor link at full proximity.
    pub cursor_link_opacity: f32,
    /// Width of a cursor link at full proximity.
    pub cursor_link_width: f32,
    pub glow_color: Rgba,
    /// Glow centre opacity as a fraction of the particle alpha.
    pub glow_opacity: f32,
    /// Particles at or below this radius get no glow.
    pub glow_threshold: f32,
    /// Glow radius as a multiple of the particle radius.
    pub glow_scale: f32,
    pub core_color: Rgba,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Rgba::rgb8(5, 8, 20),
            connection_distance: CONNECTION_DIST,
            link_color: Rgba::rgb8(59, 130, 246),
            link_opacity: 0.12,
            link_width: 0.4,
            cursor_color: Rgba::rgb8(6, 182, 212),
            cursor_halo_opacity: 0.04,
            cursor_link_opacity: 0.35,
            cursor_link_width: 1.2,
            glow_color: Rgba::rgb8(59, 130, 246),
            glow_opacity: 0.3,
            glow_threshold: 1.2,
            glow_scale: 4.0,
            core_color: Rgba::rgb8(120, 180, 255),
        }
    }
}

/// Complete configuration of a particle field.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Particles per surface-size epoch.
    pub particle_count: usize,
    /// Seed for the emitter. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub spawn: SpawnConfig,
    pub physics: PhysicsConfig,
    pub render: RenderConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: None,
            spawn: SpawnConfig::default(),
            physics: PhysicsConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Make spawning reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the radius of cursor influence.
    pub fn with_mouse_radius(mut self, radius: f32) -> Self {
        self.physics.mouse_radius = radius;
        self
    }

    /// Set the maximum length of inter-particle links.
    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.render.connection_distance = distance;
        self
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check that every value keeps the field's invariants intact.
    ///
    /// Twinkle is not clamped before the cursor step, so the base alpha
    /// range is checked against the twinkle amplitude here instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let spawn = &self.spawn;
        spawn.velocity.check("spawn.velocity")?;
        spawn.base_radius.check("spawn.base_radius")?;
        spawn.base_alpha.check("spawn.base_alpha")?;
        spawn.twinkle_speed.check("spawn.twinkle_speed")?;
        spawn.twinkle_phase.check("spawn.twinkle_phase")?;
        spawn.orbit_radius.check("spawn.orbit_radius")?;
        spawn.orbit_speed.check("spawn.orbit_speed")?;
        spawn.orbit_angle.check("spawn.orbit_angle")?;

        if spawn.base_radius.min < 0.0 {
            return Err(ConfigError::invalid("spawn.base_radius", "radius cannot be negative"));
        }
        if spawn.base_alpha.min < 0.0 {
            return Err(ConfigError::invalid("spawn.base_alpha", "alpha cannot be negative"));
        }

        let physics = &self.physics;
        positive("physics.mouse_radius", physics.mouse_radius)?;
        non_negative("physics.wrap_margin", physics.wrap_margin)?;
        unit_interval("physics.twinkle_alpha", physics.twinkle_alpha)?;
        unit_interval("physics.twinkle_radius", physics.twinkle_radius)?;
        non_negative("physics.cursor_brighten", physics.cursor_brighten)?;
        non_negative("physics.cursor_enlarge", physics.cursor_enlarge)?;
        non_negative("physics.repulsion", physics.repulsion)?;
        unit_interval("physics.damping", physics.damping)?;

        let peak_alpha = spawn.base_alpha.max * (1.0 + physics.twinkle_alpha);
        if peak_alpha > 1.0 {
            return Err(ConfigError::invalid(
                "spawn.base_alpha",
                format!(
                    "max {} twinkles up to {peak_alpha}, above 1",
                    spawn.base_alpha.max
                ),
            ));
        }

        let render = &self.render;
        positive("render.connection_distance", render.connection_distance)?;
        non_negative("render.link_width", render.link_width)?;
        non_negative("render.cursor_link_width", render.cursor_link_width)?;
        positive("render.glow_scale", render.glow_scale)?;
        unit_interval("render.link_opacity", render.link_opacity)?;
        unit_interval("render.cursor_halo_opacity", render.cursor_halo_opacity)?;
        unit_interval("render.cursor_link_opacity", render.cursor_link_opacity)?;
        unit_interval("render.glow_opacity", render.glow_opacity)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("cannot be negative, got {value}")))
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_are_valid() {
        FieldConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FieldConfig::from_json(r#"{ "particle_count": 64, "physics": { "mouse_radius": 100.0 } }"#)
            .unwrap();
        assert_eq!(config.particle_count, 64);
        assert_eq!(config.physics.mouse_radius, 100.0);
        assert_eq!(config.physics.damping, 0.985);
        assert_eq!(config.render.connection_distance, CONNECTION_DIST);
    }

    #[test]
    fn test_json_round_trip() {
        let config = FieldConfig::default().with_seed(7).with_connection_distance(90.0);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(FieldConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_damping_above_one() {
        let mut config = FieldConfig::default();
        config.physics.damping = 1.5;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "physics.damping", .. }));
    }

    #[test]
    fn test_rejects_alpha_that_twinkles_past_one() {
        let mut config = FieldConfig::default();
        config.spawn.base_alpha = SampleRange::new(0.2, 0.7);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "spawn.base_alpha", .. }));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut config = FieldConfig::default();
        config.spawn.orbit_radius = SampleRange::new(1.0, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = FieldConfig::from_json("{ particle_count: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_sample_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = SampleRange::new(0.5, 2.5);
        for _ in 0..1000 {
            let v = range.sample(&mut rng);
            assert!((0.5..2.5).contains(&v));
        }
        assert_eq!(SampleRange::fixed(3.0).sample(&mut rng), 3.0);
    }
}
