//! # starfield
//!
//! An ambient, interactive particle backdrop: a field of softly twinkling
//! points drifting on small orbits, linked by faint lines when close, and
//! pushed aside by the pointer.
//!
//! ## Quick Start
//!
//! ```
//! use starfield::prelude::*;
//!
//! let config = FieldConfig::default().with_seed(7);
//! let mut field = ParticleField::new(320, 200, config);
//! let mut canvas = Canvas::new(320, 200, field.config().render.background);
//!
//! let pointer = PointerState::Present(Vec2::new(160.0, 100.0));
//! for _ in 0..60 {
//!     field.frame(&mut canvas, pointer);
//! }
//! assert_eq!(field.tick(), 60);
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] owns the particles, a tick counter and the surface
//! bounds. Every [`step`](ParticleField::step) first increments the tick,
//! then for each particle:
//!
//! 1. Twinkle: alpha and radius oscillate around their base values.
//! 2. Orbit: the particle circles its drifting centre.
//! 3. Integrate: position advances by velocity.
//! 4. Wrap: leaving the surface by more than the margin teleports it to
//!    the opposite edge.
//! 5. Cursor: inside the mouse radius it brightens, grows and is pushed
//!    away. Velocity is then damped.
//!
//! Resizing discards every particle and spawns a fresh set.
//!
//! ### Drawing
//!
//! Rendering goes through the [`Surface`] trait, a minimal 2D canvas with
//! circles, lines and radial gradients. Two implementations ship with the
//! crate:
//!
//! - [`Canvas`]: a CPU raster, used by the window and snapshot paths.
//! - [`CommandRecorder`]: records draw calls for inspection.
//!
//! ### Animation
//!
//! [`animation::Animation`] drives a field frame by frame through a host
//! [`FrameScheduler`](animation::FrameScheduler) and hands out an
//! [`AnimationHandle`](animation::AnimationHandle) that stops it.
//!
//! ## Feature flags
//!
//! - `window` (default): the [`window`] module and GPU presentation via
//!   wgpu and winit.

pub mod animation;
mod config;
pub mod connections;
mod emitter;
pub mod error;
#[cfg(feature = "window")]
mod gpu;
pub mod input;
mod particle;
pub mod physics;
mod raster;
mod render;
mod simulation;
pub mod snapshot;
mod surface;
pub mod time;
#[cfg(feature = "window")]
pub mod window;

pub use config::{
    FieldConfig, PhysicsConfig, RenderConfig, SampleRange, SpawnConfig, CONNECTION_DIST, MOUSE_RADIUS,
    PARTICLE_COUNT, WRAP_MARGIN,
};
pub use emitter::Emitter;
pub use error::{AppError, ConfigError, SnapshotError};
pub use glam::Vec2;
pub use input::PointerState;
pub use particle::{Particle, ParticleSet};
pub use physics::Bounds;
pub use raster::Canvas;
pub use render::{FrameStats, Renderer};
pub use simulation::ParticleField;
pub use surface::{CommandRecorder, DrawCommand, GradientStop, Rgba, Surface};

/// Prelude module for convenient imports.
///
/// ```
/// use starfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{Animation, AnimationHandle, FrameOutcome, FrameScheduler};
    pub use crate::config::{FieldConfig, PhysicsConfig, RenderConfig, SpawnConfig};
    pub use crate::input::{Input, PointerState};
    pub use crate::raster::Canvas;
    pub use crate::simulation::ParticleField;
    pub use crate::surface::{CommandRecorder, Rgba, Surface};
    pub use crate::time::FrameTimer;
    pub use crate::Vec2;
}
