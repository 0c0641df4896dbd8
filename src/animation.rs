//! Frame loop with an explicit stop handle.
//!
//! Hosts drive animation through a "call me before the next repaint"
//! primitive, modelled here as [`FrameScheduler`]. Each frame steps and
//! renders the field, then asks the scheduler for another frame. The loop
//! ends when any clone of the [`AnimationHandle`] is stopped: a stopped
//! animation does no further work, and a stop that lands while a frame is
//! running prevents that frame from rescheduling.
//!
//! # Example
//!
//! ```
//! use starfield::animation::{Animation, FrameOutcome, FrameScheduler};
//! use starfield::{CommandRecorder, FieldConfig, ParticleField, PointerState};
//!
//! #[derive(Default)]
//! struct Counter(u32);
//! impl FrameScheduler for Counter {
//!     fn request_frame(&mut self) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let field = ParticleField::new(100, 100, FieldConfig::default().with_seed(3));
//! let mut sched = Counter::default();
//! let (mut anim, handle) = Animation::start(field, &mut sched);
//! let mut surface = CommandRecorder::new(100, 100);
//!
//! anim.frame(&mut surface, PointerState::Absent, &mut sched);
//! handle.stop();
//! assert_eq!(anim.frame(&mut surface, PointerState::Absent, &mut sched), FrameOutcome::Stopped);
//! assert_eq!(sched.0, 2);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::input::PointerState;
use crate::render::FrameStats;
use crate::simulation::ParticleField;
use crate::surface::Surface;

/// The host's per-frame scheduling primitive.
pub trait FrameScheduler {
    /// Ask for one more frame callback before the next repaint.
    fn request_frame(&mut self);
}

/// Shared stop flag for a running [`Animation`].
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    running: Arc<AtomicBool>,
}

impl AnimationHandle {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stop the animation. Idempotent.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            log::debug!("animation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Result of one frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was drawn. `rescheduled` is false if a stop arrived mid-frame.
    Rendered { stats: FrameStats, rescheduled: bool },
    /// The animation had already been stopped; nothing was done.
    Stopped,
}

/// A particle field driven frame by frame.
#[derive(Debug)]
pub struct Animation {
    field: ParticleField,
    handle: AnimationHandle,
    paused: bool,
    frames: u64,
}

impl Animation {
    /// Begin animating `field` and request the first frame.
    pub fn start<F: FrameScheduler + ?Sized>(field: ParticleField, scheduler: &mut F) -> (Self, AnimationHandle) {
        let handle = AnimationHandle::new();
        scheduler.request_frame();
        let animation = Self {
            field,
            handle: handle.clone(),
            paused: false,
            frames: 0,
        };
        (animation, handle)
    }

    /// Run one frame callback.
    pub fn frame<S, F>(&mut self, surface: &mut S, pointer: PointerState, scheduler: &mut F) -> FrameOutcome
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if !self.handle.is_running() {
            return FrameOutcome::Stopped;
        }

        let stats = if self.paused {
            self.field.render(surface, pointer)
        } else {
            self.field.frame(surface, pointer)
        };
        self.frames += 1;

        let rescheduled = self.handle.is_running();
        if rescheduled {
            scheduler.request_frame();
        }
        FrameOutcome::Rendered { stats, rescheduled }
    }

    /// While paused, frames repaint the current state without stepping.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frames rendered since start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }
}
