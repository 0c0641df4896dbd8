//! Input adapter for the particle field.
//!
//! [`Input`] is the single writer of pointer and surface-size state. Event
//! handlers update it; once per frame the loop reads a [`PointerState`]
//! snapshot by value and hands it to the stepper and renderer, so the
//! simulation never observes a pointer that changes mid-frame.
//!
//! # Usage
//!
//! ```
//! use starfield::input::{Input, PointerState};
//! use starfield::Vec2;
//!
//! let mut input = Input::new(800, 600);
//! input.pointer_moved(Vec2::new(120.0, 90.0), Vec2::new(20.0, 30.0));
//! assert_eq!(input.pointer(), PointerState::Present(Vec2::new(100.0, 60.0)));
//!
//! input.pointer_left();
//! assert_eq!(input.pointer(), PointerState::Absent);
//! ```

use glam::Vec2;
#[cfg(feature = "window")]
use winit::{
    dpi::{LogicalPosition, LogicalSize, PhysicalSize},
    event::WindowEvent,
};

/// Where the pointer is, if it is over the surface at all.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    /// No pointer over the surface; cursor effects are disabled.
    #[default]
    Absent,
    /// Pointer position in surface-local pixels.
    Present(Vec2),
}

impl PointerState {
    /// The pointer position, if present.
    pub fn position(self) -> Option<Vec2> {
        match self {
            PointerState::Absent => None,
            PointerState::Present(pos) => Some(pos),
        }
    }

    pub fn is_present(self) -> bool {
        matches!(self, PointerState::Present(_))
    }
}

/// Pointer and surface-size tracking.
#[derive(Debug, Default)]
pub struct Input {
    pointer: PointerState,
    surface_size: (u32, u32),
    pending_resize: Option<(u32, u32)>,
}

impl Input {
    /// Create an input tracker for a surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface_size: (width, height),
            ..Default::default()
        }
    }

    // ========== Queries ==========

    /// Snapshot of the pointer for this frame.
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Current surface size in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// Take the most recent unhandled resize, if any.
    ///
    /// Several resizes between two frames collapse into the last one, so
    /// the field is rebuilt at most once per frame.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.pending_resize.take()
    }

    // ========== Updates ==========

    /// Pointer moved to `client`, where the surface's top-left corner is at
    /// `origin` in the same coordinate space.
    pub fn pointer_moved(&mut self, client: Vec2, origin: Vec2) {
        self.pointer = PointerState::Present(client - origin);
    }

    /// Pointer left the surface.
    pub fn pointer_left(&mut self) {
        self.pointer = PointerState::Absent;
    }

    /// The surface was resized. The particle field must be reset before the
    /// next step; see [`Input::take_resize`].
    pub fn resized(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
        self.pending_resize = Some((width, height));
    }

    /// Process a winit window event.
    ///
    /// winit reports physical pixels; sizes and cursor positions are
    /// converted to logical pixels with `scale_factor` so the field's
    /// distances mean the same thing on every display. Cursor positions are
    /// already window-local, so the surface origin is the window origin.
    #[cfg(feature = "window")]
    pub(crate) fn handle_event(&mut self, event: &WindowEvent, scale_factor: f64) {
        match event {
            WindowEvent::Resized(size) => {
                let (width, height) = logical_size(*size, scale_factor);
                self.resized(width, height);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical: LogicalPosition<f32> = position.to_logical(scale_factor);
                self.pointer_moved(Vec2::new(logical.x, logical.y), Vec2::ZERO);
            }

            WindowEvent::CursorLeft { .. } => {
                self.pointer_left();
            }

            _ => {}
        }
    }
}

/// Logical size of a physical window size, rounded to whole pixels.
#[cfg(feature = "window")]
pub(crate) fn logical_size(size: PhysicalSize<u32>, scale_factor: f64) -> (u32, u32) {
    let logical: LogicalSize<f64> = size.to_logical(scale_factor);
    (logical.width.round() as u32, logical.height.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_absent() {
        let input = Input::new(800, 600);
        assert_eq!(input.pointer(), PointerState::Absent);
        assert_eq!(input.surface_size(), (800, 600));
    }

    #[test]
    fn test_move_then_leave() {
        let mut input = Input::new(800, 600);
        input.pointer_moved(Vec2::new(10.0, 20.0), Vec2::ZERO);
        assert!(input.pointer().is_present());

        input.pointer_left();
        assert_eq!(input.pointer().position(), None);

        // Next move re-enables cursor effects
        input.pointer_moved(Vec2::new(3.0, 4.0), Vec2::ZERO);
        assert_eq!(input.pointer().position(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_resizes_collapse() {
        let mut input = Input::new(100, 100);
        input.resized(200, 150);
        input.resized(640, 480);

        assert_eq!(input.surface_size(), (640, 480));
        assert_eq!(input.take_resize(), Some((640, 480)));
        assert_eq!(input.take_resize(), None);
    }

    #[cfg(feature = "window")]
    #[test]
    fn test_window_events_use_logical_pixels() {
        use winit::dpi::PhysicalPosition;
        use winit::event::DeviceId;

        let mut input = Input::new(1280, 720);
        input.handle_event(&WindowEvent::Resized(PhysicalSize::new(2560, 1440)), 2.0);
        assert_eq!(input.take_resize(), Some((1280, 720)));

        let moved = WindowEvent::CursorMoved {
            device_id: unsafe { DeviceId::dummy() },
            position: PhysicalPosition::new(500.0, 300.0),
        };
        input.handle_event(&moved, 2.0);
        assert_eq!(input.pointer(), PointerState::Present(Vec2::new(250.0, 150.0)));
    }

    #[cfg(feature = "window")]
    #[test]
    fn test_logical_size_rounds() {
        assert_eq!(logical_size(PhysicalSize::new(1001, 751), 1.5), (667, 501));
        assert_eq!(logical_size(PhysicalSize::new(800, 600), 1.0), (800, 600));
    }
}
