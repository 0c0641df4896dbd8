//! Wall-clock frame timing.
//!
//! The simulation itself runs on a tick counter (see
//! [`ParticleField::tick`](crate::ParticleField::tick)); wall time is only
//! used to report how fast frames are being presented.
//!
//! # Example
//!
//! ```
//! use starfield::time::FrameTimer;
//!
//! let mut timer = FrameTimer::new();
//! timer.frame();
//! assert_eq!(timer.frames(), 1);
//! ```

use std::time::{Duration, Instant};

/// Counts presented frames and measures frames per second.
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    /// Measured FPS, refreshed once per `fps_window`.
    fps: f32,
    fps_frame_count: u64,
    fps_window_start: Instant,
    fps_window: Duration,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::with_fps_window(Duration::from_millis(500))
    }

    /// Create a timer that refreshes its FPS estimate every `window`.
    pub fn with_fps_window(window: Duration) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: now,
            fps_window: window,
        }
    }

    /// Record a presented frame.
    ///
    /// Returns the new FPS estimate when the measurement window rolled over.
    pub fn frame(&mut self) -> Option<f32> {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let window = now.duration_since(self.fps_window_start);
        if window < self.fps_window {
            return None;
        }
        let frames = self.frame_count - self.fps_frame_count;
        self.fps = frames as f32 / window.as_secs_f32();
        self.fps_frame_count = self.frame_count;
        self.fps_window_start = now;
        Some(self.fps)
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS estimate; 0 until the first window completes.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timer_new() {
        let timer = FrameTimer::new();
        assert_eq!(timer.frames(), 0);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn test_frame_delta() {
        let mut timer = FrameTimer::new();
        thread::sleep(Duration::from_millis(10));
        timer.frame();

        assert!(timer.delta() > 0.0);
        assert_eq!(timer.frames(), 1);
    }

    #[test]
    fn test_fps_reported_after_window() {
        let mut timer = FrameTimer::with_fps_window(Duration::from_millis(20));
        assert_eq!(timer.frame(), None);

        thread::sleep(Duration::from_millis(30));
        let fps = timer.frame().unwrap();
        assert!(fps > 0.0);
        assert_eq!(timer.fps(), fps);
    }
}
