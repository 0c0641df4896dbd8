//! Headless rendering to an image.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::error::SnapshotError;
use crate::input::PointerState;
use crate::raster::Canvas;
use crate::simulation::ParticleField;

/// Parameters of an offscreen run.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotOptions {
    pub width: u32,
    pub height: u32,
    /// Ticks to simulate before the final frame is kept. At least one frame
    /// is always rendered.
    pub frames: u32,
    /// Pointer held still for the whole run.
    pub pointer: Option<Vec2>,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frames: 120,
            pointer: None,
        }
    }
}

/// Simulate `options.frames` ticks and return the final canvas.
pub fn render_snapshot(config: FieldConfig, options: &SnapshotOptions) -> Result<Canvas, SnapshotError> {
    let (width, height) = (options.width, options.height);
    if width == 0 || height == 0 {
        return Err(SnapshotError::EmptySurface { width, height });
    }

    let pointer = options.pointer.map_or(PointerState::Absent, PointerState::Present);
    let mut canvas = Canvas::new(width, height, config.render.background);
    let mut field = ParticleField::new(width, height, config);

    for _ in 1..options.frames {
        field.step(pointer);
    }
    let stats = field.frame(&mut canvas, pointer);
    log::info!(
        "rendered tick {} at {}x{}: {} links, {} glows",
        field.tick(),
        width,
        height,
        stats.connections,
        stats.glows
    );

    Ok(canvas)
}
