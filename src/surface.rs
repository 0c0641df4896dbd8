//! The drawing-surface contract.
//!
//! The renderer only needs a handful of 2D primitives: clearing, filled
//! circles, stroked lines, and radial gradients. [`Surface`] captures exactly
//! that, so the field can paint into the CPU [`Canvas`](crate::Canvas), into a
//! [`CommandRecorder`] for inspection, or into any other backend a host
//! provides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same colour with a different alpha, clamped to `[0, 1]`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }
}

/// One colour stop of a radial gradient. `offset` runs from the centre (0)
/// to the rim (1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// A 2D raster target the renderer can paint into.
///
/// Coordinates are surface-local pixels with the origin at the top-left.
/// Drawing is always source-over.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Reset the whole surface to its background.
    fn clear(&mut self);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Stroke a straight segment with the given width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);

    /// Fill a disc with a radial gradient from `center` out to `radius`.
    ///
    /// `stops` must be sorted by offset.
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]);
}

/// A single recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    RadialGradient {
        center: Vec2,
        radius: f32,
        stops: Vec<GradientStop>,
    },
}

/// A [`Surface`] that records commands instead of rasterizing them.
///
/// Useful for forwarding a frame to a host-specific backend, and for
/// asserting on what the renderer drew.
#[derive(Clone, Debug, Default)]
pub struct CommandRecorder {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last [`Surface::clear`], including it.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterator over the recorded lines as `(from, to, width, color)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, width, color } => Some((*from, *to, *width, *color)),
            _ => None,
        })
    }

    /// Iterator over the recorded circles as `(center, radius, color)`.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle { center, radius, color } => Some((*center, *radius, *color)),
            _ => None,
        })
    }
}

impl Surface for CommandRecorder {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8() {
        let c = Rgba::rgb8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(Rgba::rgb8(1, 2, 3).with_alpha(1.7).a, 1.0);
        assert_eq!(Rgba::rgb8(1, 2, 3).with_alpha(-0.2).a, 0.0);
    }

    #[test]
    fn test_recorder_clear_starts_new_frame() {
        let mut rec = CommandRecorder::new(10, 10);
        rec.fill_circle(Vec2::ONE, 1.0, Rgba::rgb8(0, 0, 0));
        rec.clear();
        assert_eq!(rec.commands(), &[DrawCommand::Clear]);
    }
}
