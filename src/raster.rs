//! CPU raster canvas.
//!
//! Pixels are stored premultiplied as `[f32; 4]` and composited source-over.
//! Circles and lines get one pixel of analytic anti-aliasing from the
//! distance between the pixel centre and the shape's edge. Lines thinner
//! than a pixel are drawn one pixel wide with their coverage scaled down,
//! which is how 2D canvas implementations render hairlines.

use std::path::Path;

use glam::Vec2;
use image::RgbaImage;

use crate::surface::{GradientStop, Rgba, Surface};

/// An RGBA raster that implements [`Surface`].
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Rgba,
    pixels: Vec<[f32; 4]>,
}

impl Canvas {
    /// Create a canvas already cleared to `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let mut canvas = Self {
            width,
            height,
            background,
            pixels: Vec::new(),
        };
        canvas.resize(width, height);
        canvas
    }

    /// Reallocate for a new size and clear.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.background.premultiplied(); (width as usize) * (height as usize)];
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Straight-alpha colour of one pixel, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[self.index(x, y)];
        Some(if a > 0.0 {
            Rgba::new(r / a, g / a, b / a, a)
        } else {
            Rgba::TRANSPARENT
        })
    }

    /// Write the canvas as 8-bit straight RGBA into `out`, reusing its allocation.
    pub fn to_rgba8(&self, out: &mut Vec<[u8; 4]>) {
        out.clear();
        out.extend(self.pixels.iter().map(|&px| unpremultiply_u8(px)));
    }

    pub fn to_image(&self) -> RgbaImage {
        let mut buf = Vec::with_capacity(self.pixels.len());
        self.to_rgba8(&mut buf);
        let bytes: Vec<u8> = bytemuck::cast_slice(&buf).to_vec();
        // Length always matches width * height * 4, so this cannot fail.
        RgbaImage::from_raw(self.width, self.height, bytes).unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Source-over one premultiplied colour at `coverage` onto a pixel.
    #[inline]
    fn blend(&mut self, x: u32, y: u32, src: [f32; 4], coverage: f32) {
        let idx = self.index(x, y);
        let dst = &mut self.pixels[idx];
        let k = coverage.clamp(0.0, 1.0);
        let sa = src[3] * k;
        let inv = 1.0 - sa;
        for c in 0..3 {
            dst[c] = (src[c] * k + dst[c] * inv).min(1.0);
        }
        dst[3] = (sa + dst[3] * inv).min(1.0);
    }

    /// Pixel rectangle covering `[min, max]`, clipped to the canvas.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32 - 1.0);
        let y1 = max.y.ceil().min(self.height as f32 - 1.0);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Visit every pixel whose centre lies within `radius + 1` of `center`,
    /// passing the distance from the pixel centre.
    fn for_each_in_disc(&mut self, center: Vec2, radius: f32, mut f: impl FnMut(&mut Self, u32, u32, f32)) {
        let reach = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(center - reach, center + reach) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                f(self, x, y, p.distance(center));
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.pixels.fill(self.background.premultiplied());
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let src = color.premultiplied();
        self.for_each_in_disc(center, radius, |canvas, x, y, d| {
            let coverage = edge_coverage(radius - d);
            if coverage > 0.0 {
                canvas.blend(x, y, src, coverage);
            }
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let src = color.premultiplied();
        let half = width.max(1.0) * 0.5;
        let thinness = width.min(1.0);
        let reach = Vec2::splat(half + 1.0);

        let Some((x0, y0, x1, y1)) = self.clip(from.min(to) - reach, from.max(to) + reach) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = edge_coverage(half - distance_to_segment(p, from, to)) * thinness;
                if coverage > 0.0 {
                    self.blend(x, y, src, coverage);
                }
            }
        }
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        self.for_each_in_disc(center, radius, |canvas, x, y, d| {
            let coverage = edge_coverage(radius - d);
            if coverage > 0.0 {
                let src = sample_gradient(stops, (d / radius).min(1.0));
                canvas.blend(x, y, src, coverage);
            }
        });
    }
}

/// Coverage of a pixel whose centre is `inside` pixels within an edge.
#[inline]
fn edge_coverage(inside: f32) -> f32 {
    (inside + 0.5).clamp(0.0, 1.0)
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Premultiplied colour of a sorted stop list at offset `t`.
fn sample_gradient(stops: &[GradientStop], t: f32) -> [f32; 4] {
    let first = stops[0];
    if t <= first.offset {
        return first.color.premultiplied();
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.offset {
            let span = hi.offset - lo.offset;
            let f = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
            let a = lo.color.premultiplied();
            let b = hi.color.premultiplied();
            return [
                a[0] + (b[0] - a[0]) * f,
                a[1] + (b[1] - a[1]) * f,
                a[2] + (b[2] - a[2]) * f,
                a[3] + (b[3] - a[3]) * f,
            ];
        }
    }
    stops[stops.len() - 1].color.premultiplied()
}

fn unpremultiply_u8([r, g, b, a]: [f32; 4]) -> [u8; 4] {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    if a <= 0.0 {
        return [0, 0, 0, 0];
    }
    [to_u8(r / a), to_u8(g / a), to_u8(b / a), to_u8(a)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    #[test]
    fn test_new_is_cleared_to_background() {
        let mut canvas = Canvas::new(4, 3, BLACK);
        assert_eq!(canvas.background(), BLACK);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.pixel(3, 2), Some(BLACK));
        assert_eq!(canvas.pixel(4, 0), None);

        canvas.fill_circle(Vec2::new(2.0, 1.5), 3.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
        assert_ne!(canvas.pixel(2, 1), Some(BLACK));
        canvas.clear();
        assert_eq!(canvas.pixel(2, 1), Some(canvas.background()));
    }

    #[test]
    fn test_circle_covers_centre_not_corners() {
        let mut canvas = Canvas::new(20, 20, BLACK);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, Rgba::new(1.0, 1.0, 1.0, 1.0));

        let centre = canvas.pixel(10, 10).unwrap();
        assert!(centre.r > 0.99);
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn test_half_alpha_blend() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 4.0, Rgba::new(1.0, 0.0, 0.0, 0.5));
        let px = canvas.pixel(5, 5).unwrap();
        assert!((px.r - 0.5).abs() < 1e-5);
        assert!((px.a - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hairline_is_faint() {
        let mut canvas = Canvas::new(10, 10, BLACK);
        canvas.stroke_line(
            Vec2::new(0.0, 5.5),
            Vec2::new(10.0, 5.5),
            0.4,
            Rgba::new(1.0, 1.0, 1.0, 1.0),
        );
        let on = canvas.pixel(5, 5).unwrap();
        assert!((on.r - 0.4).abs() < 1e-5);
        assert_eq!(canvas.pixel(5, 0), Some(BLACK));
    }

    #[test]
    fn test_gradient_fades_to_rim() {
        let mut canvas = Canvas::new(41, 41, BLACK);
        let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
        canvas.fill_radial_gradient(
            Vec2::new(20.5, 20.5),
            20.0,
            &[GradientStop::new(0.0, white), GradientStop::new(1.0, white.with_alpha(0.0))],
        );
        let centre = canvas.pixel(20, 20).unwrap().r;
        let mid = canvas.pixel(30, 20).unwrap().r;
        let edge = canvas.pixel(39, 20).unwrap().r;
        assert!(centre > mid && mid > edge);
    }

    #[test]
    fn test_repeated_blending_stays_in_range() {
        let mut canvas = Canvas::new(8, 8, Rgba::TRANSPARENT);
        for _ in 0..200 {
            canvas.fill_circle(Vec2::splat(4.0), 3.0, Rgba::new(0.9, 0.8, 1.0, 0.7));
        }
        let mut out = Vec::new();
        canvas.to_rgba8(&mut out);
        assert_eq!(out.len(), 64);
        let px = canvas.pixel(4, 4).unwrap();
        assert!(px.a <= 1.0 && px.r <= 1.0);
    }

    #[test]
    fn test_zero_sized_canvas_ignores_drawing() {
        let mut canvas = Canvas::new(0, 0, BLACK);
        canvas.fill_circle(Vec2::ZERO, 5.0, BLACK);
        canvas.stroke_line(Vec2::ZERO, Vec2::ONE, 1.0, BLACK);
        assert_eq!(canvas.to_image().dimensions(), (0, 0));
    }
}
