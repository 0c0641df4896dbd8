//! Frame renderer.
//!
//! Paints one frame back to front:
//!
//! 1. clear the surface
//! 2. inter-particle links
//! 3. cursor halo and cursor links (pointer present only)
//! 4. per particle, an optional glow then the core disc
//!
//! Links go first so that dots always sit on top of the lines joining them.

use glam::Vec2;

use crate::config::{PhysicsConfig, RenderConfig};
use crate::connections::{cursor_links, find_connections};
use crate::input::PointerState;
use crate::particle::Particle;
use crate::surface::{GradientStop, Surface};

/// What was drawn in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub connections: usize,
    pub cursor_links: usize,
    pub glows: usize,
    pub particles: usize,
}

/// Paints particle fields onto a [`Surface`].
#[derive(Clone, Debug)]
pub struct Renderer {
    style: RenderConfig,
    mouse_radius: f32,
}

impl Renderer {
    pub fn new(style: RenderConfig, physics: &PhysicsConfig) -> Self {
        Self {
            style,
            mouse_radius: physics.mouse_radius,
        }
    }

    /// Draw a complete frame.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        particles: &[Particle],
        pointer: PointerState,
    ) -> FrameStats {
        surface.clear();

        let mut stats = FrameStats {
            particles: particles.len(),
            ..Default::default()
        };

        stats.connections = self.draw_connections(surface, particles);
        if let Some(pointer) = pointer.position() {
            stats.cursor_links = self.draw_cursor(surface, particles, pointer);
        }
        for p in particles {
            if self.draw_particle(surface, p) {
                stats.glows += 1;
            }
        }

        stats
    }

    fn draw_connections<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) -> usize {
        let style = &self.style;
        let connections = find_connections(particles, style.connection_distance);

        for c in &connections {
            let color = style.link_color.with_alpha(c.strength * style.link_opacity);
            surface.stroke_line(
                particles[c.a].position,
                particles[c.b].position,
                style.link_width,
                color,
            );
        }

        connections.len()
    }

    fn draw_cursor<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        particles: &[Particle],
        pointer: Vec2,
    ) -> usize {
        let style = &self.style;

        surface.fill_radial_gradient(
            pointer,
            self.mouse_radius,
            &[
                GradientStop::new(0.0, style.cursor_color.with_alpha(style.cursor_halo_opacity)),
                GradientStop::new(1.0, style.cursor_color.with_alpha(0.0)),
            ],
        );

        let links = cursor_links(particles, pointer, self.mouse_radius);
        for link in &links {
            surface.stroke_line(
                particles[link.index].position,
                pointer,
                link.proximity * style.cursor_link_width,
                style.cursor_color.with_alpha(link.proximity * style.cursor_link_opacity),
            );
        }

        links.len()
    }

    /// Returns whether a glow was drawn.
    fn draw_particle<S: Surface + ?Sized>(&self, surface: &mut S, p: &Particle) -> bool {
        let style = &self.style;
        let glow = p.radius > style.glow_threshold;

        if glow {
            surface.fill_radial_gradient(
                p.position,
                p.radius * style.glow_scale,
                &[
                    GradientStop::new(0.0, style.glow_color.with_alpha(p.alpha * style.glow_opacity)),
                    GradientStop::new(1.0, style.glow_color.with_alpha(0.0)),
                ],
            );
        }

        surface.fill_circle(p.position, p.radius.max(0.0), style.core_color.with_alpha(p.alpha));
        glow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandRecorder, DrawCommand};

    fn renderer() -> Renderer {
        Renderer::new(RenderConfig::default(), &PhysicsConfig::default())
    }

    #[test]
    fn test_draw_order() {
        let ps = vec![
            Particle::at(Vec2::new(10.0, 10.0)).with_appearance(2.0, 0.5),
            Particle::at(Vec2::new(20.0, 10.0)),
        ];
        let mut rec = CommandRecorder::new(100, 100);
        let stats = renderer().render(&mut rec, &ps, PointerState::Present(Vec2::new(50.0, 50.0)));

        let kinds: Vec<&str> = rec
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Clear => "clear",
                DrawCommand::Line { .. } => "line",
                DrawCommand::RadialGradient { .. } => "gradient",
                DrawCommand::Circle { .. } => "circle",
            })
            .collect();

        assert_eq!(
            kinds,
            [
                "clear", "line", // particle link
                "gradient", "line", "line", // cursor halo + links
                "gradient", "circle", // glowing particle
                "circle", // plain particle
            ]
        );
        assert_eq!(
            stats,
            FrameStats {
                connections: 1,
                cursor_links: 2,
                glows: 1,
                particles: 2
            }
        );
    }

    #[test]
    fn test_no_cursor_drawing_when_absent() {
        let ps = vec![Particle::at(Vec2::new(10.0, 10.0))];
        let mut rec = CommandRecorder::new(100, 100);
        let stats = renderer().render(&mut rec, &ps, PointerState::Absent);

        assert_eq!(stats.cursor_links, 0);
        assert!(!rec
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::RadialGradient { .. })));
    }

    #[test]
    fn test_glow_threshold_is_exclusive() {
        let ps = vec![Particle::at(Vec2::ZERO).with_appearance(1.2, 0.5)];
        let mut rec = CommandRecorder::new(10, 10);
        assert_eq!(renderer().render(&mut rec, &ps, PointerState::Absent).glows, 0);
    }

    #[test]
    fn test_cursor_link_width_scales_with_proximity() {
        let ps = vec![Particle::at(Vec2::new(125.0, 0.0))];
        let mut rec = CommandRecorder::new(300, 300);
        renderer().render(&mut rec, &ps, PointerState::Present(Vec2::ZERO));

        let (_, to, width, color) = rec.lines().next().unwrap();
        assert_eq!(to, Vec2::ZERO);
        assert!((width - 0.6).abs() < 1e-6);
        assert!((color.a - 0.175).abs() < 1e-6);
    }
}
