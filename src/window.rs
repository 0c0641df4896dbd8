//! Desktop window host.
//!
//! Runs a [`ParticleField`] in a winit window. Each redraw rasterizes the
//! field into a CPU [`Canvas`], which the GPU then presents.
//!
//! Controls: Escape or closing the window stops the animation and exits,
//! Space toggles pause.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::animation::{Animation, AnimationHandle, FrameOutcome, FrameScheduler};
use crate::config::FieldConfig;
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::input::{logical_size, Input};
use crate::raster::Canvas;
use crate::simulation::ParticleField;
use crate::time::FrameTimer;

const TITLE: &str = "starfield";

/// Requests frames by asking winit for a redraw.
struct WindowScheduler<'a>(&'a Window);

impl FrameScheduler for WindowScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Everything that exists once the window is up.
struct Running {
    window: Arc<Window>,
    gpu: GpuState,
    canvas: Canvas,
    animation: Animation,
    handle: AnimationHandle,
}

struct App {
    config: FieldConfig,
    running: Option<Running>,
    input: Input,
    timer: FrameTimer,
    failure: Option<AppError>,
}

impl App {
    fn new(config: FieldConfig) -> Self {
        Self {
            config,
            running: None,
            input: Input::default(),
            timer: FrameTimer::new(),
            failure: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = pollster::block_on(GpuState::new(window.clone()))?;
        let (surface_width, surface_height) = gpu.size();
        let scale_factor = window.scale_factor();
        let (width, height) = logical_size(window.inner_size(), scale_factor);
        log::info!(
            "window {}x{} at scale {} (surface {}x{}), {} particles",
            width,
            height,
            scale_factor,
            surface_width,
            surface_height,
            self.config.particle_count
        );

        // The field and canvas work in logical pixels; the blit stretches the
        // canvas over the physical surface.
        self.input = Input::new(width, height);
        let canvas = Canvas::new(width, height, self.config.render.background);
        let field = ParticleField::new(width, height, self.config.clone());
        let (animation, handle) = Animation::start(field, &mut WindowScheduler(&window));

        Ok(Running {
            window,
            gpu,
            canvas,
            animation,
            handle,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{}", err);
        if let Some(running) = &self.running {
            running.handle.stop();
        }
        self.failure = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let scale_factor = self.running.as_ref().map_or(1.0, |r| r.window.scale_factor());
        self.input.handle_event(&event, scale_factor);
        let Some(running) = &mut self.running else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                running.handle.stop();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => {
                    running.handle.stop();
                    event_loop.exit();
                }
                KeyCode::Space => {
                    let paused = !running.animation.is_paused();
                    running.animation.set_paused(paused);
                    log::info!("{}", if paused { "paused" } else { "resumed" });
                }
                _ => {}
            },

            WindowEvent::Resized(size) => {
                running.gpu.resize(size.width, size.height);
                if let Some((width, height)) = self.input.take_resize() {
                    if width > 0 && height > 0 {
                        running.canvas.resize(width, height);
                        running.animation.field_mut().resize(width, height);
                    }
                }
                running.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let pointer = self.input.pointer();
                let mut scheduler = WindowScheduler(&running.window);
                if running.animation.frame(&mut running.canvas, pointer, &mut scheduler) == FrameOutcome::Stopped {
                    return;
                }

                match running.gpu.present(&running.canvas) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (width, height) = running.gpu.size();
                        running.gpu.resize(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        running.handle.stop();
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("present failed: {:?}", e),
                }

                if let Some(fps) = self.timer.frame() {
                    let paused = if running.animation.is_paused() { " (paused)" } else { "" };
                    running.window.set_title(&format!("{} - {:.0} fps{}", TITLE, fps, paused));
                }
            }

            _ => {}
        }
    }
}

/// Open a window and animate a field until it is closed.
pub fn run(config: FieldConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
