//! Background builder and runner.
//!
//! [`Background`] is the public face of the crate: configure the field with
//! method chaining, then call [`run`](Background::run) to start the render
//! loop. The loop owns every resource it creates and releases all of it when
//! the window closes; a frame callback that fires during teardown finds no
//! GPU state and does nothing.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::config::{ColorScheme, FieldConfig};
use crate::error::BackgroundError;
use crate::field::ParticleField;
use crate::gpu::GpuState;
use crate::pointer::PointerTracker;
use crate::time::FrameClock;

/// Environment signals a host can deliver to a running background.
///
/// Sent through the [`EventLoopProxy`] handed out by
/// [`Background::run_with`]; delivery is fire-and-forget and last-value-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// The host's reduced-motion preference changed.
    ReducedMotion(bool),
}

/// An ambient particle-network background.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// use netfield::Background;
///
/// Background::new()
///     .with_particle_count(200)
///     .with_speed(0.2)
///     .run()?;
/// ```
pub struct Background {
    config: FieldConfig,
}

impl Background {
    /// Create a background with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
        }
    }

    /// Set an explicit particle count instead of deriving it from the
    /// surface width.
    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.config.particle_count = Some(count);
        self
    }

    /// Set the rendered point size in world units.
    pub fn with_particle_size(mut self, size: f32) -> Self {
        self.config.particle_size = size;
        self
    }

    /// Set the distance under which particles are connected.
    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.config.connection_distance = distance;
        self
    }

    /// Set the connection opacity at distance zero.
    pub fn with_connection_opacity(mut self, opacity: f32) -> Self {
        self.config.connection_opacity = opacity;
        self
    }

    /// Set the layer colors.
    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.config.colors = colors;
        self
    }

    /// Set the radius of the placement sphere.
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.config.depth = depth;
        self
    }

    /// Set the global angular speed scalar.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.config.speed = speed;
        self
    }

    /// Enable or disable camera drift toward the pointer.
    pub fn with_follow_mouse(mut self, follow: bool) -> Self {
        self.config.follow_mouse = follow;
        self
    }

    /// Override the sampled reduced-motion preference.
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.config.reduced_motion = reduced;
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Run the background. Blocks until the window is closed.
    pub fn run(self) -> Result<(), BackgroundError> {
        self.run_with(|_proxy| {})
    }

    /// Like [`run`](Self::run), but hands an [`EventLoopProxy`] to the
    /// caller first so another thread can deliver [`FieldEvent`]s (such as
    /// reduced-motion preference changes) while the loop runs.
    pub fn run_with(
        self,
        before_run: impl FnOnce(EventLoopProxy<FieldEvent>),
    ) -> Result<(), BackgroundError> {
        let event_loop = EventLoop::<FieldEvent>::with_user_event().build()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        before_run(event_loop.create_proxy());

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;
        app.into_result()
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

/// The winit application driving the field.
struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: Option<ParticleField>,
    camera: Option<Camera>,
    pointer: PointerTracker,
    clock: FrameClock,
    reduced_motion: bool,
    init_error: Option<BackgroundError>,
}

impl App {
    fn new(config: FieldConfig) -> Self {
        let reduced_motion = config.reduced_motion;
        Self {
            config,
            window: None,
            gpu: None,
            field: None,
            camera: None,
            pointer: PointerTracker::new(1, 1),
            clock: FrameClock::new(),
            reduced_motion,
            init_error: None,
        }
    }

    /// Advance and draw one frame. No-ops if teardown already ran.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(field), Some(camera)) =
            (self.gpu.as_mut(), self.field.as_mut(), self.camera.as_mut())
        else {
            return;
        };

        let (elapsed, _delta) = self.clock.tick();

        if !self.reduced_motion {
            field.step(elapsed);
            if self.config.follow_mouse {
                camera.follow(self.pointer.offset());
            }
        }

        let connections = field.connections();

        match gpu.render(camera, elapsed, field.particles(), &connections) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                width: gpu.config.width,
                height: gpu.config.height,
            }),
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => eprintln!("Render error: {:?}", e),
        }
    }

    /// Release everything acquired at construction and stop the loop.
    ///
    /// Dropping the GPU state releases the surface, buffers, and pipelines;
    /// dropping the window detaches its event delivery. Both are `Option`s
    /// so a frame already scheduled when teardown began finds `None` and
    /// no-ops instead of touching freed resources.
    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        self.gpu = None;
        self.field = None;
        self.camera = None;
        self.window = None;
        event_loop.exit();
    }

    fn apply_event(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::ReducedMotion(reduced) => {
                self.reduced_motion = reduced;
            }
        }
    }

    fn into_result(self) -> Result<(), BackgroundError> {
        match self.init_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler<FieldEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("netfield")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.init_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let count = self.config.resolved_count(size.width);

        self.pointer = PointerTracker::new(size.width, size.height);
        self.field = Some(ParticleField::new(&self.config, count));
        self.camera = Some(Camera::new(size.width.max(1) as f32 / size.height.max(1) as f32));

        match pollster::block_on(GpuState::new(window.clone(), &self.config, count)) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.window = Some(window);
                self.clock = FrameClock::new();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(e) => {
                self.init_error = Some(e.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.config.follow_mouse {
            self.pointer.handle_event(&event);
        }

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.teardown(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(camera) = &mut self.camera {
                    camera.set_aspect(
                        physical_size.width.max(1) as f32 / physical_size.height.max(1) as f32,
                    );
                }
                self.pointer
                    .set_window_size(physical_size.width, physical_size.height);
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FieldEvent) {
        self.apply_event(event);
    }
}
