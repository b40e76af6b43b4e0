#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod meter;

pub use meter::{Counters, CycleMeter};

use error_iter::ErrorIter as _;
use life_grid::{CanvasError, FrameCanvas, World};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const BACKGROUND_COLOR: Color = Color::BLACK;
const LOG_EVERY_GENERATIONS: u64 = 100;

pub const DEFAULT_MAX_GENERATIONS: u64 = 20_000;

#[derive(Debug, thiserror::Error)]
pub enum AnimateError {
    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Pixels(#[from] pixels::Error),
    #[error(transparent)]
    Texture(#[from] pixels::TextureError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// How the host loop paces a run. The world itself knows nothing about time.
#[derive(Clone, Debug)]
pub struct AnimationSettings {
    pub title: String,
    /// Pause between two generations.
    pub time_step: Duration,
    /// Generation at which stepping stops; `None` runs until the window closes.
    pub max_generations: Option<u64>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            title: "Conway's Game of Life".to_string(),
            time_step: Duration::ZERO,
            max_generations: Some(DEFAULT_MAX_GENERATIONS),
        }
    }
}

impl AnimationSettings {
    pub fn finished(&self, generation: u64) -> bool {
        self.max_generations.is_some_and(|max| generation >= max)
    }
}

/// Opens a window sized to the world and runs step/draw cycles until it closes.
pub fn animate<W: World>(settings: AnimationSettings, world: W) -> Result<(), AnimateError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(settings, world);
    event_loop.run_app(&mut handler)?;
    handler.error.map_or(Ok(()), Err)
}

struct App<W: World> {
    world: W,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    meter: CycleMeter,
    next_update: Instant,
}

impl<W: World> App<W> {
    fn new(
        event_loop: &ActiveEventLoop,
        world: W,
        settings: &AnimationSettings,
    ) -> Result<Self, AnimateError> {
        let window = Arc::new(Self::build_window(event_loop, &world, settings)?);
        let pixels = Self::build_pixels(&window, world.pixel_width(), world.pixel_height())?;
        Ok(Self {
            world,
            window,
            pixels,
            meter: CycleMeter::new(),
            next_update: Instant::now(),
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        world: &W,
        settings: &AnimationSettings,
    ) -> Result<Window, AnimateError> {
        let size = PhysicalSize::new(world.pixel_width(), world.pixel_height());
        let window_attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(size)
            .with_min_inner_size(size)
            .with_visible(false);
        Ok(event_loop.create_window(window_attributes)?)
    }

    fn build_pixels(
        window: &Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, AnimateError> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        Ok(PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()?)
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self, settings: &AnimationSettings) {
        if settings.finished(self.world.generation()) {
            return;
        }

        self.world.update();
        self.meter.tick();
        self.window.request_redraw();

        let generation = self.world.generation();
        if generation % LOG_EVERY_GENERATIONS == 0 {
            log::info!("{}", self.counters());
        }
        if settings.finished(generation) {
            log::info!("stopped: {}", self.counters());
        }

        let now = Instant::now();
        if settings.time_step.is_zero() {
            self.next_update = now;
        } else {
            while self.next_update <= now {
                self.next_update += settings.time_step;
            }
        }
    }

    fn on_redraw(&mut self, settings: &AnimationSettings) -> Result<(), AnimateError> {
        let (width, height) = (self.world.pixel_width(), self.world.pixel_height());
        let mut canvas = FrameCanvas::new(self.pixels.frame_mut(), width, height)?;
        let stats = self.world.draw(&mut canvas)?;
        log::trace!(
            "generation {}: drew {} cells",
            self.world.generation(),
            stats.cells_drawn
        );
        self.pixels.render()?;
        self.window.set_title(&format!("{} | {}", settings.title, self.counters()));
        Ok(())
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), AnimateError> {
        self.pixels.resize_surface(size.width, size.height)?;
        self.world.invalidate();
        self.window.request_redraw();
        Ok(())
    }

    fn counters(&self) -> Counters {
        Counters {
            generation: self.world.generation(),
            living_cells: self.world.living_cell_count(),
            total_cells: self.world.num_cells(),
            current_rate: self.meter.current_rate(),
            average_rate: self.meter.average_rate(),
        }
    }
}

struct AppEventHandler<W: World> {
    settings: AnimationSettings,
    world: Option<W>,
    app: Option<App<W>>,
    error: Option<AnimateError>,
}

impl<W: World> AppEventHandler<W> {
    fn new(settings: AnimationSettings, world: W) -> Self {
        Self {
            settings,
            world: Some(world),
            app: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, method_name: &str, err: AnimateError) {
        log_error(method_name, &err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let (StartCause::ResumeTimeReached { .. }, Some(app)) = (cause, self.app.as_mut()) {
            app.on_time_step(&self.settings);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(world) = self.world.take() else {
            return;
        };
        match App::new(event_loop, world, &self.settings) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, "App::new", err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if matches!(code, KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX) {
                    event_loop.exit();
                }
                Ok(())
            }
            WindowEvent::Resized(size) => app.on_resize(size),
            WindowEvent::RedrawRequested => app.on_redraw(&self.settings),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, "window_event", err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_ref() else {
            return;
        };
        if self.settings.finished(app.world.generation()) {
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: &E) {
    log::error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        log::error!("  Caused by: {source}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_stop_at_twenty_thousand() {
        let settings = AnimationSettings::default();
        assert_eq!(settings.time_step, Duration::ZERO);
        assert!(!settings.finished(19_999));
        assert!(settings.finished(20_000));
    }

    #[test]
    fn unlimited_settings_never_finish() {
        let settings = AnimationSettings {
            max_generations: None,
            ..AnimationSettings::default()
        };
        assert!(!settings.finished(u64::MAX));
    }
}
