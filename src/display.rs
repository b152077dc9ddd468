/*!
Host window: presents the console's front buffer with `pixels` and drives
emulation from wall-clock time.

Each redraw measures the time since the previous one, runs
`Console::step_seconds` for it (clamped so a stalled window does not
trigger a burst of catch-up), copies the front buffer into the pixel
surface and requests the next redraw.
*/

use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::console::Console;
use crate::error::{Error, Result};
use crate::ppu::{NES_HEIGHT, NES_WIDTH};

/// Longest slice of emulated time run per redraw.
const MAX_FRAME_SECONDS: f64 = 0.1;
const WINDOW_SCALE: f64 = 2.0;

struct App {
    console: Console,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    last: Instant,
    error: Option<Error>,
}

impl App {
    fn new(console: Console) -> Self {
        Self {
            console,
            window: None,
            pixels: None,
            last: Instant::now(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("rustendo")
            .with_inner_size(LogicalSize::new(
                NES_WIDTH as f64 * WINDOW_SCALE,
                NES_HEIGHT as f64 * WINDOW_SCALE,
            ))
            .with_min_inner_size(LogicalSize::new(NES_WIDTH as f64, NES_HEIGHT as f64));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| Error::Display(e.to_string()))?,
        );
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(NES_WIDTH as u32, NES_HEIGHT as u32, surface)
            .map_err(|e| Error::Display(e.to_string()))?;

        info!("window opened at {}x{}", size.width, size.height);
        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
        self.last = Instant::now();
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        self.console.step_seconds(elapsed.min(MAX_FRAME_SECONDS));

        if let Some(pixels) = self.pixels.as_mut() {
            pixels.frame_mut().copy_from_slice(self.console.buffer());
            pixels.render().map_err(|e| Error::Display(e.to_string()))?;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.open(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        self.fail(event_loop, Error::Display(e.to_string()));
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

/// Open a window and run `console` until it is closed.
pub fn run(console: Console) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| Error::Display(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(console);
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Display(e.to_string()))?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
