//! Desktop window shell built on winit.
//!
//! Keyboard stands in for the page buttons: `S` starts recognition, `T`
//! stops it (and nods), `Esc` quits. Mouse drives the orbit camera.
//!
//! ```rust,ignore
//! let viewer = Viewer::with_settings(settings)?;
//! viewer.load_assets();
//! App::new().with_title("Nod Viewer").run(viewer, HeadlessRenderer::new())?;
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::controller::ControlState;
use crate::errors::Result;
use crate::event::ViewerEvent;
use crate::input::{Input, Key};
use crate::render::RenderBackend;
use crate::utils::time::Timer;
use crate::viewer::Viewer;

pub mod input_adapter;

/// Key that emits [`ViewerEvent::StartClicked`].
pub const START_KEY: Key = Key::Character('s');
/// Key that emits [`ViewerEvent::StopClicked`].
pub const STOP_KEY: Key = Key::Character('t');

pub struct App {
    title: String,
    width: u32,
    height: u32,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Nod Viewer".into(),
            width: 1280,
            height: 720,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Runs the event loop until the window closes.
    pub fn run<R: RenderBackend>(self, viewer: Viewer, renderer: R) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner {
            title: self.title,
            size: (self.width, self.height),
            window: None,
            viewer,
            renderer,
            input: Input::new(),
            timer: Timer::new(),
            shown_controls: None,
        };
        event_loop.run_app(&mut runner)?;
        Ok(())
    }
}

struct AppRunner<R: RenderBackend> {
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,

    viewer: Viewer,
    renderer: R,
    input: Input,
    timer: Timer,

    shown_controls: Option<ControlState>,
}

impl<R: RenderBackend> AppRunner<R> {
    fn on_key_pressed(&mut self, event_loop: &ActiveEventLoop, key: Key) {
        let event = match key {
            START_KEY => ViewerEvent::StartClicked,
            STOP_KEY => ViewerEvent::StopClicked,
            Key::Escape => {
                event_loop.exit();
                return;
            }
            _ => return,
        };
        self.viewer.sender().send_or_log(event);
    }

    fn redraw(&mut self) {
        self.timer.tick();
        self.viewer
            .frame(&self.input, self.timer.dt_seconds(), &mut self.renderer);
        self.input.start_frame();
        self.sync_title();
    }

    /// Mirrors the control state in the window title.
    fn sync_title(&mut self) {
        let controls = self.viewer.control_state();
        if self.shown_controls == Some(controls) {
            return;
        }
        self.shown_controls = Some(controls);

        if let Some(window) = &self.window {
            let hint = if controls.stop_enabled {
                "[T] stop"
            } else {
                "[S] start"
            };
            window.set_title(&format!("{} - {hint}", self.title));
        }
    }
}

impl<R: RenderBackend> ApplicationHandler for AppRunner<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.input.inject_resize(size.width, size.height);
                self.viewer.resize(size.width, size.height, &mut self.renderer);
                self.window = Some(Arc::new(window));
            }
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(key) = input_adapter::process_window_event(&mut self.input, &event) {
            self.on_key_pressed(event_loop, key);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.viewer.resize(size.width, size.height, &mut self.renderer);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
