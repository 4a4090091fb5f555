//! Windowed host for the physics canvas.
//!
//! Only compiled with the `window` feature. [`CanvasApp`] drives a winit
//! event loop: pointer events go to the canvas, redraws drain the fixed-step
//! clock and paint through the egui layer. Dropping the app tears everything
//! down; nothing outlives the loop.
//!
//! # Example
//!
//! ```ignore
//! use bobble::app::CanvasApp;
//! use bobble::canvas::PhysicsCanvas;
//!
//! CanvasApp::new(PhysicsCanvas::new(1280.0, 720.0)).run()?;
//! # Ok::<(), bobble::error::CanvasError>(())
//! ```

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::canvas::PhysicsCanvas;
use crate::error::CanvasError;
use crate::gpu::GpuState;
use crate::render::BACKGROUND;
use crate::time::{StepClock, Time};

/// Physics tick rate, decoupled from the display refresh rate.
const PHYSICS_HZ: f32 = 60.0;

/// Windowed application hosting one [`PhysicsCanvas`].
pub struct CanvasApp {
    canvas: PhysicsCanvas,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    time: Time,
    clock: StepClock,
    cursor: Vec2,
}

impl CanvasApp {
    pub fn new(canvas: PhysicsCanvas) -> Self {
        Self {
            canvas,
            window: None,
            gpu: None,
            time: Time::new(),
            clock: StepClock::new(PHYSICS_HZ),
            cursor: Vec2::ZERO,
        }
    }

    /// Run the event loop until the window closes.
    pub fn run(mut self) -> Result<(), CanvasError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn logical_size(window: &Window) -> Vec2 {
        let size = window.inner_size().to_logical::<f32>(window.scale_factor());
        Vec2::new(size.width, size.height)
    }
}

impl ApplicationHandler for CanvasApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("bobble")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                eprintln!("GPU error: {}", e);
                event_loop.exit();
                return;
            }
        }

        if !self.canvas.is_mounted() {
            if let Err(e) = self.canvas.mount() {
                eprintln!("{}", e);
                event_loop.exit();
                return;
            }
        }
        let size = Self::logical_size(&window);
        self.canvas.resize(size.x, size.y);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if let Some(gpu) = &mut self.gpu {
            gpu.on_window_event(&window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                let size = Self::logical_size(&window);
                self.canvas.resize(size.x, size.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => self.canvas.pointer_pressed(self.cursor),
                        ElementState::Released => self.canvas.pointer_released(),
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(window.scale_factor());
                self.cursor = Vec2::new(logical.x, logical.y);
                self.canvas.pointer_moved(self.cursor);
            }
            WindowEvent::CursorLeft { .. } => {
                self.canvas.pointer_left();
            }
            WindowEvent::RedrawRequested => {
                let (_, delta) = self.time.update();
                for _ in 0..self.clock.accumulate(delta) {
                    self.canvas.step();
                }

                if let Some(gpu) = &mut self.gpu {
                    let canvas = &self.canvas;
                    match gpu.render(&window, BACKGROUND, |frame| canvas.draw(frame)) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            let size = window.inner_size();
                            gpu.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                window.request_redraw();
            }
            _ => {}
        }
    }
}
