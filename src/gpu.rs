//! GPU surface and egui painting for the windowed frontend.
//!
//! Only compiled with the `window` feature. [`GpuState`] owns the wgpu
//! surface/device/queue plus the egui context used as the drawing layer;
//! [`EguiFrame`] adapts an [`egui::Painter`] to the crate's
//! [`FrameRenderer`](crate::render::FrameRenderer) seam.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use winit::window::Window;

use crate::error::GpuError;
use crate::render::FrameRenderer;

fn to_color32(color: Vec3) -> egui::Color32 {
    egui::Color32::from_rgb(
        (color.x.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.y.clamp(0.0, 1.0) * 255.0).round() as u8,
        (color.z.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// [`FrameRenderer`](crate::render::FrameRenderer) over an egui painter.
///
/// Lives for one frame; the painter draws into egui's background layer,
/// which the surrounding render pass composites over the clear color.
pub struct EguiFrame {
    painter: egui::Painter,
    size: Vec2,
}

impl EguiFrame {
    pub fn new(painter: egui::Painter, size: Vec2) -> Self {
        Self { painter, size }
    }
}

impl FrameRenderer for EguiFrame {
    fn clear(&mut self, color: Vec3) {
        let rect = egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::Vec2::new(self.size.x, self.size.y),
        );
        self.painter
            .rect_filled(rect, egui::CornerRadius::ZERO, to_color32(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec3) {
        self.painter.circle_filled(
            egui::Pos2::new(center.x, center.y),
            radius,
            to_color32(color),
        );
    }

    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: Vec3) {
        self.painter.text(
            egui::Pos2::new(center.x, center.y),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size),
            to_color32(color),
        );
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }
}

/// Surface, device, and the egui layer that paints the canvas.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Feed a winit event to egui's input state.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) {
        let _ = self.egui_state.on_window_event(window, event);
    }

    /// Paint one frame: clear to `clear_color`, then run `paint` against an
    /// [`EguiFrame`] and composite the egui output onto the surface.
    pub fn render(
        &mut self,
        window: &Window,
        clear_color: Vec3,
        paint: impl FnOnce(&mut EguiFrame),
    ) -> Result<(), wgpu::SurfaceError> {
        let raw_input = self.egui_state.take_egui_input(window);
        self.egui_ctx.begin_pass(raw_input);

        let painter = self.egui_ctx.layer_painter(egui::LayerId::background());
        let logical = window
            .inner_size()
            .to_logical::<f32>(window.scale_factor());
        let mut frame = EguiFrame::new(painter, Vec2::new(logical.width, logical.height));
        paint(&mut frame);

        let full_output = self.egui_ctx.end_pass();
        self.egui_state
            .handle_platform_output(window, full_output.platform_output);
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Encoder"),
            });

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color.x as f64,
                            g: clear_color.y as f64,
                            b: clear_color.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}
