//! Application window and event loop management.

mod gpu;

use std::sync::Arc;

use demo_manual_ui::{DemoBrowser, EguiIntegration};
use egui_wgpu::ScreenDescriptor;
use pollster::FutureExt;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

pub use gpu::{GpuContext, GpuError};

const WINDOW_TITLE: &str = "demo-manual";

/// The browser application state.
pub struct App {
    browser: DemoBrowser,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    egui: Option<EguiIntegration>,
    error: Option<GpuError>,
}

impl App {
    pub fn new(browser: DemoBrowser) -> Self {
        Self {
            browser,
            window: None,
            gpu: None,
            egui: None,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), GpuError> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1280, 800));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let gpu = GpuContext::new_windowed(window.clone()).block_on()?;
        let egui = EguiIntegration::new(&gpu.device, gpu.surface_config.format, &window);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui = Some(egui);
        Ok(())
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(egui)) = (&self.window, &mut self.gpu, &mut self.egui)
        else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of memory");
                event_loop.exit();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout");
                return;
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("surface error: other");
                return;
            }
        };

        let browser = &mut self.browser;
        browser.begin_frame();
        let full_output = egui.run_frame(window, |ctx| browser.ui(ctx));

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: gpu.size_in_pixels(),
            pixels_per_point: full_output.pixels_per_point,
        };
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("browser encoder"),
            });

        egui.render(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &view,
            &screen_descriptor,
            full_output,
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));
        window.pre_present_notify();
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            log::error!("{err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if let Some(egui) = &mut self.egui {
            egui.handle_event(&window, &event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                self.render(event_loop);
                window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Runs the browser until its window is closed.
pub fn run_app(browser: DemoBrowser) -> Result<(), GpuError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(browser);

    event_loop.run_app(&mut app)?;
    app.error.map_or(Ok(()), Err)
}
