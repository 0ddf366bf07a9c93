//! egui integration with wgpu and winit.

use egui::Context;
use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State as EguiWinitState;
use winit::event::WindowEvent;
use winit::window::Window;

/// Background behind all browser windows.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.08,
    g: 0.08,
    b: 0.09,
    a: 1.0,
};

/// Manages egui state and rendering.
pub struct EguiIntegration {
    pub context: Context,
    pub state: EguiWinitState,
    pub renderer: EguiRenderer,
}

impl EguiIntegration {
    /// Creates a new egui integration.
    #[must_use]
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        context.set_visuals(egui::Visuals::dark());

        let viewport_id = context.viewport_id();
        let state = EguiWinitState::new(context.clone(), viewport_id, window, None, None, None);

        let renderer =
            EguiRenderer::new(device, output_format, egui_wgpu::RendererOptions::default());

        Self {
            context,
            state,
            renderer,
        }
    }

    /// Handles a winit window event.
    /// Returns true if egui consumed the event.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Runs the UI for one frame and handles its platform output.
    ///
    /// `run_ui` may be called more than once per frame: widgets such as
    /// `Grid` size themselves in a first pass and ask for the pass to be
    /// discarded, in which case the frame is laid out again with the same
    /// input minus its events.
    pub fn run_frame(&mut self, window: &Window, mut run_ui: impl FnMut(&Context)) -> egui::FullOutput {
        let mut raw_input = self.state.take_egui_input(window);
        let max_passes = self.context.options(|o| o.max_passes.get());

        // The first take moves the events out, later passes see none.
        let mut output = self.run_pass(raw_input.take(), &mut run_ui);
        let mut passes = 1;
        while self.context.will_discard() && passes < max_passes {
            log::trace!("egui requested pass {}", passes + 1);
            output.append(self.run_pass(raw_input.take(), &mut run_ui));
            passes += 1;
        }

        self.state
            .handle_platform_output(window, output.platform_output.clone());
        output
    }

    fn run_pass(&self, raw_input: egui::RawInput, run_ui: &mut impl FnMut(&Context)) -> egui::FullOutput {
        self.context.begin_pass(raw_input);
        run_ui(&self.context);
        self.context.end_pass()
    }

    /// Clears `view` and renders the frame's output into it.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen_descriptor: &ScreenDescriptor,
        output: egui::FullOutput,
    ) {
        let paint_jobs = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.renderer
            .update_buffers(device, queue, encoder, &paint_jobs, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("demo browser pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            // egui-wgpu renders into a 'static pass
            let mut render_pass = render_pass.forget_lifetime();

            self.renderer
                .render(&mut render_pass, &paint_jobs, screen_descriptor);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
