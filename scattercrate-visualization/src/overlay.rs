//! egui control panel drawn over the scene

use winit::event::WindowEvent;
use winit::window::Window;
use scattercrate_gpu::{FrameTarget, ScatterRenderer, ShadowQuality};
use crate::controller::ViewerCommand;

/// What the control panel shows about the current state
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStatus {
    pub animation_running: bool,
    pub shadow_quality: ShadowQuality,
    pub point_count: usize,
    pub visible_count: usize,
    pub zoom_level: i32,
    pub selected_label: Option<String>,
}

/// Build the side panel, pushing a command for every user action
pub fn control_panel(ctx: &egui::Context, status: &PanelStatus, commands: &mut Vec<ViewerCommand>) {
    egui::SidePanel::right("scatter_controls")
        .resizable(false)
        .min_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Controls");
            ui.add_space(4.0);

            if ui.button("Toggle camera animation").clicked() {
                commands.push(ViewerCommand::ToggleCameraAnimation);
            }
            ui.label(if status.animation_running { "Animation running" } else { "Animation paused" });

            ui.separator();
            ui.label("Shadow quality");
            let mut quality = status.shadow_quality;
            egui::ComboBox::from_id_source("shadow_quality")
                .selected_text(quality.label())
                .show_ui(ui, |ui| {
                    for option in ShadowQuality::ALL {
                        ui.selectable_value(&mut quality, option, option.label());
                    }
                });
            if quality != status.shadow_quality {
                commands.push(ViewerCommand::SetShadowQuality(quality));
            }

            ui.separator();
            if status.visible_count == status.point_count {
                ui.label(format!("Points: {}", status.point_count));
            } else {
                ui.label(format!("Points: {} ({} in range)", status.point_count, status.visible_count));
            }
            ui.label(format!("Zoom: {}%", status.zoom_level));
            match &status.selected_label {
                Some(label) => ui.label(format!("Selected: {}", label)),
                None => ui.label("Selected: none"),
            };
        });
}

/// egui renderer drawing straight onto the surface, no depth and no MSAA
fn ui_renderer(device: &wgpu::Device, format: wgpu::TextureFormat) -> egui_wgpu::Renderer {
    egui_wgpu::Renderer::new(device, format, None, 1)
}

/// egui state and renderer for one window
pub struct UiOverlay {
    context: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiOverlay {
    pub fn new(window: &Window, renderer: &ScatterRenderer) -> Self {
        let context = egui::Context::default();
        let state = egui_winit::State::new(
            context.clone(),
            egui::viewport::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
        );
        let renderer = ui_renderer(renderer.device(), renderer.surface_format());

        Self {
            context,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui; returns true when egui consumed it
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Whether egui currently wants pointer input for itself
    pub fn wants_pointer(&self) -> bool {
        self.context.wants_pointer_input() || self.context.is_pointer_over_area()
    }

    /// Run the UI and record its draw commands into `frame`
    ///
    /// Returns the command buffers egui needs submitted before the frame.
    pub fn draw(
        &mut self,
        window: &Window,
        scatter: &ScatterRenderer,
        frame: &mut FrameTarget,
        run_ui: impl FnMut(&egui::Context),
    ) -> Vec<wgpu::CommandBuffer> {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.context.run(raw_input, run_ui);
        self.state.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .context
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [scatter.surface_config.width, scatter.surface_config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(scatter.device(), scatter.queue(), *id, delta);
        }
        let command_buffers = self.renderer.update_buffers(
            scatter.device(),
            scatter.queue(),
            &mut frame.encoder,
            &paint_jobs,
            &screen,
        );

        {
            let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.render(&mut render_pass, &paint_jobs, &screen);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
        command_buffers
    }
}
