//! Interactive scatter viewer window
//!
//! Wires winit events into the [`ScatterController`] and draws the scene and
//! the control panel every frame.

use std::sync::Arc;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use scattercrate_core::{Error, Point3f, PointCloud, Result};
use scattercrate_gpu::ScatterRenderer;
use crate::config::ViewerConfig;
use crate::controller::{InputEvent, ScatterController, ViewerCommand};
use crate::input::wheel_delta_units;
use crate::overlay::{control_panel, PanelStatus, UiOverlay};

/// Window size used when no monitor information is available
fn fallback_size() -> PhysicalSize<u32> {
    PhysicalSize::new(1280, 800)
}

/// Interactive 3D scatter viewer
pub struct InteractiveViewer {
    config: ViewerConfig,
    controller: ScatterController,
}

impl InteractiveViewer {
    pub fn new(config: ViewerConfig) -> Self {
        let controller = ScatterController::new(&config);
        Self { config, controller }
    }

    /// Replace the displayed points
    pub fn set_point_cloud(&mut self, cloud: PointCloud<Point3f>) {
        self.controller.dispatch(ViewerCommand::ReplacePoints(cloud));
    }

    pub fn dispatch(&mut self, command: ViewerCommand) {
        self.controller.dispatch(command);
    }

    pub fn controller(&self) -> &ScatterController {
        &self.controller
    }

    /// Open the window and run until it is closed
    ///
    /// Failing to create the window or the GPU context yields
    /// [`Error::RenderContextUnavailable`].
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::RenderContextUnavailable(format!("Failed to create event loop: {}", e)))?;

        let min_size = event_loop
            .primary_monitor()
            .map(|monitor| {
                let size = monitor.size();
                PhysicalSize::new(size.width / 2, size.height * 2 / 3)
            })
            .unwrap_or_else(fallback_size);

        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.config.title.as_str())
                .with_inner_size(min_size)
                .with_min_inner_size(min_size)
                .build(&event_loop)
                .map_err(|e| Error::RenderContextUnavailable(format!("Failed to create window: {}", e)))?,
        );

        let mut renderer = pollster::block_on(ScatterRenderer::new(window.clone(), self.config.render_config()))?;
        let mut overlay = UiOverlay::new(&window, &renderer);

        let size = window.inner_size();
        self.controller.handle_input(InputEvent::Resized {
            width: size.width,
            height: size.height,
        });

        log::info!("Viewer window {}x{} ready", size.width, size.height);

        let mut last_frame = instant::Instant::now();
        let mut failure: Option<Error> = None;
        let controller = &mut self.controller;

        event_loop
            .run(|event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::WindowEvent { event, .. } => {
                        let consumed = overlay.on_window_event(&window, &event);

                        match event {
                            WindowEvent::CloseRequested => {
                                target.exit();
                            }
                            WindowEvent::Resized(new_size) => {
                                renderer.resize(new_size);
                                controller.handle_input(InputEvent::Resized {
                                    width: new_size.width,
                                    height: new_size.height,
                                });
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                if overlay.wants_pointer() {
                                    controller.handle_input(InputEvent::PointerLeft);
                                } else {
                                    controller.handle_input(InputEvent::PointerMoved {
                                        x: position.x as f32,
                                        y: position.y as f32,
                                    });
                                }
                            }
                            WindowEvent::CursorLeft { .. } => {
                                controller.handle_input(InputEvent::PointerLeft);
                            }
                            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                                controller.handle_input(InputEvent::Wheel {
                                    delta_y: wheel_delta_units(delta),
                                });
                            }
                            WindowEvent::RedrawRequested => {
                                let now = instant::Instant::now();
                                controller.advance(now - last_frame);
                                last_frame = now;

                                let scene = controller.scene();
                                renderer.update_camera(scene.view_projection(), scene.light_direction());

                                let mut frame = match renderer.begin_frame() {
                                    Ok(Some(frame)) => frame,
                                    Ok(None) => return,
                                    Err(e) => {
                                        log::error!("Rendering failed: {}", e);
                                        failure = Some(e);
                                        target.exit();
                                        return;
                                    }
                                };

                                let instances = scene.build_instances();
                                renderer.draw_scene(&mut frame, &instances.markers, &instances.shadows);

                                let status = PanelStatus {
                                    animation_running: controller.animator().is_running(),
                                    shadow_quality: scene.shadow_quality(),
                                    point_count: scene.store().len(),
                                    visible_count: scene.visible_count(),
                                    zoom_level: controller.zoom_level().get(),
                                    selected_label: scene.selected_label(),
                                };
                                let mut commands = Vec::new();
                                let ui_buffers = overlay.draw(&window, &renderer, &mut frame, |ctx| {
                                    control_panel(ctx, &status, &mut commands);
                                });
                                renderer.finish_frame(frame, ui_buffers);

                                for command in commands {
                                    controller.dispatch(command);
                                }
                            }
                            _ => {}
                        }
                    }
                    Event::AboutToWait => {
                        window.request_redraw();
                    }
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for InteractiveViewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_point_cloud_reaches_scene() {
        let mut viewer = InteractiveViewer::default();
        viewer.set_point_cloud(PointCloud::from_points(vec![
            Point3f::new(1.0, 2.0, 3.0),
            Point3f::new(4.0, 5.0, 6.0),
        ]));
        assert_eq!(viewer.controller().scene().store().len(), 2);
    }
}
