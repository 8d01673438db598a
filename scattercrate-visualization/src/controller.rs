//! Typed dispatch of input events and viewer commands

use std::time::Duration;
use scattercrate_core::{Point3f, PointCloud};
use scattercrate_gpu::ShadowQuality;
use crate::animation::CameraOrbitAnimator;
use crate::camera::{on_wheel, ZoomLevel};
use crate::config::ViewerConfig;
use crate::input::InputHandler;
use crate::scene::Scene;
use crate::selection::SelectionPoller;

/// Raw input coming from the render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `(x, y)` in physical pixels
    PointerMoved { x: f32, y: f32 },
    /// Pointer left the render surface
    PointerLeft,
    /// Wheel turned by `delta_y` units, 120 per notch
    Wheel { delta_y: i32 },
    Resized { width: u32, height: u32 },
}

/// Requests issued by the control panel or the command line
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    ToggleCameraAnimation,
    SetShadowQuality(ShadowQuality),
    ReplacePoints(PointCloud<Point3f>),
}

/// Owns the scene and every timeline that drives it
#[derive(Debug, Clone)]
pub struct ScatterController {
    scene: Scene,
    animator: CameraOrbitAnimator,
    input: InputHandler,
    poller: SelectionPoller,
}

impl ScatterController {
    pub fn new(config: &ViewerConfig) -> Self {
        let mut controller = Self {
            scene: Scene::new(config),
            animator: CameraOrbitAnimator::from_config(config),
            input: InputHandler::new(),
            poller: SelectionPoller::new(config.selection_interval),
        };
        controller.sync_camera();
        controller
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.input.pointer_moved(x, y),
            InputEvent::PointerLeft => self.input.pointer_left(),
            InputEvent::Wheel { delta_y } => {
                let camera = self.scene.camera_mut();
                let zoom = on_wheel(camera.zoom_level(), delta_y);
                if zoom != camera.zoom_level() {
                    log::trace!("Zoom level {} -> {}", camera.zoom_level().get(), zoom.get());
                }
                camera.set_zoom_level(zoom);
            }
            InputEvent::Resized { width, height } => self.scene.set_viewport(width, height),
        }
    }

    pub fn dispatch(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::ToggleCameraAnimation => self.animator.toggle(),
            ViewerCommand::SetShadowQuality(quality) => self.scene.set_shadow_quality(quality),
            ViewerCommand::ReplacePoints(cloud) => {
                log::info!("Displaying {} points", cloud.len());
                self.scene.reset_points(cloud);
            }
        }
    }

    /// Advance every timeline by `dt` and resolve the selection for this frame
    pub fn advance(&mut self, dt: Duration) {
        self.animator.advance(dt);
        self.sync_camera();
        self.poller.advance(dt, self.input.pointer(), &mut self.scene);
        self.scene.resolve_selection();
    }

    fn sync_camera(&mut self) {
        let angles = self.animator.angles();
        self.scene
            .camera_mut()
            .set_rotation(angles.x_rotation, angles.y_rotation);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn animator(&self) -> &CameraOrbitAnimator {
        &self.animator
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        self.scene.camera().zoom_level()
    }
}

impl Default for ScatterController {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationState;
    use approx::assert_relative_eq;

    #[test]
    fn test_wheel_updates_zoom() {
        let mut controller = ScatterController::default();
        controller.handle_input(InputEvent::Wheel { delta_y: 120 });
        assert_eq!(controller.zoom_level().get(), 102);
        controller.handle_input(InputEvent::Wheel { delta_y: -100_000 });
        assert_eq!(controller.zoom_level(), ZoomLevel::MIN);
    }

    #[test]
    fn test_toggle_command_pauses_camera() {
        let mut controller = ScatterController::default();
        controller.advance(Duration::from_millis(1_000));
        let x = controller.scene().camera().x_rotation();

        controller.dispatch(ViewerCommand::ToggleCameraAnimation);
        assert_eq!(controller.animator().state(), AnimationState::Paused);
        controller.advance(Duration::from_millis(1_000));
        assert_relative_eq!(controller.scene().camera().x_rotation(), x);
    }

    #[test]
    fn test_camera_follows_animator() {
        let mut controller = ScatterController::default();
        controller.advance(Duration::from_millis(5_000));
        assert_relative_eq!(controller.scene().camera().x_rotation(), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_shadow_quality_command() {
        let mut controller = ScatterController::default();
        controller.dispatch(ViewerCommand::SetShadowQuality(ShadowQuality::SoftHigh));
        assert_eq!(controller.scene().shadow_quality(), ShadowQuality::SoftHigh);
    }

    #[test]
    fn test_pointer_left_clears_selection_on_next_tick() {
        let config = ViewerConfig {
            start_paused: true,
            ..ViewerConfig::default()
        };
        let mut controller = ScatterController::new(&config);
        controller.handle_input(InputEvent::Resized { width: 800, height: 600 });
        controller.dispatch(ViewerCommand::ReplacePoints(PointCloud::from_points(vec![
            Point3f::new(0.0, 0.0, 0.0),
        ])));

        let camera = controller.scene().camera().clone();
        let center = camera.project(&Point3f::origin(), 800.0, 600.0).unwrap();
        controller.handle_input(InputEvent::PointerMoved { x: center.x, y: center.y });
        controller.advance(Duration::from_millis(10));
        assert!(controller.scene().selected().is_some());

        controller.handle_input(InputEvent::PointerLeft);
        controller.advance(Duration::from_millis(3));
        // No tick yet
        assert!(controller.scene().selected().is_some());
        controller.advance(Duration::from_millis(7));
        assert!(controller.scene().selected().is_none());
    }
}
