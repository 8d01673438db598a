//! Camera utilities for 3D visualization

use nalgebra::{Point3, Vector3, Matrix4, Perspective3};

/// Wheel units reported for one notch of a standard mouse wheel
pub const WHEEL_NOTCH: i32 = 120;

/// Camera magnification in percent, kept within `10..=500`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(i32);

impl ZoomLevel {
    pub const MIN: ZoomLevel = ZoomLevel(10);
    pub const MAX: ZoomLevel = ZoomLevel(500);
    pub const DEFAULT: ZoomLevel = ZoomLevel(100);

    /// Create a zoom level, clamping `value` into the valid range
    pub fn new(value: i32) -> Self {
        ZoomLevel(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Wheel units per zoom step at the given level
///
/// Steps get coarser as the zoom grows so that each notch feels about the
/// same.
pub fn wheel_divisor(level: ZoomLevel) -> i32 {
    match level.get() {
        z if z > 100 => 12,
        z if z > 50 => 60,
        _ => 120,
    }
}

/// Zoom level after one wheel event of `wheel_delta_y` units
///
/// The step is truncated toward zero, so deltas smaller than one step at the
/// current level do nothing.
pub fn on_wheel(current: ZoomLevel, wheel_delta_y: i32) -> ZoomLevel {
    let delta = wheel_delta_y / wheel_divisor(current);
    ZoomLevel::new(current.get().saturating_add(delta))
}

/// Screen-space projection of a world point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Normalized depth in `[0, 1]`, smaller is closer
    pub depth: f32,
}

/// An orbiting camera looking at a fixed target
///
/// The position is derived from two rotations and the zoom level:
/// `x_rotation` turns around the vertical axis and `y_rotation` lifts the
/// camera above the horizon, both in degrees. Rotations of zero look at the
/// scene from the front.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    x_rotation: f32,
    y_rotation: f32,
    zoom_level: ZoomLevel,
    base_distance: f32,
}

impl Camera {
    /// Create a camera orbiting `target` at `base_distance` for zoom level 100
    pub fn new(target: Point3<f32>, base_distance: f32) -> Self {
        let mut camera = Self {
            position: target,
            target,
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect_ratio: 16.0 / 9.0,
            near: 0.01,
            far: 500.0,
            x_rotation: 0.0,
            y_rotation: 0.0,
            zoom_level: ZoomLevel::DEFAULT,
            base_distance,
        };
        camera.update_position();
        camera
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix, with depth mapped to `[0, 1]`
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        opengl_to_wgpu() * perspective.into_inner()
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Set both orbit rotations, in degrees
    pub fn set_rotation(&mut self, x_rotation: f32, y_rotation: f32) {
        self.x_rotation = x_rotation;
        self.y_rotation = y_rotation.clamp(-89.0, 89.0);
        self.update_position();
    }

    pub fn x_rotation(&self) -> f32 {
        self.x_rotation
    }

    pub fn y_rotation(&self) -> f32 {
        self.y_rotation
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        self.zoom_level
    }

    pub fn set_zoom_level(&mut self, zoom_level: ZoomLevel) {
        self.zoom_level = zoom_level;
        self.update_position();
    }

    /// Distance between camera and target for the current zoom level
    pub fn distance(&self) -> f32 {
        self.base_distance * 100.0 / self.zoom_level.get() as f32
    }

    /// Project a world point onto a viewport of `width` x `height` pixels
    ///
    /// Returns `None` for points behind the camera or outside the depth range.
    pub fn project(&self, point: &Point3<f32>, width: f32, height: f32) -> Option<ScreenPoint> {
        let clip = self.view_projection() * point.to_homogeneous();
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * width,
            y: (1.0 - ndc.y) * 0.5 * height,
            depth: ndc.z,
        })
    }

    fn update_position(&mut self) {
        let yaw = self.x_rotation.to_radians();
        let pitch = self.y_rotation.to_radians();
        let direction = Vector3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        );
        self.position = self.target + direction * self.distance();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::origin(), 4.5)
    }
}

/// Converts OpenGL clip space depth (`[-1, 1]`) to the `[0, 1]` range wgpu uses
#[rustfmt::skip]
fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}
