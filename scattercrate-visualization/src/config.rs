//! Viewer configuration

use std::time::Duration;
use nalgebra::Vector3;
use scattercrate_core::Point3f;
use scattercrate_gpu::{RenderConfig, ShadowQuality};

/// Visible data range along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Map `value` from the data range onto `[-1, 1]`
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON {
            return 0.0;
        }
        (value - self.min) / span * 2.0 - 1.0
    }
}

/// Data ranges of the three axes
///
/// Each range is stretched over the scene box, which spans `[-1, 1]` on every
/// axis. Points outside a range are neither drawn nor selectable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRanges {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl AxisRanges {
    /// Position of a data point inside the scene box, if it is in range
    pub fn to_scene(&self, point: &Point3f) -> Option<Point3f> {
        if !(self.x.contains(point.x) && self.y.contains(point.y) && self.z.contains(point.z)) {
            return None;
        }
        Some(Point3f::new(
            self.x.normalize(point.x),
            self.y.normalize(point.y),
            self.z.normalize(point.z),
        ))
    }
}

impl Default for AxisRanges {
    fn default() -> Self {
        Self {
            x: AxisRange::new(-10.0, 10.0),
            y: AxisRange::new(-5.0, 5.0),
            z: AxisRange::new(-5.0, 5.0),
        }
    }
}

/// Colors used by the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: [f64; 4],
    pub item: [f32; 4],
    pub highlight: [f32; 4],
    pub floor: [f32; 4],
    pub shadow: [f32; 3],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: [0.93, 0.93, 0.94, 1.0],
            item: [0.0, 0.45, 0.75, 1.0],
            highlight: [0.95, 0.62, 0.05, 1.0],
            floor: [0.82, 0.83, 0.85, 1.0],
            shadow: [0.05, 0.05, 0.08],
        }
    }
}

/// Everything the viewer can be tuned with
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub axis_ranges: AxisRanges,
    pub theme: Theme,
    /// Edge length of one marker cube, in scene units
    pub marker_size: f32,
    pub shadow_quality: ShadowQuality,
    /// Start with the orbit animation paused
    pub start_paused: bool,
    /// Period of the selection poll
    pub selection_interval: Duration,
    /// Maximum screen distance, in physical pixels, for a point to be picked
    pub pick_radius: f32,
    /// Duration of one full horizontal orbit
    pub orbit_duration: Duration,
    /// Duration of each half (rise or fall) of the vertical bob
    pub bob_phase_duration: Duration,
    /// Camera distance from the scene center at zoom level 100
    pub base_camera_distance: f32,
    /// Direction towards the light
    pub light_direction: Vector3<f32>,
}

impl ViewerConfig {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            background_color: self.theme.background,
            ..RenderConfig::default()
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Scatter Data Viewer".to_string(),
            axis_ranges: AxisRanges::default(),
            theme: Theme::default(),
            marker_size: 0.045,
            shadow_quality: ShadowQuality::Medium,
            start_paused: false,
            selection_interval: Duration::from_millis(10),
            pick_radius: 8.0,
            orbit_duration: Duration::from_millis(20_000),
            bob_phase_duration: Duration::from_millis(9_000),
            base_camera_distance: 4.5,
            light_direction: Vector3::new(0.35, 1.0, 0.45),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_maps_range_onto_unit_box() {
        let range = AxisRange::new(-10.0, 10.0);
        assert_relative_eq!(range.normalize(-10.0), -1.0);
        assert_relative_eq!(range.normalize(0.0), 0.0);
        assert_relative_eq!(range.normalize(5.0), 0.5);
        assert_relative_eq!(range.normalize(10.0), 1.0);
    }

    #[test]
    fn test_degenerate_range_maps_to_center() {
        assert_eq!(AxisRange::new(3.0, 3.0).normalize(3.0), 0.0);
    }

    #[test]
    fn test_out_of_range_points_are_hidden() {
        let ranges = AxisRanges::default();
        assert!(ranges.to_scene(&Point3f::new(0.0, 5.5, 0.0)).is_none());
        assert!(ranges.to_scene(&Point3f::new(-10.5, 0.0, 0.0)).is_none());

        let inside = ranges.to_scene(&Point3f::new(5.0, -2.5, 5.0)).unwrap();
        assert_relative_eq!(inside.x, 0.5);
        assert_relative_eq!(inside.y, -0.5);
        assert_relative_eq!(inside.z, 1.0);
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.shadow_quality, ShadowQuality::Medium);
        assert_eq!(config.selection_interval, Duration::from_millis(10));
        assert_eq!(config.orbit_duration, Duration::from_secs(20));
        assert_eq!(config.bob_phase_duration, Duration::from_secs(9));
        assert_eq!(config.render_config().background_color, config.theme.background);
    }
}
