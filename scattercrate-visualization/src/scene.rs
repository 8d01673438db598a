//! The render scene: data, camera, shadows and selection

use nalgebra::{Matrix4, Vector3};
use scattercrate_core::{Point3f, PointCloud, PointCloudStore};
use scattercrate_gpu::{MarkerInstance, ShadowQuality};
use crate::camera::Camera;
use crate::config::{AxisRanges, Theme, ViewerConfig};
use crate::selection::{PointerPosition, SelectionSink};

/// Height of the floor plane in scene units
pub const FLOOR_Y: f32 = -1.0;
const FLOOR_THICKNESS: f32 = 0.01;
const SHADOW_LIFT: f32 = 0.001;

/// Instances to draw for one frame
#[derive(Debug, Clone, Default)]
pub struct SceneInstances {
    /// Lit, depth-writing boxes: the floor followed by one cube per point
    pub markers: Vec<MarkerInstance>,
    /// Translucent shadow quads lying on the floor
    pub shadows: Vec<MarkerInstance>,
}

/// Owns the displayed points and everything needed to draw and pick them
#[derive(Debug, Clone)]
pub struct Scene {
    store: PointCloudStore,
    camera: Camera,
    axis_ranges: AxisRanges,
    theme: Theme,
    marker_size: f32,
    light_direction: Vector3<f32>,
    shadow_quality: ShadowQuality,
    viewport: (u32, u32),
    pick_radius: f32,
    pending_query: Option<PointerPosition>,
    selected: Option<usize>,
    // (index into the cloud, position in the scene box) of every drawn point
    visible: Vec<(usize, Point3f)>,
}

impl Scene {
    pub fn new(config: &ViewerConfig) -> Self {
        let light_direction = config
            .light_direction
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::y);
        Self {
            store: PointCloudStore::new(),
            camera: Camera::new(Point3f::origin(), config.base_camera_distance),
            axis_ranges: config.axis_ranges,
            theme: config.theme,
            marker_size: config.marker_size,
            light_direction,
            shadow_quality: config.shadow_quality,
            viewport: (1, 1),
            pick_radius: config.pick_radius,
            pending_query: None,
            selected: None,
            visible: Vec::new(),
        }
    }

    /// Replace the displayed points; clears the selection
    pub fn reset_points(&mut self, cloud: PointCloud<Point3f>) {
        self.store.replace(cloud);
        self.selected = None;
        self.rebuild_visible();
    }

    fn rebuild_visible(&mut self) {
        let ranges = self.axis_ranges;
        self.visible = self
            .store
            .cloud()
            .iter()
            .enumerate()
            .filter_map(|(index, point)| ranges.to_scene(point).map(|scene| (index, scene)))
            .collect();

        let hidden = self.store.len() - self.visible.len();
        if hidden > 0 {
            log::info!("{} points lie outside the axis ranges and are hidden", hidden);
        }
    }

    pub fn store(&self) -> &PointCloudStore {
        &self.store
    }

    /// Number of points inside the axis ranges
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn shadow_quality(&self) -> ShadowQuality {
        self.shadow_quality
    }

    pub fn set_shadow_quality(&mut self, quality: ShadowQuality) {
        if quality != self.shadow_quality {
            log::debug!("Shadow quality set to {}", quality);
        }
        self.shadow_quality = quality;
    }

    pub fn light_direction(&self) -> Vector3<f32> {
        self.light_direction
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Resize the render surface; zero sizes (minimized windows) are ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.aspect_ratio = width as f32 / height as f32;
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.camera.view_projection()
    }

    /// Query position waiting for the next [`Scene::resolve_selection`]
    pub fn pending_query(&self) -> Option<PointerPosition> {
        self.pending_query
    }

    /// Resolve the pending selection query against the current camera
    ///
    /// The point whose projection lies nearest to the query position wins, as
    /// long as it is within the pick radius. Ties go to the point closer to
    /// the camera. An invalid position clears the selection.
    pub fn resolve_selection(&mut self) {
        let Some(query) = self.pending_query.take() else {
            return;
        };
        if !query.is_valid() {
            self.selected = None;
            return;
        }

        let (width, height) = (self.viewport.0 as f32, self.viewport.1 as f32);
        let radius_sq = self.pick_radius * self.pick_radius;
        let mut best: Option<(usize, f32, f32)> = None;
        for &(index, position) in &self.visible {
            let Some(screen) = self.camera.project(&position, width, height) else {
                continue;
            };
            let dx = screen.x - query.x;
            let dy = screen.y - query.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq > radius_sq {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, best_dist, best_depth)) => {
                    dist_sq < best_dist || (dist_sq == best_dist && screen.depth < best_depth)
                }
            };
            if better {
                best = Some((index, dist_sq, screen.depth));
            }
        }

        let selected = best.map(|(index, _, _)| index);
        if selected != self.selected {
            log::trace!("Selection changed to {:?}", selected);
        }
        self.selected = selected;
    }

    /// Index into the cloud and value of the selected point
    pub fn selected(&self) -> Option<(usize, &Point3f)> {
        let index = self.selected?;
        self.store.cloud().get(index).map(|point| (index, point))
    }

    /// The selected point formatted as `x, y, z`
    pub fn selected_label(&self) -> Option<String> {
        self.selected()
            .map(|(_, p)| format!("{:.2}, {:.2}, {:.2}", p.x, p.y, p.z))
    }

    /// Build the marker and shadow instances for the current state
    pub fn build_instances(&self) -> SceneInstances {
        let mut markers = Vec::with_capacity(self.visible.len() + 1);
        markers.push(MarkerInstance {
            offset: [0.0, FLOOR_Y - FLOOR_THICKNESS * 0.5, 0.0],
            scale: [2.0 + self.marker_size, FLOOR_THICKNESS, 2.0 + self.marker_size],
            color: self.theme.floor,
            lit: 1.0,
        });
        for &(index, position) in &self.visible {
            let color = if Some(index) == self.selected {
                self.theme.highlight
            } else {
                self.theme.item
            };
            markers.push(MarkerInstance::cube(&position, self.marker_size, color));
        }

        SceneInstances {
            markers,
            shadows: self.build_shadows(),
        }
    }

    fn build_shadows(&self) -> Vec<MarkerInstance> {
        let params = self.shadow_quality.params();
        let light = self.light_direction;
        if params.samples == 0 || light.y <= f32::EPSILON {
            return Vec::new();
        }

        // Copies blend on top of each other, so each gets the alpha that
        // stacks up to the requested opacity
        let samples = params.samples as f32;
        let alpha = 1.0 - (1.0 - params.opacity).powf(1.0 / samples);
        let [r, g, b] = self.theme.shadow;
        let color = [r, g, b, alpha];
        let offsets: Vec<(f32, f32)> = if params.samples == 1 {
            vec![(0.0, 0.0)]
        } else {
            (0..params.samples)
                .map(|i| {
                    let angle = std::f32::consts::TAU * i as f32 / samples;
                    (angle.cos() * params.softness, angle.sin() * params.softness)
                })
                .collect()
        };

        let plane_y = FLOOR_Y + SHADOW_LIFT;
        let mut shadows = Vec::with_capacity(self.visible.len() * offsets.len());
        for &(_, position) in &self.visible {
            let t = (position.y - plane_y) / light.y;
            let center = position - light * t;
            if center.x.abs() > 1.0 || center.z.abs() > 1.0 {
                continue;
            }
            for &(dx, dz) in &offsets {
                let sample = Point3f::new(center.x + dx, plane_y, center.z + dz);
                shadows.push(MarkerInstance::flat(&sample, self.marker_size, color));
            }
        }
        shadows
    }
}

impl SelectionSink for Scene {
    fn set_selection_query_position(&mut self, position: PointerPosition) {
        self.pending_query = Some(position);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}
