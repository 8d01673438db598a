//! Ownership of the currently displayed point cloud

use crate::point::Point3f;
use crate::point_cloud::PointCloud;

/// Holds the point cloud the renderer displays
///
/// The cloud is never edited in place. Loading new data swaps the whole cloud
/// and bumps the generation counter, which lets consumers such as the renderer
/// notice that derived data has to be rebuilt.
#[derive(Debug, Clone, Default)]
pub struct PointCloudStore {
    cloud: PointCloud<Point3f>,
    generation: u64,
}

impl PointCloudStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored cloud, returning the previous one
    pub fn replace(&mut self, cloud: PointCloud<Point3f>) -> PointCloud<Point3f> {
        self.generation += 1;
        log::debug!(
            "Point cloud replaced with {} points (generation {})",
            cloud.len(),
            self.generation
        );
        std::mem::replace(&mut self.cloud, cloud)
    }

    /// The current cloud
    pub fn cloud(&self) -> &PointCloud<Point3f> {
        &self.cloud
    }

    /// Number of replacements performed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.cloud.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloud.is_empty()
    }
}
