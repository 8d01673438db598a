//! Loading of scatter coordinate files
//! 
//! This crate turns line oriented `x,y,z` text into point clouds. Loading is
//! forgiving: unusable lines are skipped, missing files produce an empty cloud,
//! and every problem is logged and collected in a [`LoadReport`].

pub mod scatter_txt;
pub mod error;

pub use error::*;
pub use scatter_txt::{LoadReport, ScatterTextReader};

use scattercrate_core::{PointCloud, Point3f};

/// Read a coordinate file, keeping only the points
pub fn load_point_cloud<P: AsRef<std::path::Path>>(path: P) -> PointCloud<Point3f> {
    ScatterTextReader::read_path(path).into_cloud()
}

/// Parse coordinate text, keeping only the points
pub fn parse_point_cloud(text: &str) -> PointCloud<Point3f> {
    ScatterTextReader::parse_str(text).into_cloud()
}
