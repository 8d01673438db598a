//! Point types

use nalgebra::Point3;

/// A 3D point with floating point coordinates
///
/// One accepted line of a coordinate file becomes one of these. Points are
/// plain `Copy` values and are never edited after construction.
pub type Point3f = Point3<f32>;
