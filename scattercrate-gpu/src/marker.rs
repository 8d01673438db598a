//! Marker geometry and per-instance data

use bytemuck::{Pod, Zeroable};
use scattercrate_core::Point3f;

/// Vertex of the unit cube every marker is drawn from
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl CubeVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// One drawn box: a data point, its shadow, or the floor
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    pub offset: [f32; 3],
    pub scale: [f32; 3],
    pub color: [f32; 4],
    /// 1.0 for lit surfaces, 0.0 for flat colored ones such as shadows
    pub lit: f32,
}

impl MarkerInstance {
    /// A lit cube of edge `size` centered on `center`
    pub fn cube(center: &Point3f, size: f32, color: [f32; 4]) -> Self {
        Self {
            offset: [center.x, center.y, center.z],
            scale: [size, size, size],
            color,
            lit: 1.0,
        }
    }

    /// An unlit, nearly flat square lying on a horizontal plane
    pub fn flat(center: &Point3f, size: f32, color: [f32; 4]) -> Self {
        Self {
            offset: [center.x, center.y, center.z],
            scale: [size, 0.0005, size],
            color,
            lit: 0.0,
        }
    }

    /// Instance buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
            2 => Float32x3,
            3 => Float32x3,
            4 => Float32x4,
            5 => Float32
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// The 36 vertices of a unit cube centered on the origin, outward normals
pub fn unit_cube() -> Vec<CubeVertex> {
    // (normal, two tangent axes spanning the face)
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let corner = |su: f32, sv: f32| CubeVertex {
            position: [
                0.5 * (normal[0] + su * u[0] + sv * v[0]),
                0.5 * (normal[1] + su * u[1] + sv * v[1]),
                0.5 * (normal[2] + su * u[2] + sv * v[2]),
            ],
            normal,
        };
        // Two counter-clockwise triangles seen from outside
        let quad = [
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ];
        vertices.extend_from_slice(&quad);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_unit_cube_shape() {
        let cube = unit_cube();
        assert_eq!(cube.len(), 36);
        for vertex in &cube {
            for c in vertex.position {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_unit_cube_winding_faces_outward() {
        for triangle in unit_cube().chunks(3) {
            let a = Vector3::from(triangle[0].position);
            let b = Vector3::from(triangle[1].position);
            let c = Vector3::from(triangle[2].position);
            let face_normal = (b - a).cross(&(c - a));
            let normal = Vector3::from(triangle[0].normal);
            assert!(face_normal.dot(&normal) > 0.0);
        }
    }

    #[test]
    fn test_instance_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<MarkerInstance>(), 44);
        assert_eq!(MarkerInstance::desc().array_stride, 44);
        assert_eq!(CubeVertex::desc().array_stride, 24);
    }

    #[test]
    fn test_flat_marker_is_unlit() {
        let shadow = MarkerInstance::flat(&Point3f::new(0.0, -1.0, 0.0), 0.1, [0.0, 0.0, 0.0, 0.3]);
        assert_eq!(shadow.lit, 0.0);
        assert!(shadow.scale[1] < shadow.scale[0]);
        let marker = MarkerInstance::cube(&Point3f::new(1.0, 2.0, 3.0), 0.1, [1.0; 4]);
        assert_eq!(marker.offset, [1.0, 2.0, 3.0]);
        assert_eq!(marker.lit, 1.0);
    }
}
