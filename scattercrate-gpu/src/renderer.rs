use crate::device::GpuContext;
use crate::marker::{unit_cube, CubeVertex, MarkerInstance};
use scattercrate_core::{Error, Result};
use nalgebra::{Matrix4, Vector3};
use bytemuck::{Pod, Zeroable};
use std::sync::Arc;
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Camera uniform data
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Matrix4<f32>, light_dir: Vector3<f32>) -> Self {
        Self {
            view_proj: view_proj.into(),
            light_dir: [light_dir.x, light_dir.y, light_dir.z, 0.0],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background_color: [f64; 4],
    pub enable_depth_test: bool,
    pub present_mode: wgpu::PresentMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [0.95, 0.95, 0.95, 1.0],
            enable_depth_test: true,
            present_mode: wgpu::PresentMode::AutoVsync,
        }
    }
}

/// A surface texture being recorded into
///
/// The fields are public so overlays (such as the UI) can record their own
/// passes into the same encoder after the scene has been drawn.
pub struct FrameTarget {
    pub output: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Instanced scatter plot renderer
///
/// Every marker, shadow and the floor is an instance of one unit cube. Markers
/// are drawn opaque with depth writes; shadows are blended on top without
/// writing depth.
pub struct ScatterRenderer {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: RenderConfig,
    marker_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    cube_buffer: wgpu::Buffer,
    cube_vertex_count: u32,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
}

impl ScatterRenderer {
    /// Create a renderer presenting to `window`
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self> {
        let size = window.inner_size();
        let (gpu_context, surface) = GpuContext::for_window(window).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps.formats.iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::RenderContextUnavailable("Surface reports no formats".to_string()))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: config.present_mode,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let camera_uniform = CameraUniform::new(Matrix4::identity(), Vector3::y());

        let camera_buffer = gpu_context.create_buffer_init(
            "Camera Buffer",
            &[camera_uniform],
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );

        let camera_bind_group_layout = gpu_context.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let camera_bind_group = gpu_context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let shader = gpu_context.create_shader_module("Scatter Shader", include_str!("shaders/scatter.wgsl"));

        let pipeline_layout = gpu_context.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scatter Render Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let marker_pipeline = create_pipeline(
            &gpu_context.device,
            &pipeline_layout,
            &shader,
            surface_config.format,
            &config,
            PipelineKind::Markers,
        );
        let shadow_pipeline = create_pipeline(
            &gpu_context.device,
            &pipeline_layout,
            &shader,
            surface_config.format,
            &config,
            PipelineKind::Shadows,
        );

        let cube = unit_cube();
        let cube_buffer = gpu_context.create_buffer_init("Marker Cube Buffer", &cube, wgpu::BufferUsages::VERTEX);
        let depth_view = create_depth_view(&gpu_context.device, &surface_config);

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            config,
            marker_pipeline,
            shadow_pipeline,
            cube_buffer,
            cube_vertex_count: cube.len() as u32,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            depth_view,
        })
    }

    /// Update the combined view-projection matrix and light direction
    pub fn update_camera(&mut self, view_proj: Matrix4<f32>, light_dir: Vector3<f32>) {
        self.camera_uniform = CameraUniform::new(view_proj, light_dir);

        self.gpu_context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }

    /// Resize renderer surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu_context.device, &self.surface_config);
            self.depth_view = create_depth_view(&self.gpu_context.device, &self.surface_config);
        }
    }

    /// Acquire the next surface texture
    ///
    /// Returns `Ok(None)` when the frame should be skipped, for instance right
    /// after the surface was lost and reconfigured.
    pub fn begin_frame(&self) -> Result<Option<FrameTarget>> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.gpu_context.device, &self.surface_config);
                return Ok(None);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("Timed out waiting for surface texture");
                return Ok(None);
            }
            Err(e) => return Err(Error::Gpu(format!("Failed to get surface texture: {:?}", e))),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self.gpu_context.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Scatter Render Encoder"),
        });

        Ok(Some(FrameTarget { output, view, encoder }))
    }

    /// Clear the frame and draw markers followed by their shadows
    pub fn draw_scene(&self, frame: &mut FrameTarget, markers: &[MarkerInstance], shadows: &[MarkerInstance]) {
        let marker_buffer = (!markers.is_empty())
            .then(|| self.gpu_context.create_buffer_init("Marker Instance Buffer", markers, wgpu::BufferUsages::VERTEX));
        let shadow_buffer = (!shadows.is_empty())
            .then(|| self.gpu_context.create_buffer_init("Shadow Instance Buffer", shadows, wgpu::BufferUsages::VERTEX));

        let [r, g, b, a] = self.config.background_color;
        let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scatter Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: self.config.enable_depth_test.then(|| wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.cube_buffer.slice(..));

        if let Some(buffer) = &marker_buffer {
            render_pass.set_pipeline(&self.marker_pipeline);
            render_pass.set_vertex_buffer(1, buffer.slice(..));
            render_pass.draw(0..self.cube_vertex_count, 0..markers.len() as u32);
        }
        if let Some(buffer) = &shadow_buffer {
            render_pass.set_pipeline(&self.shadow_pipeline);
            render_pass.set_vertex_buffer(1, buffer.slice(..));
            render_pass.draw(0..self.cube_vertex_count, 0..shadows.len() as u32);
        }
    }

    /// Submit the recorded work, preceded by `extra` command buffers, and present
    pub fn finish_frame(&self, frame: FrameTarget, extra: Vec<wgpu::CommandBuffer>) {
        let FrameTarget { output, encoder, .. } = frame;
        self.gpu_context.queue.submit(extra.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.gpu_context.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.gpu_context.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PipelineKind {
    Markers,
    Shadows,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    config: &RenderConfig,
    kind: PipelineKind,
) -> wgpu::RenderPipeline {
    let (label, blend, depth_write_enabled) = match kind {
        PipelineKind::Markers => ("Marker Render Pipeline", wgpu::BlendState::REPLACE, true),
        PipelineKind::Shadows => ("Shadow Render Pipeline", wgpu::BlendState::ALPHA_BLENDING, false),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[CubeVertex::desc(), MarkerInstance::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: config.enable_depth_test.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

fn create_depth_view(device: &wgpu::Device, surface_config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: surface_config.width,
            height: surface_config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_uniform_is_column_major() {
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = 2.5;
        let uniform = CameraUniform::new(matrix, Vector3::new(0.0, 1.0, 0.0));
        // Translation lives in the last column
        assert_relative_eq!(uniform.view_proj[3][0], 2.5);
        assert_relative_eq!(uniform.view_proj[0][3], 0.0);
        assert_eq!(uniform.light_dir, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn test_default_config_uses_depth() {
        let config = RenderConfig::default();
        assert!(config.enable_depth_test);
        assert_eq!(config.present_mode, wgpu::PresentMode::AutoVsync);
    }
}
