//! # Scattercrate GPU
//!
//! wgpu renderer for scatter plots.
//!
//! Data points are drawn as instanced, lit cubes standing in a unit scene
//! box, with floor shadows whose fidelity follows a [`ShadowQuality`] level.
//! The renderer only draws what it is handed each frame; deciding which
//! instances exist is the job of the scene that owns the data.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scattercrate_gpu::{ScatterRenderer, RenderConfig};
//!
//! fn example(window: Arc<winit::window::Window>) -> scattercrate_core::Result<()> {
//!     let renderer = pollster::block_on(ScatterRenderer::new(window, RenderConfig::default()))?;
//!     if let Some(mut frame) = renderer.begin_frame()? {
//!         renderer.draw_scene(&mut frame, &[], &[]);
//!         renderer.finish_frame(frame, Vec::new());
//!     }
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod marker;
pub mod renderer;
pub mod shadow;

// Re-export commonly used items
pub use device::GpuContext;
pub use marker::{CubeVertex, MarkerInstance, unit_cube};
pub use renderer::{ScatterRenderer, RenderConfig, FrameTarget, CameraUniform};
pub use shadow::{ShadowQuality, ShadowParams};
