//! Visualization for scatter data
//!
//! This crate turns a point cloud into an interactive 3D scatter plot using
//! wgpu, winit and egui:
//! - Wheel zoom with a level-dependent sensitivity curve
//! - Looping camera orbit that can be paused and resumed
//! - Periodic pointer picking with highlighted selection
//! - Floor shadows with selectable quality

pub mod animation;
pub mod camera;
pub mod config;
pub mod controller;
pub mod input;
pub mod interactive_viewer;
pub mod overlay;
pub mod scene;
pub mod selection;

pub use animation::{AnimationState, CameraOrbitAnimator, OrbitAngles};
pub use camera::{on_wheel, Camera, ZoomLevel, WHEEL_NOTCH};
pub use config::{AxisRange, AxisRanges, Theme, ViewerConfig};
pub use controller::{InputEvent, ScatterController, ViewerCommand};
pub use interactive_viewer::InteractiveViewer;
pub use scene::{Scene, SceneInstances};
pub use selection::{PointerPosition, SelectionPoller, SelectionSink};
