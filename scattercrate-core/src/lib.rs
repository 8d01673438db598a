//! Core data structures for scattercrate
//! 
//! This crate provides the fundamental types shared by the loader, the scene
//! and the renderer: points, point clouds, the replaceable point cloud store
//! and the common error type.

pub mod point;
pub mod point_cloud;
pub mod store;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use store::*;
pub use error::*;
