//! Core data structures for plygrid
//!
//! This crate provides the types shared by discovery, scene building and the
//! grid viewer: discovered files, loaded point data with per-point colours,
//! and the camera orientation record broadcast between panels.

pub mod point;
pub mod point_cloud;
pub mod file;
pub mod camera;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use file::*;
pub use camera::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::Point3;
