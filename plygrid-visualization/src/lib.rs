//! Visualization core for plygrid
//!
//! This crate turns selected point cloud files into a grid of renderable 3D
//! scenes and keeps their cameras in step:
//! - Scene building with colour fallback
//! - Row-major grid composition
//! - Positional camera broadcast
//! - Session state driven by UI events

pub mod config;
pub mod scene;
pub mod figure;
pub mod grid;
pub mod camera_sync;
pub mod selection;
pub mod session;

pub use config::*;
pub use scene::*;
pub use figure::*;
pub use grid::*;
pub use camera_sync::*;
pub use selection::*;
pub use session::*;
