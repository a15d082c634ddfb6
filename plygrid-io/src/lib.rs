//! I/O operations for plygrid
//!
//! This crate reads point clouds (positions plus per-point colours) from PLY
//! files and discovers eligible files under a directory tree.

pub mod ply;
pub mod discovery;
pub mod error;

pub use discovery::*;
pub use error::*;
pub use ply::PlyLoader;

use plygrid_core::{PointCloudData, Result};
use std::path::Path;

/// Trait for loading points and colours from a file
pub trait PointCloudLoader: Send + Sync {
    /// Read the cloud stored at `path`.
    ///
    /// Colours are returned exactly as found; callers enforce the
    /// colour-count invariant.
    fn load(&self, path: &Path) -> Result<PointCloudData>;

    /// Get the format name this loader handles
    fn format_name(&self) -> &'static str;
}

/// Auto-detect format and read a point cloud with its colours
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloudData> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("ply") => PlyLoader.load(path),
        _ => Err(plygrid_core::Error::UnsupportedFormat(format!(
            "Unsupported point cloud format: {:?}",
            path.extension()
        ))),
    }
}
