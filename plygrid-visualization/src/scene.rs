//! Building renderable scenes from point cloud files

use crate::grid::PanelContent;
use log::{debug, warn};
use plygrid_core::{CameraOrientation, Error, PointCloudData, Result};
use plygrid_io::{PlyLoader, PointCloudLoader};
use std::path::{Path, PathBuf};

/// One renderable 3D scene: a titled point cloud drawn with a single marker size
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescriptor {
    pub title: String,
    pub geometry: PointCloudData,
    pub marker_size: f32,
    pub camera: Option<CameraOrientation>,
}

impl SceneDescriptor {
    pub fn point_count(&self) -> usize {
        self.geometry.len()
    }
}

/// Panel title for `path`: its path relative to `root` when `root` is an
/// existing directory containing it, otherwise its file name.
pub fn title_for(path: &Path, root: Option<&Path>) -> String {
    if let Some(root) = root.filter(|r| !r.as_os_str().is_empty() && r.exists()) {
        if let Ok(relative) = path.strip_prefix(root) {
            return relative.to_string_lossy().into_owned();
        }
        if let Ok(canonical) = root.canonicalize() {
            if let Ok(relative) = path.strip_prefix(&canonical) {
                return relative.to_string_lossy().into_owned();
            }
        }
    }
    basename(path)
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Loads files through a [`PointCloudLoader`] and turns them into scenes.
///
/// Nothing is cached; every call reads the file again.
#[derive(Debug, Clone)]
pub struct SceneBuilder<L = PlyLoader> {
    loader: L,
    root: Option<PathBuf>,
}

impl SceneBuilder<PlyLoader> {
    /// Builder reading PLY files
    pub fn ply() -> Self {
        Self::new(PlyLoader)
    }
}

impl<L: PointCloudLoader> SceneBuilder<L> {
    pub fn new(loader: L) -> Self {
        Self { loader, root: None }
    }

    /// Set the root that panel titles are made relative to
    pub fn set_root(&mut self, root: Option<PathBuf>) {
        self.root = root;
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn title(&self, path: &Path) -> String {
        title_for(path, self.root())
    }

    /// Load `path` and build its scene.
    ///
    /// A colour count that differs from the point count is replaced by
    /// uniform gray. Only an unreadable or corrupt file is an error.
    pub fn build(&self, path: &Path, marker_size: f32) -> Result<SceneDescriptor> {
        let mut geometry = self
            .loader
            .load(path)
            .map_err(|e| Error::unreadable(path, e))?;

        debug!(
            "Loaded {} points from {} as {}",
            geometry.len(),
            path.display(),
            self.loader.format_name()
        );
        if geometry.enforce_color_count() {
            debug!(
                "{}: colour count did not match {} points, using gray",
                path.display(),
                geometry.len()
            );
        }

        Ok(SceneDescriptor {
            title: self.title(path),
            geometry,
            marker_size,
            camera: None,
        })
    }

    /// Build one panel per path in order. A file that fails to load becomes
    /// an error panel and does not affect its siblings.
    pub fn build_panels<P: AsRef<Path>>(&self, paths: &[P], marker_size: f32) -> Vec<PanelContent> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                match self.build(path, marker_size) {
                    Ok(scene) => PanelContent::Scene(scene),
                    Err(err) => {
                        warn!("Failed to build scene: {}", err);
                        PanelContent::Unreadable {
                            title: self.title(path),
                            path: path.to_path_buf(),
                            message: err.to_string(),
                        }
                    }
                }
            })
            .collect()
    }
}
