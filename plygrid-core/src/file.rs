//! Discovered point cloud files

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// A point cloud file found under a search root.
///
/// Identity is the absolute path; two entries with the same absolute path are
/// equal regardless of the root they were discovered from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudFile {
    pub absolute_path: PathBuf,
    pub relative_path: PathBuf,
}

impl PointCloudFile {
    pub fn new(absolute_path: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Build an entry for `path`, deriving its relative path from `root`.
    /// Files outside `root` keep only their file name.
    pub fn under_root(root: &Path, path: impl Into<PathBuf>) -> Self {
        let absolute_path = path.into();
        let relative_path = match absolute_path.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => absolute_path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| absolute_path.clone()),
        };
        Self {
            absolute_path,
            relative_path,
        }
    }

    /// Relative path as displayed to the user
    pub fn label(&self) -> String {
        self.relative_path.to_string_lossy().into_owned()
    }
}

impl PartialEq for PointCloudFile {
    fn eq(&self, other: &Self) -> bool {
        self.absolute_path == other.absolute_path
    }
}

impl Eq for PointCloudFile {}

impl Hash for PointCloudFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute_path.hash(state);
    }
}
