//! Recursive discovery of point cloud files under a root directory

use crate::error::DiscoveryError;
use log::{debug, info, warn};
use plygrid_core::PointCloudFile;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling the directory scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// File name suffix (without the dot) marking a point cloud file
    pub extension: String,
    /// Descend into symlinked directories. Symlink loops are detected and skipped.
    pub follow_links: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extension: "ply".to_string(),
            follow_links: true,
        }
    }
}

/// A successful discovery: the eligible files in traversal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub root: PathBuf,
    pub keyword: Option<String>,
    pub files: Vec<PointCloudFile>,
}

impl Discovery {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Human readable summary of the result
    pub fn status(&self) -> String {
        format!("{} point cloud file(s) found", self.files.len())
    }
}

/// Discover `.ply` files under `root`, optionally filtered by `keyword`
pub fn discover(root: &str, keyword: Option<&str>) -> Result<Discovery, DiscoveryError> {
    discover_with(root, keyword, &DiscoveryOptions::default())
}

/// Discover point cloud files under `root` using explicit options.
///
/// A non-empty `keyword` keeps files whose path relative to `root` contains
/// it, compared case-insensitively. An emptied result is reported as
/// [`DiscoveryError::NoKeywordMatch`], distinct from
/// [`DiscoveryError::NoFilesFound`].
pub fn discover_with(
    root: &str,
    keyword: Option<&str>,
    options: &DiscoveryOptions,
) -> Result<Discovery, DiscoveryError> {
    if root.is_empty() {
        return Err(DiscoveryError::EmptyRoot);
    }

    let invalid_root = || DiscoveryError::InvalidRoot { root: root.to_string() };
    let root_path = Path::new(root);
    if !root_path.exists() {
        return Err(invalid_root());
    }
    let canonical_root = root_path.canonicalize().map_err(|_| invalid_root())?;

    let files: Vec<PointCloudFile> = scan(&canonical_root, options)
        .into_iter()
        .map(|path| PointCloudFile::under_root(&canonical_root, path))
        .collect();

    if files.is_empty() {
        return Err(DiscoveryError::NoFilesFound {
            root: root.to_string(),
            extension: options.extension.clone(),
        });
    }
    debug!("Scanned {} and found {} candidate files", root, files.len());

    let keyword = keyword.filter(|k| !k.is_empty());
    let files = match keyword {
        Some(keyword) => {
            let filtered = filter_by_keyword(files, keyword);
            if filtered.is_empty() {
                return Err(DiscoveryError::NoKeywordMatch {
                    root: root.to_string(),
                    keyword: keyword.to_string(),
                });
            }
            filtered
        }
        None => files,
    };

    info!("Discovered {} point cloud files under {}", files.len(), root);
    Ok(Discovery {
        root: canonical_root,
        keyword: keyword.map(str::to_string),
        files,
    })
}

/// Keep files whose relative path contains `keyword`, ignoring case
pub fn filter_by_keyword(files: Vec<PointCloudFile>, keyword: &str) -> Vec<PointCloudFile> {
    let needle = keyword.to_lowercase();
    files
        .into_iter()
        .filter(|file| file.label().to_lowercase().contains(&needle))
        .collect()
}

/// Whether a file name carries the point cloud extension
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Walk `root` in file-name order and collect matching files.
///
/// A root that is not a directory yields nothing. Symlinks count as files
/// unless they resolve to a directory; a dangling link is kept so that it
/// shows up as an unreadable panel instead of vanishing. Unreadable entries
/// and symlink loops are logged and skipped so traversal always terminates.
fn scan(root: &Path, options: &DiscoveryOptions) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name();

    let mut matches = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    warn!("Skipping symlink loop back to {}", ancestor.display());
                } else if let Some(link) = err.path().filter(|p| is_dangling_match(p, options)) {
                    debug!("Keeping dangling link {}", link.display());
                    matches.push(link.to_path_buf());
                } else {
                    warn!("Skipping unreadable entry: {}", err);
                }
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }
        if name_matches(entry.path(), options) {
            matches.push(entry.into_path());
        }
    }
    matches
}

fn name_matches(path: &Path, options: &DiscoveryOptions) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| has_extension(name, &options.extension))
}

/// A matching name whose symlink target cannot be resolved
fn is_dangling_match(path: &Path, options: &DiscoveryOptions) -> bool {
    name_matches(path, options)
        && !path.exists()
        && fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}
