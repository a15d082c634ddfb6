//! Error types for discovery

use thiserror::Error;

/// Reasons a discovery request produced no selectable files.
///
/// The `Display` text doubles as the status line shown next to the file
/// selector, so each variant carries what the user needs to correct the query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("Enter a root directory.")]
    EmptyRoot,

    #[error("Invalid path: {root}")]
    InvalidRoot { root: String },

    #[error("No .{extension} files found under {root}")]
    NoFilesFound { root: String, extension: String },

    #[error("No files match '{keyword}' under {root}")]
    NoKeywordMatch { root: String, keyword: String },
}

impl DiscoveryError {
    /// Whether the root itself was rejected, as opposed to a valid root
    /// yielding nothing
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, DiscoveryError::EmptyRoot | DiscoveryError::InvalidRoot { .. })
    }
}
