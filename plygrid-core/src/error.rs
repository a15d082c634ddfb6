//! Error types for plygrid

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plygrid operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unreadable point cloud {}: {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an error raised while reading `path`
    pub fn unreadable(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::UnreadableFile {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for plygrid operations
pub type Result<T> = std::result::Result<T, Error>;
