//! Options offered to the file selector after a search

use plygrid_io::{Discovery, DiscoveryError};
use serde::Serialize;

/// One selectable file: shown by relative path, selected by absolute path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// Selector contents plus the status line explaining them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SelectionOptions {
    pub options: Vec<DropdownOption>,
    pub status: String,
}

impl SelectionOptions {
    pub fn from_discovery(result: &Result<Discovery, DiscoveryError>) -> Self {
        match result {
            Ok(discovery) => Self {
                options: discovery
                    .files
                    .iter()
                    .map(|file| DropdownOption {
                        label: file.label(),
                        value: file.absolute_path.to_string_lossy().into_owned(),
                    })
                    .collect(),
                status: discovery.status(),
            },
            Err(err) => Self {
                options: Vec::new(),
                status: err.to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
