//! Row-major arrangement of panels into a grid

use crate::scene::SceneDescriptor;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Placeholder shown before any selection event has been handled
pub const NOT_LOADED_MESSAGE: &str = "No data loaded yet.";

/// Placeholder shown when the selection is empty
pub const NOTHING_SELECTED_MESSAGE: &str = "Select point cloud files.";

/// Contents of one grid cell
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Scene(SceneDescriptor),
    /// The file could not be read; the panel shows the error instead
    Unreadable {
        title: String,
        path: PathBuf,
        message: String,
    },
}

impl PanelContent {
    pub fn title(&self) -> &str {
        match self {
            PanelContent::Scene(scene) => &scene.title,
            PanelContent::Unreadable { title, .. } => title,
        }
    }

    pub fn scene(&self) -> Option<&SceneDescriptor> {
        match self {
            PanelContent::Scene(scene) => Some(scene),
            PanelContent::Unreadable { .. } => None,
        }
    }

    pub fn scene_mut(&mut self) -> Option<&mut SceneDescriptor> {
        match self {
            PanelContent::Scene(scene) => Some(scene),
            PanelContent::Unreadable { .. } => None,
        }
    }
}

/// Panels laid out row by row, `columns` per row
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    panels: Vec<PanelContent>,
    columns: NonZeroUsize,
}

impl GridLayout {
    pub fn panels(&self) -> &[PanelContent] {
        &self.panels
    }

    pub fn columns(&self) -> usize {
        self.columns.get()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Number of rows, the last one possibly partial
    pub fn row_count(&self) -> usize {
        self.panels.len().div_ceil(self.columns.get())
    }

    /// Iterate over rows in top-to-bottom order
    pub fn rows(&self) -> std::slice::Chunks<'_, PanelContent> {
        self.panels.chunks(self.columns.get())
    }

    /// Panel at `row`, `column`, if that cell is occupied
    pub fn cell(&self, row: usize, column: usize) -> Option<&PanelContent> {
        if column >= self.columns.get() {
            return None;
        }
        self.panels.get(row * self.columns.get() + column)
    }

    /// Row and column of the panel at `index`
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.columns.get(), index % self.columns.get())
    }

    /// CSS `grid-template-columns` value for the host page
    pub fn template_columns(&self) -> String {
        format!("repeat({}, 1fr)", self.columns.get())
    }
}

/// What the grid container shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GridView {
    /// No selection event has been handled yet
    #[default]
    NotLoaded,
    /// The selection is empty
    NothingSelected,
    Grid(GridLayout),
}

impl GridView {
    /// Placeholder text for the non-grid states
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            GridView::NotLoaded => Some(NOT_LOADED_MESSAGE),
            GridView::NothingSelected => Some(NOTHING_SELECTED_MESSAGE),
            GridView::Grid(_) => None,
        }
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        match self {
            GridView::Grid(layout) => Some(layout),
            _ => None,
        }
    }

    pub fn panel_count(&self) -> usize {
        self.layout().map_or(0, GridLayout::len)
    }
}

/// Arrange `panels` into rows of `columns` in input order.
///
/// Panel contents are not touched. An empty input yields
/// [`GridView::NothingSelected`] rather than an empty grid.
pub fn compose(panels: Vec<PanelContent>, columns: NonZeroUsize) -> GridView {
    if panels.is_empty() {
        return GridView::NothingSelected;
    }
    GridView::Grid(GridLayout { panels, columns })
}
