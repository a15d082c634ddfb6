//! Per-session state and event handling
//!
//! A [`Session`] is created when a user opens the viewer and dropped when they
//! leave. Each [`Event`] is handled to completion before the next one; every
//! render-triggering event rebuilds the whole grid from the files on disk.

use crate::camera_sync::{apply_cameras, sync, CameraReports, PanelId};
use crate::config::ViewerConfig;
use crate::figure::{panel_payloads, GridPayload, PanelPayload};
use crate::grid::{compose, GridView};
use crate::scene::SceneBuilder;
use crate::selection::SelectionOptions;
use log::{debug, info, warn};
use plygrid_io::{discover_with, DiscoveryOptions, PlyLoader, PointCloudLoader};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// User actions the viewer reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Scan `root` for point clouds, filtered by `keyword`
    Search { root: String, keyword: String },
    /// The ordered list of selected files changed
    SelectionChanged(Vec<PathBuf>),
    MarkerSizeChanged(f32),
    /// Re-render every panel with its default camera
    ResetView,
    /// Copy the reference panel's camera to every panel
    SyncCameras,
    /// A panel's widget reported a relayout (camera drag, zoom, ...)
    CameraReported { panel: PanelId, relayout: Value },
}

/// What the host should redraw after an event
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// New selector contents and status line
    Options(SelectionOptions),
    /// The grid container was rebuilt
    Grid(GridPayload),
    /// Every panel's figure was replaced in place
    Figures(Vec<PanelPayload>),
    NoUpdate,
}

/// State owned by one viewer session
#[derive(Debug)]
pub struct Session<L = PlyLoader> {
    config: ViewerConfig,
    discovery_options: DiscoveryOptions,
    builder: SceneBuilder<L>,
    root: String,
    keyword: String,
    options: SelectionOptions,
    selection: Vec<PathBuf>,
    marker_size: f32,
    grid: GridView,
    cameras: CameraReports,
    generation: u64,
}

impl Session<PlyLoader> {
    /// Session reading PLY files
    pub fn new(config: ViewerConfig) -> Self {
        Self::with_loader(config, PlyLoader)
    }
}

impl<L: PointCloudLoader> Session<L> {
    pub fn with_loader(config: ViewerConfig, loader: L) -> Self {
        let discovery_options = DiscoveryOptions {
            extension: config.extension.clone(),
            ..DiscoveryOptions::default()
        };
        let marker_size = config.normalize_marker_size(config.default_marker_size);
        Self {
            config,
            discovery_options,
            builder: SceneBuilder::new(loader),
            root: String::new(),
            keyword: String::new(),
            options: SelectionOptions::default(),
            selection: Vec::new(),
            marker_size,
            grid: GridView::NotLoaded,
            cameras: CameraReports::default(),
            generation: 0,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    pub fn selection(&self) -> &[PathBuf] {
        &self.selection
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn cameras(&self) -> &CameraReports {
        &self.cameras
    }

    /// Number of grid renders so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle one event to completion
    pub fn handle(&mut self, event: Event) -> SessionUpdate {
        match event {
            Event::Search { root, keyword } => self.search(root, keyword),
            Event::SelectionChanged(paths) => {
                self.selection = paths;
                self.render()
            }
            Event::MarkerSizeChanged(size) => {
                self.marker_size = self.config.normalize_marker_size(size);
                self.render()
            }
            Event::ResetView => self.render(),
            Event::SyncCameras => self.sync_cameras(),
            Event::CameraReported { panel, relayout } => {
                self.cameras.record(panel, &relayout);
                SessionUpdate::NoUpdate
            }
        }
    }

    fn search(&mut self, root: String, keyword: String) -> SessionUpdate {
        let result = discover_with(&root, Some(&keyword), &self.discovery_options);
        match &result {
            Err(err) if err.is_invalid_root() => warn!("Rejected search root: {}", err),
            Err(err) => info!("Search yielded no files: {}", err),
            Ok(_) => {}
        }
        self.options = SelectionOptions::from_discovery(&result);

        let title_root = (!root.is_empty() && Path::new(&root).exists()).then(|| PathBuf::from(&root));
        self.builder.set_root(title_root);
        self.root = root;
        self.keyword = keyword;

        SessionUpdate::Options(self.options.clone())
    }

    /// Rebuild the grid for the current selection; panels start with their
    /// default camera, so earlier camera reports are dropped
    fn render(&mut self) -> SessionUpdate {
        self.generation += 1;
        let panels = self.builder.build_panels(self.selection.as_slice(), self.marker_size);
        debug!(
            "Render {}: {} panels at marker size {}",
            self.generation,
            panels.len(),
            self.marker_size
        );
        self.cameras.reset(panels.len());
        self.grid = compose(panels, self.config.columns);
        SessionUpdate::Grid(GridPayload::from_view(&self.grid, &self.config))
    }

    fn sync_cameras(&mut self) -> SessionUpdate {
        if self.selection.is_empty() {
            return SessionUpdate::NoUpdate;
        }

        let reference = self.cameras.reference().cloned();
        let mut panels = self.builder.build_panels(self.selection.as_slice(), self.marker_size);
        let cameras = sync(reference.as_ref(), panels.len());
        apply_cameras(&mut panels, &cameras);
        debug!(
            "Synced {} panels to {}",
            panels.len(),
            if reference.is_some() { "the reference camera" } else { "their own cameras" }
        );

        let payloads = panel_payloads(&panels, &self.config);
        self.generation += 1;
        self.grid = compose(panels, self.config.columns);
        SessionUpdate::Figures(payloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plygrid_core::{PointCloudData, Point3f, Result, Rgb};

    struct CountingLoader;

    impl PointCloudLoader for CountingLoader {
        fn load(&self, path: &Path) -> Result<PointCloudData> {
            let n = path.file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse().ok()).unwrap_or(1);
            Ok(PointCloudData::from_parts(vec![Point3f::origin(); n], vec![Rgb::GRAY; n]))
        }

        fn format_name(&self) -> &'static str {
            "counting"
        }
    }

    fn session() -> Session<CountingLoader> {
        Session::with_loader(ViewerConfig::default(), CountingLoader)
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        assert_eq!(session.grid(), &GridView::NotLoaded);
        assert_eq!(session.marker_size(), 1.0);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn test_marker_size_event_rerenders_all_panels() {
        let mut session = session();
        session.handle(Event::SelectionChanged(vec![PathBuf::from("3.ply"), PathBuf::from("5.ply")]));
        session.handle(Event::MarkerSizeChanged(3.2));

        assert_eq!(session.marker_size(), 3.0);
        assert_eq!(session.generation(), 2);
        let layout = session.grid().layout().unwrap();
        assert!(layout.panels().iter().all(|p| p.scene().unwrap().marker_size == 3.0));
        assert_eq!(layout.panels()[1].scene().unwrap().point_count(), 5);
    }

    #[test]
    fn test_sync_without_selection_is_no_update() {
        let mut session = session();
        assert_eq!(session.handle(Event::SyncCameras), SessionUpdate::NoUpdate);
        assert_eq!(session.generation(), 0);
    }
}
