//! Figure payloads handed to the rendering widget
//!
//! The shapes mirror a plotly `scatter3d` figure: one marker trace per panel,
//! axes hidden, data aspect ratio, fixed height and margins.

use crate::camera_sync::{panel_ids, PanelId};
use crate::config::ViewerConfig;
use crate::grid::{GridView, PanelContent};
use crate::scene::SceneDescriptor;
use plygrid_core::CameraOrientation;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: f32,
    /// One CSS colour per point
    pub color: Vec<String>,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter3dTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub mode: &'static str,
    pub marker: Marker,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axis {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLayout {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub aspectmode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraOrientation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub scene: SceneLayout,
    pub margin: Margin,
    pub height: u32,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Scatter3dTrace>,
    pub layout: FigureLayout,
}

impl Figure {
    /// Render `scene` as a single-trace figure
    pub fn from_scene(scene: &SceneDescriptor, config: &ViewerConfig) -> Self {
        let (x, y, z) = scene.geometry.coordinates();
        let trace = Scatter3dTrace {
            kind: "scatter3d",
            x,
            y,
            z,
            mode: "markers",
            marker: Marker {
                size: scene.marker_size,
                color: scene.geometry.colors.iter().map(|c| c.to_css()).collect(),
                opacity: config.marker_opacity,
            },
            name: scene.title.clone(),
        };

        let hidden = Axis { visible: false };
        Self {
            data: vec![trace],
            layout: FigureLayout {
                scene: SceneLayout {
                    xaxis: hidden,
                    yaxis: hidden,
                    zaxis: hidden,
                    aspectmode: "data",
                    camera: scene.camera.clone(),
                },
                margin: Margin { l: 0, r: 0, t: 20, b: 0 },
                height: config.panel_height,
                showlegend: false,
            },
        }
    }
}

/// One panel as sent to the host page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelPayload {
    Figure {
        id: PanelId,
        title: String,
        figure: Figure,
    },
    Error {
        id: PanelId,
        title: String,
        message: String,
    },
}

impl PanelPayload {
    pub fn from_panel(id: PanelId, panel: &PanelContent, config: &ViewerConfig) -> Self {
        match panel {
            PanelContent::Scene(scene) => PanelPayload::Figure {
                id,
                title: scene.title.clone(),
                figure: Figure::from_scene(scene, config),
            },
            PanelContent::Unreadable { title, message, .. } => PanelPayload::Error {
                id,
                title: title.clone(),
                message: message.clone(),
            },
        }
    }

    pub fn id(&self) -> PanelId {
        match self {
            PanelPayload::Figure { id, .. } | PanelPayload::Error { id, .. } => *id,
        }
    }

    pub fn figure(&self) -> Option<&Figure> {
        match self {
            PanelPayload::Figure { figure, .. } => Some(figure),
            PanelPayload::Error { .. } => None,
        }
    }
}

/// Payloads for every panel, in grid order
pub fn panel_payloads(panels: &[PanelContent], config: &ViewerConfig) -> Vec<PanelPayload> {
    panel_ids(panels.len())
        .into_iter()
        .zip(panels)
        .map(|(id, panel)| PanelPayload::from_panel(id, panel, config))
        .collect()
}

/// The whole grid container as sent to the host page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub template_columns: String,
    pub gap: u32,
    pub rows: usize,
    pub panels: Vec<PanelPayload>,
}

impl GridPayload {
    pub fn from_view(view: &GridView, config: &ViewerConfig) -> Self {
        match view.layout() {
            Some(layout) => Self {
                placeholder: None,
                template_columns: layout.template_columns(),
                gap: config.grid_gap,
                rows: layout.row_count(),
                panels: panel_payloads(layout.panels(), config),
            },
            None => Self {
                placeholder: view.placeholder().map(str::to_string),
                template_columns: format!("repeat({}, 1fr)", config.columns),
                gap: config.grid_gap,
                rows: 0,
                panels: Vec::new(),
            },
        }
    }
}
