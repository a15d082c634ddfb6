//! Broadcasting one panel's camera to every panel
//!
//! Panels are addressed by their position in the current selection, not by
//! the file they show. A camera captured from panel 0 is applied to whatever
//! panels exist when the sync runs, even if the selection changed in between.

use crate::grid::PanelContent;
use log::warn;
use plygrid_core::CameraOrientation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Position of a panel in the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub usize);

impl PanelId {
    /// The panel whose camera is broadcast on sync
    pub const REFERENCE: PanelId = PanelId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered panel identities for `count` panels
pub fn panel_ids(count: usize) -> Vec<PanelId> {
    (0..count).map(PanelId).collect()
}

/// Camera for each of `panel_count` panels.
///
/// With a reference every entry is a copy of it, the reference panel
/// included. Without one every entry is `None`, meaning leave the panel's
/// camera as it is.
pub fn sync(reference: Option<&CameraOrientation>, panel_count: usize) -> Vec<Option<CameraOrientation>> {
    vec![reference.cloned(); panel_count]
}

/// Write `cameras` into `panels` by position. `None` entries and error
/// panels are left alone; point data is never touched.
pub fn apply_cameras(panels: &mut [PanelContent], cameras: &[Option<CameraOrientation>]) {
    for id in panel_ids(panels.len()) {
        let Some(Some(camera)) = cameras.get(id.index()) else {
            continue;
        };
        if let Some(scene) = panels[id.index()].scene_mut() {
            scene.camera = Some(camera.clone());
        }
    }
}

/// Latest camera each panel has reported since it was last rendered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraReports {
    reports: Vec<Option<CameraOrientation>>,
}

impl CameraReports {
    /// Forget every report and size for `panel_count` freshly rendered panels
    pub fn reset(&mut self, panel_count: usize) {
        self.reports = vec![None; panel_count];
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Record a relayout record reported by `panel`.
    ///
    /// Records without a camera leave the previous report in place. Returns
    /// `false` when the panel does not exist or the camera was malformed.
    pub fn record(&mut self, panel: PanelId, relayout: &Value) -> bool {
        let Some(slot) = self.reports.get_mut(panel.index()) else {
            warn!("Camera report for unknown panel {}", panel.index());
            return false;
        };
        match CameraOrientation::from_relayout(relayout) {
            Ok(Some(camera)) => {
                *slot = Some(camera);
                true
            }
            Ok(None) => true,
            Err(err) => {
                warn!("Ignoring camera report for panel {}: {}", panel.index(), err);
                false
            }
        }
    }

    pub fn get(&self, panel: PanelId) -> Option<&CameraOrientation> {
        self.reports.get(panel.index()).and_then(Option::as_ref)
    }

    /// Camera of the reference panel, if it has reported one
    pub fn reference(&self) -> Option<&CameraOrientation> {
        self.get(PanelId::REFERENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneDescriptor;
    use plygrid_core::{CameraVector, Point3f, PointCloudData, Rgb};
    use serde_json::json;
    use std::path::PathBuf;

    fn eye(x: f64, y: f64, z: f64) -> CameraOrientation {
        CameraOrientation::with_eye(CameraVector::new(x, y, z))
    }

    fn panel(title: &str, camera: Option<CameraOrientation>) -> PanelContent {
        PanelContent::Scene(SceneDescriptor {
            title: title.to_string(),
            geometry: PointCloudData::from_parts(vec![Point3f::new(1.0, 2.0, 3.0)], vec![Rgb::GRAY]),
            marker_size: 1.0,
            camera,
        })
    }

    #[test]
    fn test_reference_is_broadcast_to_every_panel() {
        let reference = eye(1.0, 1.0, 1.0);
        for n in 0..6 {
            let cameras = sync(Some(&reference), n);
            assert_eq!(cameras.len(), n);
            assert!(cameras.iter().all(|c| c.as_ref() == Some(&reference)));
        }
    }

    #[test]
    fn test_absent_reference_leaves_cameras_alone() {
        let cameras = sync(None, 4);
        assert_eq!(cameras, vec![None; 4]);

        let mut panels = vec![panel("a", Some(eye(0.0, 0.0, 2.0))), panel("b", None)];
        let before = panels.clone();
        apply_cameras(&mut panels, &sync(None, 2));
        assert_eq!(panels, before);
    }

    #[test]
    fn test_apply_keeps_geometry() {
        let mut panels = vec![panel("a", None), panel("b", Some(eye(3.0, 0.0, 0.0)))];
        let reference = eye(1.0, 1.0, 1.0);
        let count = panels.len();
        apply_cameras(&mut panels, &sync(Some(&reference), count));
        for p in &panels {
            let scene = p.scene().unwrap();
            assert_eq!(scene.camera.as_ref(), Some(&reference));
            assert_eq!(scene.geometry.points, vec![Point3f::new(1.0, 2.0, 3.0)]);
        }
    }

    #[test]
    fn test_broadcast_is_positional_not_by_file() {
        // Camera captured while "first.ply" was panel 0
        let mut reports = CameraReports::default();
        reports.reset(2);
        reports.record(PanelId(0), &json!({ "scene.camera": { "eye": { "x": 1.0, "y": 1.0, "z": 1.0 } } }));
        let captured = reports.reference().cloned();

        // The selection changed: different files now occupy the positions
        let mut panels = vec![panel("other.ply", None), panel("third.ply", None), panel("new.ply", None)];
        let count = panels.len();
        apply_cameras(&mut panels, &sync(captured.as_ref(), count));
        for p in &panels {
            assert_eq!(p.scene().unwrap().camera, Some(eye(1.0, 1.0, 1.0)));
        }
    }

    #[test]
    fn test_partial_camera_is_broadcast_verbatim() {
        let camera = json!({ "eye": { "x": 1, "y": 2 }, "up": null, "projection": { "type": "orthographic" } });
        let mut reports = CameraReports::default();
        reports.reset(2);
        assert!(reports.record(PanelId(0), &json!({ "scene.camera": camera.clone() })));

        let mut panels = vec![panel("a", None), panel("b", None)];
        let count = panels.len();
        apply_cameras(&mut panels, &sync(reports.reference(), count));
        for p in &panels {
            let applied = p.scene().unwrap().camera.as_ref().unwrap();
            assert_eq!(serde_json::to_value(applied).unwrap(), camera);
        }
    }

    #[test]
    fn test_fewer_cameras_than_panels() {
        let mut panels = vec![panel("a", None), panel("b", None)];
        apply_cameras(&mut panels, &[Some(eye(1.0, 0.0, 0.0))]);
        assert!(panels[0].scene().unwrap().camera.is_some());
        assert!(panels[1].scene().unwrap().camera.is_none());
    }

    #[test]
    fn test_error_panels_are_skipped() {
        let mut panels = vec![
            panel("a", None),
            PanelContent::Unreadable {
                title: "b".to_string(),
                path: PathBuf::from("b.ply"),
                message: "broken".to_string(),
            },
        ];
        apply_cameras(&mut panels, &sync(Some(&eye(1.0, 0.0, 0.0)), 2));
        assert!(panels[0].scene().unwrap().camera.is_some());
        assert!(panels[1].scene().is_none());
    }

    #[test]
    fn test_reports_track_reference_panel() {
        let mut reports = CameraReports::default();
        reports.reset(3);
        assert_eq!(reports.reference(), None);

        assert!(reports.record(PanelId(1), &json!({ "scene.camera": { "eye": { "x": 2.0, "y": 0.0, "z": 0.0 } } })));
        assert_eq!(reports.reference(), None);
        assert_eq!(reports.get(PanelId(1)), Some(&eye(2.0, 0.0, 0.0)));

        assert!(reports.record(PanelId(0), &json!({ "scene.camera": { "eye": { "x": 1.0, "y": 1.0, "z": 1.0 } } })));
        assert!(reports.record(PanelId(0), &json!({ "autosize": true })));
        assert_eq!(reports.reference(), Some(&eye(1.0, 1.0, 1.0)));

        assert!(!reports.record(PanelId(7), &json!({})));
        assert!(!reports.record(PanelId(0), &json!({ "scene.camera": 5 })));
        assert_eq!(reports.reference(), Some(&eye(1.0, 1.0, 1.0)));

        reports.reset(3);
        assert_eq!(reports.reference(), None);
    }

    #[test]
    fn test_panel_ids_follow_selection_order() {
        assert_eq!(panel_ids(3), vec![PanelId(0), PanelId(1), PanelId(2)]);
        assert_eq!(PanelId::REFERENCE.index(), 0);
    }
}
