//! Camera orientation records exchanged with the rendering widget

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the widget reports a 3D scene's camera in its relayout record
pub const RELAYOUT_CAMERA_KEY: &str = "scene.camera";

/// A 3D vector in the widget's `{x, y, z}` object form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CameraVector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Viewpoint of a 3D scene as reported by the widget: eye position, up
/// vector, look-at centre and whatever else it chooses to send.
///
/// The record is opaque. It is stored and serialized exactly as received,
/// so integers, nulls and unknown keys survive a copy between panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraOrientation(Map<String, Value>);

impl CameraOrientation {
    /// Orientation that only sets the eye position
    pub fn with_eye(eye: CameraVector) -> Self {
        let mut fields = Map::new();
        fields.insert(
            "eye".to_string(),
            serde_json::json!({ "x": eye.x, "y": eye.y, "z": eye.z }),
        );
        Self(fields)
    }

    /// The record as received
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn eye(&self) -> Option<CameraVector> {
        self.vector("eye")
    }

    pub fn up(&self) -> Option<CameraVector> {
        self.vector("up")
    }

    pub fn center(&self) -> Option<CameraVector> {
        self.vector("center")
    }

    /// Read-only view of a complete `{x, y, z}` entry; the record is not changed
    fn vector(&self, key: &str) -> Option<CameraVector> {
        CameraVector::deserialize(self.0.get(key)?).ok()
    }

    /// Extract the camera from a panel's relayout record.
    ///
    /// Returns `Ok(None)` when the record carries no camera, meaning the user
    /// has not interacted with that panel yet. Any JSON object is accepted
    /// as-is; only a non-object camera is an error.
    pub fn from_relayout(record: &Value) -> Result<Option<Self>> {
        match record.get(RELAYOUT_CAMERA_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(Self(fields.clone()))),
            Some(other) => Err(Error::InvalidData(format!(
                "{RELAYOUT_CAMERA_KEY} is not an object: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relayout_without_camera_is_absent() {
        let record = json!({ "autosize": true });
        assert_eq!(CameraOrientation::from_relayout(&record).unwrap(), None);
        assert_eq!(CameraOrientation::from_relayout(&Value::Null).unwrap(), None);
        assert_eq!(
            CameraOrientation::from_relayout(&json!({ "scene.camera": null })).unwrap(),
            None
        );
    }

    #[test]
    fn test_relayout_camera_is_copied_verbatim() {
        let records = [
            json!({
                "eye": { "x": 1.25, "y": -0.5, "z": 2.0 },
                "up": { "x": 0.0, "y": 0.0, "z": 1.0 },
                "center": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "projection": { "type": "perspective" }
            }),
            json!({ "eye": { "x": 1, "y": 1, "z": 1 } }),
            json!({ "eye": { "x": 1.0, "y": 1.0, "z": 1.0, "w": 0 } }),
            json!({ "eye": { "x": 1.0, "y": 1.0, "z": 1.0 }, "up": null }),
            json!({ "eye": { "x": 1.0, "y": 1.0 } }),
            json!({}),
        ];
        for camera in records {
            let record = json!({ "scene.camera": camera.clone() });
            let parsed = CameraOrientation::from_relayout(&record).unwrap().unwrap();
            assert_eq!(serde_json::to_value(&parsed).unwrap(), camera);
        }
    }

    #[test]
    fn test_accessors_read_complete_vectors() {
        let record = json!({
            "scene.camera": {
                "eye": { "x": 1, "y": -0.5, "z": 2.0 },
                "up": { "x": 0.0, "y": 1.0 },
                "center": null
            }
        });
        let camera = CameraOrientation::from_relayout(&record).unwrap().unwrap();
        assert_eq!(camera.eye(), Some(CameraVector::new(1.0, -0.5, 2.0)));
        assert_eq!(camera.up(), None);
        assert_eq!(camera.center(), None);
        assert_eq!(camera.as_map().len(), 3);
    }

    #[test]
    fn test_with_eye_shape() {
        let camera = CameraOrientation::with_eye(CameraVector::new(1.0, 1.0, 1.0));
        assert_eq!(
            serde_json::to_value(&camera).unwrap(),
            json!({ "eye": { "x": 1.0, "y": 1.0, "z": 1.0 } })
        );
        assert_eq!(camera.eye(), Some(CameraVector::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_non_object_camera_is_invalid_data() {
        for camera in [json!("sideways"), json!(5), json!([1, 2, 3])] {
            let record = json!({ "scene.camera": camera });
            assert!(matches!(
                CameraOrientation::from_relayout(&record),
                Err(Error::InvalidData(_))
            ));
        }
    }
}
