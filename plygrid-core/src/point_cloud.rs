//! Loaded point cloud data

use crate::point::*;
use serde::{Deserialize, Serialize};

/// Points and their per-point colours as read from a single file.
///
/// Once [`PointCloudData::enforce_color_count`] has run, `colors.len()`
/// equals `points.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloudData {
    pub points: Vec<Point3f>,
    pub colors: Vec<Rgb>,
}

impl PointCloudData {
    /// Create an empty cloud
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cloud from points and colours without checking their counts
    pub fn from_parts(points: Vec<Point3f>, colors: Vec<Rgb>) -> Self {
        Self { points, colors }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether every point has exactly one colour
    pub fn has_matching_colors(&self) -> bool {
        self.colors.len() == self.points.len()
    }

    /// Replace the colours wholesale with [`Rgb::GRAY`] when their count
    /// differs from the point count. Returns `true` if the fallback was applied.
    pub fn enforce_color_count(&mut self) -> bool {
        if self.has_matching_colors() {
            return false;
        }
        self.colors = vec![Rgb::GRAY; self.points.len()];
        true
    }

    /// Split into separate x, y and z coordinate columns
    pub fn coordinates(&self) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        let mut xs = Vec::with_capacity(self.len());
        let mut ys = Vec::with_capacity(self.len());
        let mut zs = Vec::with_capacity(self.len());
        for point in &self.points {
            xs.push(point.x);
            ys.push(point.y);
            zs.push(point.z);
        }
        (xs, ys, zs)
    }
}
