//! Viewer configuration

use std::num::NonZeroUsize;

/// Display settings for the point cloud grid
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Panels per grid row
    pub columns: NonZeroUsize,
    /// Marker size used before the user touches the slider
    pub default_marker_size: f32,
    /// Inclusive slider bounds for marker size
    pub marker_size_range: (f32, f32),
    pub marker_size_step: f32,
    /// Height of each panel in pixels
    pub panel_height: u32,
    pub marker_opacity: f32,
    /// Gap between grid cells in pixels
    pub grid_gap: u32,
    /// File name suffix of point cloud files
    pub extension: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            columns: NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN),
            default_marker_size: 1.0,
            marker_size_range: (1.0, 5.0),
            marker_size_step: 0.5,
            panel_height: 500,
            marker_opacity: 0.8,
            grid_gap: 15,
            extension: "ply".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Bound a marker size to the slider range and snap it to the slider step.
    /// Non-finite input falls back to the default size.
    pub fn normalize_marker_size(&self, size: f32) -> f32 {
        let (min, max) = self.marker_size_range;
        if !size.is_finite() {
            return self.default_marker_size.clamp(min, max);
        }
        let clamped = size.clamp(min, max);
        if self.marker_size_step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - min) / self.marker_size_step).round();
        (min + steps * self.marker_size_step).min(max)
    }
}
