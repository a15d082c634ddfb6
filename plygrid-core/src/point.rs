//! Point and colour types

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// An RGB colour with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Neutral mid-gray used when a cloud's colours cannot be trusted
    pub const GRAY: Rgb = Rgb { r: 0.5, g: 0.5, b: 0.5 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a colour from 8-bit channels
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Format as a CSS `rgb(r,g,b)` string with 0-255 channels
    pub fn to_css(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgb({},{},{})", channel(self.r), channel(self.g), channel(self.b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::GRAY
    }
}
