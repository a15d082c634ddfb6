//! PLY format support

use crate::PointCloudLoader;
use ply_rs::{parser::Parser, ply::{DefaultElement, Property}};
use plygrid_core::{Error, Point3f, PointCloudData, Result, Rgb};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const COLOR_CHANNELS: [&str; 3] = ["red", "green", "blue"];

/// Reads vertex positions and `red`/`green`/`blue` colours from PLY files
#[derive(Debug, Clone, Copy, Default)]
pub struct PlyLoader;

impl PointCloudLoader for PlyLoader {
    fn load(&self, path: &Path) -> Result<PointCloudData> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let mut cloud = PointCloudData::new();
        let Some(vertex_element) = ply.payload.get("vertex") else {
            return Ok(cloud);
        };

        cloud.points.reserve(vertex_element.len());
        for vertex in vertex_element {
            let x = extract_property_value(vertex, "x")?;
            let y = extract_property_value(vertex, "y")?;
            let z = extract_property_value(vertex, "z")?;
            cloud.points.push(Point3f::new(x, y, z));

            // A vertex missing any channel contributes no colour
            if let Some(color) = extract_color(vertex) {
                cloud.colors.push(color);
            }
        }

        Ok(cloud)
    }

    fn format_name(&self) -> &'static str {
        "ply"
    }
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        Some(Property::Char(val)) => Ok(*val as f32),
        Some(Property::UChar(val)) => Ok(*val as f32),
        _ => Err(Error::InvalidData(format!(
            "Property '{}' not found or invalid type",
            name
        ))),
    }
}

/// Extract a colour channel normalised to `[0, 1]`
fn extract_color_channel(element: &DefaultElement, name: &str) -> Option<f32> {
    match element.get(name)? {
        Property::UChar(val) => Some(*val as f32 / 255.0),
        Property::UShort(val) => Some(*val as f32 / 65535.0),
        Property::Float(val) => Some(*val),
        Property::Double(val) => Some(*val as f32),
        _ => None,
    }
}

fn extract_color(element: &DefaultElement) -> Option<Rgb> {
    let [r, g, b] = COLOR_CHANNELS;
    Some(Rgb::new(
        extract_color_channel(element, r)?,
        extract_color_channel(element, g)?,
        extract_color_channel(element, b)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    fn write_ply(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_ascii_with_uchar_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ply(
            dir.path(),
            "colored.ply",
            "ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nproperty float y\nproperty float z\n\
             property uchar red\nproperty uchar green\nproperty uchar blue\nend_header\n\
             0 0 0 255 0 0\n1 2 3 0 0 255\n",
        );

        let cloud = PlyLoader.load(&path).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.colors.len(), 2);
        assert_relative_eq!(cloud.points[1].y, 2.0);
        assert_eq!(cloud.colors[0], Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(cloud.colors[1], Rgb::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_float_colors_taken_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ply(
            dir.path(),
            "float.ply",
            "ply\nformat ascii 1.0\nelement vertex 1\nproperty double x\nproperty double y\nproperty double z\n\
             property float red\nproperty float green\nproperty float blue\nend_header\n\
             0.5 0.5 0.5 0.25 0.5 0.75\n",
        );

        let cloud = PlyLoader.load(&path).unwrap();
        assert_relative_eq!(cloud.colors[0].r, 0.25);
        assert_relative_eq!(cloud.colors[0].b, 0.75);
    }

    #[test]
    fn test_positions_only_yields_no_colors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ply(
            dir.path(),
            "plain.ply",
            "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nend_header\n\
             0 0 0\n1 0 0\n0 1 0\n",
        );

        let cloud = PlyLoader.load(&path).unwrap();
        assert_eq!(cloud.len(), 3);
        assert!(cloud.colors.is_empty());
    }

    #[test]
    fn test_no_vertex_element_is_empty_cloud() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ply(
            dir.path(),
            "empty.ply",
            "ply\nformat ascii 1.0\nelement face 0\nproperty list uchar int vertex_indices\nend_header\n",
        );

        let cloud = PlyLoader.load(&path).unwrap();
        assert!(cloud.is_empty());
    }

    #[test]
    fn test_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_ply(dir.path(), "broken.ply", "this is not a ply file\n");
        assert!(PlyLoader.load(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlyLoader.load(&dir.path().join("missing.ply"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
