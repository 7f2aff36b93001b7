//! This module defines the `TileType` enum, classifying what kind of renderable
//! content a tile header points at.
//!
//! The classification is deliberately permissive: an unrecognized content file
//! extension is passed through as [`TileType::Other`] instead of failing the
//! parse, so downstream consumers see exactly what the source declared.

use std::fmt::{Display, Formatter};

/// The kind of content a tile header points at.
///
/// # Variants
/// - `Empty` - the tile declares no content at all
/// - `PointCloud` - a point cloud payload (`.pnts`)
/// - `Scenegraph` - a batched or instanced 3D model payload (`.b3dm`, `.i3dm`)
/// - `SimpleMesh` - a single textured mesh (I3S node geometry)
/// - `Other` - an unrecognized content extension, passed through unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileType {
	Empty,
	PointCloud,
	Scenegraph,
	SimpleMesh,
	Other(String),
}

impl TileType {
	/// Returns a lowercase string identifier for this tile type.
	pub fn as_str(&self) -> &str {
		match self {
			TileType::Empty => "empty",
			TileType::PointCloud => "pointcloud",
			TileType::Scenegraph => "scenegraph",
			TileType::SimpleMesh => "simplemesh",
			TileType::Other(extension) => extension,
		}
	}
}

impl Default for TileType {
	fn default() -> TileType {
		TileType::Empty
	}
}

impl Display for TileType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_as_str() {
		assert_eq!(TileType::Empty.as_str(), "empty");
		assert_eq!(TileType::PointCloud.as_str(), "pointcloud");
		assert_eq!(TileType::Scenegraph.as_str(), "scenegraph");
		assert_eq!(TileType::SimpleMesh.as_str(), "simplemesh");
		assert_eq!(TileType::Other("vctr".to_string()).as_str(), "vctr");
	}

	#[test]
	fn test_display() {
		assert_eq!(TileType::SimpleMesh.to_string(), "simplemesh");
	}
}
