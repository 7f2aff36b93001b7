//! Serde schema of 3D Tiles tileset documents.
//!
//! Tile nodes are kept as raw [`serde_json::Value`]s in the document so the
//! tree can be walked with an explicit work list instead of the call stack;
//! only the per-node fields are deserialized into typed structs, one node at
//! a time.

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use scenetiles_core::BoundingVolume;
use scenetiles_core::lod::{WGS84_RADIUS_X, WGS84_RADIUS_Y};

/// A complete `tileset.json` document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetDocument {
	#[serde(default)]
	pub asset: Option<AssetJson>,
	#[serde(default)]
	pub geometric_error: Option<f64>,
	/// The root tile node, traversed iteratively during normalization.
	pub root: Value,
}

#[derive(Debug, Deserialize)]
pub struct AssetJson {
	#[serde(default)]
	pub version: Option<String>,
}

/// One tile node, minus its `children` (split off before deserialization).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileJson {
	#[serde(default)]
	pub bounding_volume: Option<BoundingVolumeJson>,
	#[serde(default)]
	pub geometric_error: Option<f64>,
	#[serde(default)]
	pub refine: Option<String>,
	#[serde(default)]
	pub transform: Option<Vec<f64>>,
	#[serde(default)]
	pub content: Option<ContentJson>,
}

/// A tile's content reference. Newer documents declare `uri`, older ones `url`.
#[derive(Debug, Deserialize)]
pub struct ContentJson {
	#[serde(default)]
	pub uri: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
}

impl ContentJson {
	#[must_use]
	pub fn into_uri(self) -> Option<String> {
		self.uri.or(self.url)
	}
}

/// The declared bounding volume of a tile.
///
/// A malformed document could carry more than one shape field, so conversion
/// checks them in a fixed order: `box` before `sphere` before `region`.
#[derive(Debug, Deserialize)]
pub struct BoundingVolumeJson {
	#[serde(default, rename = "box")]
	pub obb: Option<Vec<f64>>,
	#[serde(default)]
	pub sphere: Option<Vec<f64>>,
	#[serde(default)]
	pub region: Option<Vec<f64>>,
}

impl BoundingVolumeJson {
	/// Converts the declared shape into a normalized [`BoundingVolume`].
	///
	/// An unrecognized or malformed shape yields `None` (the LOD estimator
	/// falls back to its coarse default), never an error.
	#[must_use]
	pub fn into_volume(self) -> Option<BoundingVolume> {
		if let Some(values) = self.obb {
			if values.len() == 12 {
				let half_axes = glam::DMat3::from_cols(
					glam::DVec3::new(values[3], values[4], values[5]),
					glam::DVec3::new(values[6], values[7], values[8]),
					glam::DVec3::new(values[9], values[10], values[11]),
				);
				let center = glam::DVec3::new(values[0], values[1], values[2]);
				return Some(BoundingVolume::oriented_box(center, half_axes));
			}
			warn!("bounding box must have 12 values, got {}", values.len());
			return None;
		}

		if let Some(values) = self.sphere {
			if let [x, y, z, radius] = values.as_slice() {
				return Some(BoundingVolume::sphere(glam::DVec3::new(*x, *y, *z), *radius));
			}
			warn!("bounding sphere must have 4 values, got {}", values.len());
			return None;
		}

		if let Some(values) = self.region {
			// west, south, east, north in radians, then min/max height.
			if let [west, south, east, north, _min_h, _max_h] = values.as_slice() {
				return Some(BoundingVolume::rectangle(
					(east - west) * WGS84_RADIUS_X,
					(north - south) * WGS84_RADIUS_Y,
				));
			}
			warn!("bounding region must have 6 values, got {}", values.len());
			return None;
		}

		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::DVec3;

	#[test]
	fn test_box_beats_sphere_beats_region() {
		// A malformed volume carrying every shape resolves to the box.
		let json = r#"{
			"box": [0, 0, 0, 10, 0, 0, 0, 10, 0, 0, 0, 10],
			"sphere": [0, 0, 0, 99],
			"region": [-0.1, -0.1, 0.1, 0.1, 0, 20]
		}"#;
		let volume: BoundingVolumeJson = serde_json::from_str(json).unwrap();
		assert!(matches!(volume.into_volume(), Some(BoundingVolume::OrientedBox { .. })));

		let json = r#"{"sphere": [1, 2, 3, 99], "region": [-0.1, -0.1, 0.1, 0.1, 0, 20]}"#;
		let volume: BoundingVolumeJson = serde_json::from_str(json).unwrap();
		assert_eq!(
			volume.into_volume(),
			Some(BoundingVolume::sphere(DVec3::new(1.0, 2.0, 3.0), 99.0))
		);
	}

	#[test]
	fn test_region_becomes_rectangle() {
		let json = r#"{"region": [0.0, 0.0, 0.001, 0.002, 0, 20]}"#;
		let volume: BoundingVolumeJson = serde_json::from_str(json).unwrap();
		assert_eq!(
			volume.into_volume(),
			Some(BoundingVolume::rectangle(0.001 * WGS84_RADIUS_X, 0.002 * WGS84_RADIUS_Y))
		);
	}

	#[test]
	fn test_malformed_shape_is_none_not_error() {
		let json = r#"{"sphere": [1, 2, 3]}"#;
		let volume: BoundingVolumeJson = serde_json::from_str(json).unwrap();
		assert_eq!(volume.into_volume(), None);

		let json = r#"{}"#;
		let volume: BoundingVolumeJson = serde_json::from_str(json).unwrap();
		assert_eq!(volume.into_volume(), None);
	}
}
