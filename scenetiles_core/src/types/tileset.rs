//! This module defines [`Tileset`], the normalized root object handed to the
//! external tree-traversal engine, and the source format tag.

use std::fmt::{Display, Formatter};

use super::{LodMetricType, TileHeader};

/// The source format a tileset was normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilesetSource {
	Tiles3d,
	I3s,
}

impl TilesetSource {
	pub fn as_str(&self) -> &str {
		match self {
			TilesetSource::Tiles3d => "TILES3D",
			TilesetSource::I3s => "I3S",
		}
	}
}

impl Display for TilesetSource {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A hierarchical collection of tiles describing one dataset, rooted at one
/// tile header. Immutable once parsed; owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
	pub root: TileHeader,
	/// Directory non-absolute content URLs in this tileset are relative to.
	pub base_path: String,
	pub source: TilesetSource,
	/// LOD metric inherited from the root tile header.
	pub lod_metric_type: LodMetricType,
	pub lod_metric_value: f64,
}

impl Tileset {
	/// Builds a tileset around a normalized root header, inheriting the root's
	/// LOD metric as both loaders do.
	#[must_use]
	pub fn from_root(root: TileHeader, base_path: String, source: TilesetSource) -> Tileset {
		let lod_metric_type = root.lod_metric_type.clone();
		let lod_metric_value = root.lod_metric_value;
		Tileset {
			root,
			base_path,
			source,
			lod_metric_type,
			lod_metric_value,
		}
	}
}
