//! This module defines [`TileHeader`], the normalized metadata for one node of
//! a tile tree, independent of whether its geometry content has been fetched.

use glam::{DMat4, DVec3};
use log::debug;

use super::{BoundingVolume, LodMetricType, Refine, TileContent, TileType};

/// Normalized metadata for one node of a tile tree.
///
/// Both format loaders produce this same schema: the 3D Tiles loader fills the
/// whole tree in one pass, the I3S loader produces the root eagerly and
/// descendants lazily on first reference. Children are owned by their parent's
/// `children` collection; no parent back-references are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileHeader {
	/// Identity, derived deterministically from the resolved content URL
	/// (3D Tiles) or node path (I3S). `None` for tiles without content.
	pub id: Option<String>,
	/// The shape enclosing this tile's geometry, if one was recognized.
	pub bounding_volume: Option<BoundingVolume>,
	/// Cartographic center (lon deg, lat deg, height m) of the bounding
	/// sphere, kept by the I3S loader as the geometry normalization anchor.
	pub cartographic_center: Option<DVec3>,
	/// Refinement policy combining this tile's geometry with its children's.
	/// `None` when neither the tile nor any ancestor declared one.
	pub refine: Option<Refine>,
	pub lod_metric_type: LodMetricType,
	/// Normalized LOD scalar; smaller always means coarser.
	pub lod_metric_value: f64,
	pub tile_type: TileType,
	/// Tile-local to parent-frame transform, if declared.
	pub transform: Option<DMat4>,
	/// Resolved URL of the tile's content buffer.
	pub content_url: Option<String>,
	/// Resolved URL of the I3S feature document.
	pub feature_url: Option<String>,
	/// Resolved URL of the I3S texture resource.
	pub texture_url: Option<String>,
	/// URL of the I3S node document this header is parsed from. On a lazy
	/// child stub this is the only field besides `id`, and is what the
	/// traversal engine fetches to expand the stub.
	pub node_url: Option<String>,
	pub children: Vec<TileHeader>,
	/// Decoded content, populated at most once after an on-demand fetch.
	pub content: Option<TileContent>,
}

impl TileHeader {
	/// Attaches decoded content to this header.
	///
	/// Content is populated at most once: if content is already present the
	/// call is a no-op, since re-parsing the same buffer yields identical
	/// attributes anyway. A failed content fetch must never reach this point
	/// with partial data; callers attach fully decoded content or nothing.
	pub fn attach_content(&mut self, content: TileContent) {
		if self.content.is_some() {
			debug!("tile {:?} already has content, keeping the existing one", self.id);
			return;
		}
		self.content = Some(content);
	}

	/// Returns `true` if this tile declares no content buffer.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.content_url.is_none()
	}

	/// Approximate zoom level of this tile, derived from its bounding volume.
	#[must_use]
	pub fn zoom(&self) -> f64 {
		crate::lod::zoom_from_bounding_volume(self.bounding_volume.as_ref())
	}
}
