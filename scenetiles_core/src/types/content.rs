//! Decoded tile content: vertex attribute buffers, the matrices anchoring them
//! to the globe, and opaque payloads handed on to the external renderer.

use glam::{DMat4, DVec3};
use serde_json::Value;

use super::Blob;

/// Decoded vertex attribute buffers. Each attribute is present or absent
/// independently of the others.
///
/// Positions are f64 globe-centered Cartesians produced by the geometry
/// normalizer; colors are 0-255 integers to be interpreted as a normalized
/// 0-1 range downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexAttributes {
	pub positions: Option<Vec<f64>>,
	pub normals: Option<Vec<f32>>,
	pub colors: Option<Vec<u8>>,
	pub tex_coords: Option<Vec<f32>>,
}

/// Format-specific decoded geometry attached to a tile header after its
/// content has been fetched and parsed.
///
/// `model_matrix` maps the decoded local-frame positions back to the tile's
/// declared absolute frame, so the renderer can keep per-tile vertex data in a
/// small-magnitude frame while the matrix carries the large globe offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileContent {
	/// Number of vertices in the decoded geometry.
	pub vertex_count: usize,
	/// Decoded attribute buffers.
	pub attributes: VertexAttributes,
	/// Maps decoded local-frame positions to the tile's declared absolute frame.
	pub model_matrix: Option<DMat4>,
	/// Longitude (deg), latitude (deg) and height (m) of the local frame's anchor.
	pub cartographic_origin: Option<DVec3>,
	/// The same anchor in globe-centered Cartesian coordinates.
	pub cartesian_origin: Option<DVec3>,
	/// The I3S feature document this content was decoded against.
	pub feature_data: Option<Value>,
	/// Raw texture bytes, decoded by an external image loader.
	pub texture: Option<Blob>,
	/// Opaque sub-model payload (point cloud / scenegraph / mesh bytes) handed
	/// to the external model parser untouched.
	pub payload: Option<Blob>,
	/// Total size in bytes of the source content buffer.
	pub byte_length: usize,
}

impl TileContent {
	/// Content with no geometry at all, a renderable no-op.
	#[must_use]
	pub fn new_empty() -> TileContent {
		TileContent::default()
	}

	/// Returns `true` if this content carries decoded positions.
	#[must_use]
	pub fn has_geometry(&self) -> bool {
		self.attributes.positions.is_some()
	}
}
