//! Geometry normalization into a numerically stable local frame.
//!
//! Decoded I3S positions are stored as small cartographic offsets relative to
//! a per-geometry anchor. This module reconstructs true geographic
//! coordinates, converts them to globe-centered Cartesians, and produces the
//! matrix that lets the renderer re-express those Cartesians in a
//! small-magnitude local frame. The matrix carries the large globe offset so
//! single-precision GPU pipelines never see coordinates near the f32
//! precision limit.

use glam::{DMat4, DVec3};

use crate::geodetic::Ellipsoid;

/// Result of normalizing one geometry's positions.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGeometry {
	/// Vertex positions as f64 globe-centered Cartesians, three values per
	/// vertex.
	pub positions: Vec<f64>,
	/// Inverse of (tile-declared transform × ENU frame). Applying it to
	/// `positions` yields small local-frame coordinates; its inverse is the
	/// render-time draw matrix.
	pub model_matrix: DMat4,
	/// Longitude (deg), latitude (deg), height (m) of the local frame anchor.
	pub cartographic_origin: DVec3,
	/// The same anchor in globe-centered Cartesian coordinates.
	pub cartesian_origin: DVec3,
}

/// Normalizes decoded positions around a tile's bounding-sphere center.
///
/// `positions` are cartographic offsets (lon, lat, height triples) relative to
/// the geometry anchor; `center` is the cartographic bounding-sphere center
/// (lon deg, lat deg); `transform` is the tile-declared transform, identity if
/// absent.
///
/// The anchor height is `-min_height` over all input triples, which keeps the
/// origin at or below the lowest vertex so no vertex ends up below ground in
/// local space. Deterministic: identical inputs produce bit-identical output.
#[must_use]
pub fn normalize_positions(positions: &[f32], center: DVec3, transform: &DMat4) -> NormalizedGeometry {
	let min_height = positions
		.chunks_exact(3)
		.map(|triple| f64::from(triple[2]))
		.fold(f64::INFINITY, f64::min);
	let min_height = if min_height.is_finite() { min_height } else { 0.0 };

	let cartographic_origin = DVec3::new(center.x, center.y, -min_height);
	let cartesian_origin = Ellipsoid::WGS84.cartographic_to_cartesian(cartographic_origin);
	let enu_frame = Ellipsoid::WGS84.east_north_up_to_fixed_frame(cartesian_origin);

	let mut cartesians = Vec::with_capacity(positions.len());
	for triple in positions.chunks_exact(3) {
		let cartographic = DVec3::new(
			f64::from(triple[0]) + cartographic_origin.x,
			f64::from(triple[1]) + cartographic_origin.y,
			f64::from(triple[2]) + cartographic_origin.z,
		);
		let cartesian = Ellipsoid::WGS84.cartographic_to_cartesian(cartographic);
		cartesians.extend_from_slice(&[cartesian.x, cartesian.y, cartesian.z]);
	}

	NormalizedGeometry {
		positions: cartesians,
		model_matrix: (*transform * enu_frame).inverse(),
		cartographic_origin,
		cartesian_origin,
	}
}
