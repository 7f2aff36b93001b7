//! Bounding volume shapes attached to tile headers.

use glam::{DMat3, DVec3};

/// A shape enclosing a tile's geometry, used for culling and LOD estimation.
///
/// Every parsed tile carries at most one of the three recognized shapes; a
/// missing or unrecognized shape is represented as `Option::<BoundingVolume>::None`
/// and falls back to a coarse default LOD metric, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundingVolume {
	/// An oriented bounding box given by its center and the three half-axis
	/// column vectors (x, y, z extents and orientation).
	OrientedBox { center: DVec3, half_axes: DMat3 },
	/// A bounding sphere in globe-centered Cartesian coordinates.
	Sphere { center: DVec3, radius: f64 },
	/// An axis-aligned ground rectangle given by its extents in meters.
	Rectangle { width: f64, height: f64 },
}

impl BoundingVolume {
	/// Creates a sphere volume from a Cartesian center and radius.
	#[must_use]
	pub fn sphere(center: DVec3, radius: f64) -> BoundingVolume {
		BoundingVolume::Sphere { center, radius }
	}

	/// Creates an oriented box volume from its center and half-axis columns.
	#[must_use]
	pub fn oriented_box(center: DVec3, half_axes: DMat3) -> BoundingVolume {
		BoundingVolume::OrientedBox { center, half_axes }
	}

	/// Creates a ground rectangle volume from extents in meters.
	#[must_use]
	pub fn rectangle(width: f64, height: f64) -> BoundingVolume {
		BoundingVolume::Rectangle { width, height }
	}
}
