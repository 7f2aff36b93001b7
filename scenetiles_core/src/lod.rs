//! Approximate map-zoom estimation from bounding volumes.
//!
//! The external tile selection engine ranks tiles by a single detail scalar.
//! This module derives that scalar from whichever bounding volume shape a tile
//! carries, by comparing the volume's extent against the matching WGS84 radius
//! per axis. The result is a heuristic ranking signal, not a correctness
//! critical value: an absent or unrecognized volume yields a safe, coarse
//! default of `1`, never an error.

use crate::types::BoundingVolume;

pub const WGS84_RADIUS_X: f64 = 6378137.0;
pub const WGS84_RADIUS_Y: f64 = 6378137.0;
pub const WGS84_RADIUS_Z: f64 = 6356752.3142451793;

/// Fallback zoom for tiles without a recognized bounding volume.
const DEFAULT_ZOOM: f64 = 1.0;

/// Computes an approximate zoom level from a tile's bounding volume.
///
/// - Oriented box: mean over the three half-axes of
///   `log2(radius_axis / extent / 2)`, each extent being the Euclidean length
///   of the corresponding half-axis column.
/// - Sphere: `log2(WGS84_RADIUS_Z / radius)`.
/// - Rectangle: mean of `log2(WGS84_RADIUS_X / width)` and
///   `log2(WGS84_RADIUS_Y / height)`.
/// - `None`: `1`.
///
/// # Examples
/// ```
/// use scenetiles_core::{BoundingVolume, lod::zoom_from_bounding_volume};
/// use glam::DVec3;
///
/// let sphere = BoundingVolume::sphere(DVec3::ZERO, 6356752.3142451793);
/// assert_eq!(zoom_from_bounding_volume(Some(&sphere)), 0.0);
/// assert_eq!(zoom_from_bounding_volume(None), 1.0);
/// ```
#[must_use]
pub fn zoom_from_bounding_volume(volume: Option<&BoundingVolume>) -> f64 {
	match volume {
		Some(BoundingVolume::OrientedBox { half_axes, .. }) => {
			let x = half_axes.x_axis.length();
			let y = half_axes.y_axis.length();
			let z = half_axes.z_axis.length();

			let zoom_x = (WGS84_RADIUS_X / x / 2.0).log2();
			let zoom_y = (WGS84_RADIUS_Y / y / 2.0).log2();
			let zoom_z = (WGS84_RADIUS_Z / z / 2.0).log2();
			(zoom_x + zoom_y + zoom_z) / 3.0
		}
		Some(BoundingVolume::Sphere { radius, .. }) => (WGS84_RADIUS_Z / radius).log2(),
		Some(BoundingVolume::Rectangle { width, height }) => {
			let zoom_x = (WGS84_RADIUS_X / width).log2();
			let zoom_y = (WGS84_RADIUS_Y / height).log2();
			(zoom_x + zoom_y) / 2.0
		}
		None => DEFAULT_ZOOM,
	}
}
