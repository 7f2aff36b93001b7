//! This module defines the [`Ellipsoid`] struct and the WGS84 constants used
//! for all geographic↔Cartesian conversions.
//!
//! # Overview
//!
//! Cartographic coordinates are `(longitude deg, latitude deg, height m)`;
//! Cartesian coordinates are globe-centered meters. Conversions follow the
//! standard ellipsoidal formulas exactly: `cartesian_to_cartographic` solves
//! the closest-point-on-ellipsoid problem iteratively, so a round trip for
//! points on or near the surface reproduces the input to floating-point
//! rounding. No approximation shortcuts.
//!
//! # Examples
//!
//! ```rust
//! use scenetiles_core::geodetic::Ellipsoid;
//! use glam::DVec3;
//!
//! let cartesian = Ellipsoid::WGS84.cartographic_to_cartesian(DVec3::new(13.4, 52.5, 34.0));
//! let back = Ellipsoid::WGS84.cartesian_to_cartographic(cartesian).unwrap();
//! assert!((back.x - 13.4).abs() < 1e-9);
//! assert!((back.y - 52.5).abs() < 1e-9);
//! ```

use glam::{DMat4, DVec3};

/// Convergence threshold for the iterative surface projection.
const SURFACE_EPSILON: f64 = 1e-12;
/// Squared-norm threshold below which a point counts as the ellipsoid center.
const CENTER_TOLERANCE_SQUARED: f64 = 0.1;

/// An ellipsoid of revolution with per-axis radii in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
	pub radii: DVec3,
	radii_squared: DVec3,
	one_over_radii_squared: DVec3,
}

impl Ellipsoid {
	/// The WGS84 reference ellipsoid (semi-major 6378137.0 m, semi-minor
	/// 6356752.3142451793 m).
	pub const WGS84: Ellipsoid = Ellipsoid::new(6378137.0, 6378137.0, 6356752.3142451793);

	/// Creates an ellipsoid from its three radii in meters.
	#[must_use]
	pub const fn new(x: f64, y: f64, z: f64) -> Ellipsoid {
		Ellipsoid {
			radii: DVec3::new(x, y, z),
			radii_squared: DVec3::new(x * x, y * y, z * z),
			one_over_radii_squared: DVec3::new(1.0 / (x * x), 1.0 / (y * y), 1.0 / (z * z)),
		}
	}

	/// Converts `(longitude deg, latitude deg, height m)` to globe-centered
	/// Cartesian coordinates.
	#[must_use]
	pub fn cartographic_to_cartesian(&self, cartographic: DVec3) -> DVec3 {
		let longitude = cartographic.x.to_radians();
		let latitude = cartographic.y.to_radians();
		let height = cartographic.z;

		let cos_latitude = latitude.cos();
		let normal = DVec3::new(
			cos_latitude * longitude.cos(),
			cos_latitude * longitude.sin(),
			latitude.sin(),
		);

		let k = self.radii_squared * normal;
		let gamma = normal.dot(k).sqrt();
		k / gamma + normal * height
	}

	/// Converts globe-centered Cartesian coordinates back to
	/// `(longitude deg, latitude deg, height m)`.
	///
	/// Returns `None` for points at (or numerically indistinguishable from)
	/// the ellipsoid center, where no geodetic coordinates exist.
	#[must_use]
	pub fn cartesian_to_cartographic(&self, cartesian: DVec3) -> Option<DVec3> {
		let surface = self.scale_to_geodetic_surface(cartesian)?;

		let normal = (surface * self.one_over_radii_squared).normalize();
		let height_vector = cartesian - surface;

		let longitude = normal.y.atan2(normal.x);
		let latitude = normal.z.asin();
		let height = height_vector.dot(cartesian).signum() * height_vector.length();

		Some(DVec3::new(longitude.to_degrees(), latitude.to_degrees(), height))
	}

	/// Returns the unit normal of the ellipsoid surface below `cartesian`.
	#[must_use]
	pub fn geodetic_surface_normal(&self, cartesian: DVec3) -> DVec3 {
		(cartesian * self.one_over_radii_squared).normalize()
	}

	/// Builds the rotation+translation matrix that maps local East-North-Up
	/// coordinates at `origin` (globe-centered Cartesian) to globe-centered
	/// Cartesian coordinates.
	///
	/// Column layout: east, north, up, origin.
	#[must_use]
	pub fn east_north_up_to_fixed_frame(&self, origin: DVec3) -> DMat4 {
		let up = self.geodetic_surface_normal(origin);

		// The east direction is undefined on the polar axis; any tangent
		// direction forms a valid frame there.
		let east = if origin.x.abs() < f64::EPSILON && origin.y.abs() < f64::EPSILON {
			DVec3::Y
		} else {
			DVec3::new(-origin.y, origin.x, 0.0).normalize()
		};
		let north = up.cross(east);

		DMat4::from_cols(east.extend(0.0), north.extend(0.0), up.extend(0.0), origin.extend(1.0))
	}

	/// Projects `cartesian` onto the ellipsoid surface along the gradient
	/// direction, via the standard Newton iteration on the scaling multiplier.
	fn scale_to_geodetic_surface(&self, cartesian: DVec3) -> Option<DVec3> {
		let position_squared = cartesian * cartesian;
		let scaled = position_squared * self.one_over_radii_squared;
		let squared_norm = scaled.x + scaled.y + scaled.z;
		let ratio = (1.0 / squared_norm).sqrt();

		// The radial intersection is the initial guess.
		let intersection = cartesian * ratio;
		if squared_norm < CENTER_TOLERANCE_SQUARED {
			return if ratio.is_finite() { Some(intersection) } else { None };
		}

		let gradient = intersection * self.one_over_radii_squared * 2.0;
		let mut lambda = (1.0 - ratio) * cartesian.length() / (0.5 * gradient.length());
		let mut correction = 0.0;

		let mut multiplier;
		loop {
			lambda -= correction;

			multiplier = DVec3::new(
				1.0 / (1.0 + lambda * self.one_over_radii_squared.x),
				1.0 / (1.0 + lambda * self.one_over_radii_squared.y),
				1.0 / (1.0 + lambda * self.one_over_radii_squared.z),
			);
			let multiplier_squared = multiplier * multiplier;
			let multiplier_cubed = multiplier_squared * multiplier;

			let func = scaled.dot(multiplier_squared) - 1.0;
			if func.abs() <= SURFACE_EPSILON {
				break;
			}

			let denominator = (scaled * self.one_over_radii_squared).dot(multiplier_cubed);
			let derivative = -2.0 * denominator;
			correction = func / derivative;
		}

		Some(cartesian * multiplier)
	}
}
