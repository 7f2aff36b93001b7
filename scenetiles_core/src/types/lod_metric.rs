//! This module defines the `LodMetricType` enum. Both source formats reduce
//! their LOD information to one scalar; this tag records which semantics the
//! scalar carries.

use std::fmt::{Display, Formatter};

/// The semantics of a tile's `lod_metric_value` scalar.
///
/// Whatever the type, a smaller value always means a coarser tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LodMetricType {
	/// 3D Tiles `geometricError`, in meters.
	GeometricError,
	/// I3S `maxScreenThreshold`, in screen pixels.
	MaxScreenThreshold,
	/// Any other declared I3S metric type, passed through unchanged.
	Other(String),
}

impl LodMetricType {
	/// Maps a declared I3S `metricType` string onto the enum.
	#[must_use]
	pub fn from_declared(value: &str) -> LodMetricType {
		match value {
			"maxScreenThreshold" => LodMetricType::MaxScreenThreshold,
			"geometricError" => LodMetricType::GeometricError,
			other => LodMetricType::Other(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			LodMetricType::GeometricError => "geometricError",
			LodMetricType::MaxScreenThreshold => "maxScreenThreshold",
			LodMetricType::Other(value) => value,
		}
	}
}

impl Default for LodMetricType {
	fn default() -> LodMetricType {
		LodMetricType::GeometricError
	}
}

impl Display for LodMetricType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_declared() {
		assert_eq!(
			LodMetricType::from_declared("maxScreenThreshold"),
			LodMetricType::MaxScreenThreshold
		);
		assert_eq!(
			LodMetricType::from_declared("geometricError"),
			LodMetricType::GeometricError
		);
		assert_eq!(
			LodMetricType::from_declared("distanceRangeFromDefaultCamera"),
			LodMetricType::Other("distanceRangeFromDefaultCamera".to_string())
		);
	}
}
