//! Loader self-description, used by the facade registry to pick a loader for
//! an incoming URL.

/// Static description of one format loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderDescriptor {
	/// Stable identifier, e.g. `"3d-tiles"`.
	pub id: &'static str,
	/// Human-readable name.
	pub name: &'static str,
	/// Crate version, exposed for self-description.
	pub version: &'static str,
	/// File extensions this loader recognizes.
	pub extensions: &'static [&'static str],
	pub mime_type: &'static str,
}

impl LoaderDescriptor {
	/// Returns `true` if `extension` (without dot) is handled by this loader.
	#[must_use]
	pub fn supports_extension(&self, extension: &str) -> bool {
		self.extensions.iter().any(|e| extension.eq_ignore_ascii_case(e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_LOADER: LoaderDescriptor = LoaderDescriptor {
		id: "test",
		name: "Test",
		version: "0.0.0",
		extensions: &["json", "bin"],
		mime_type: "application/octet-stream",
	};

	#[test]
	fn test_supports_extension() {
		assert!(TEST_LOADER.supports_extension("json"));
		assert!(TEST_LOADER.supports_extension("BIN"));
		assert!(!TEST_LOADER.supports_extension("b3dm"));
	}
}
