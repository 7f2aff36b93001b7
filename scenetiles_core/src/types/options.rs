//! Parse options passed explicitly into every loader invocation.

/// Options controlling a single parse call.
///
/// `is_tileset` / `is_tile_header` override the loaders' URL-based
/// auto-detection; when unset, the loader classifies the input itself.
/// `load_content` asks the I3S loader to immediately fetch and attach a parsed
/// node's content instead of leaving a lazy stub.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
	pub is_tileset: Option<bool>,
	pub is_tile_header: Option<bool>,
	pub load_content: bool,
}

impl ParseOptions {
	/// Options that force the input to be treated as a tileset document.
	#[must_use]
	pub fn tileset() -> ParseOptions {
		ParseOptions {
			is_tileset: Some(true),
			..ParseOptions::default()
		}
	}

	/// Options that force the input to be treated as a tile header.
	#[must_use]
	pub fn tile_header() -> ParseOptions {
		ParseOptions {
			is_tile_header: Some(true),
			..ParseOptions::default()
		}
	}
}
