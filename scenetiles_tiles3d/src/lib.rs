//! # scenetiles_tiles3d
//!
//! Loader for OGC 3D Tiles: parses a tileset JSON document into a normalized
//! tile header tree in one pass, and validates binary tile content buffers
//! (`pnts`, `b3dm`, `i3dm`, `cmpt`) before handing their payloads to the
//! external model parser.
//!
//! ## Usage Example
//!
//! ```rust
//! use scenetiles_tiles3d::{parse, ParsedTiles3d};
//! use scenetiles_core::{Blob, ParseOptions};
//!
//! let document = r#"{"root": {"geometricError": 100, "refine": "REPLACE"}}"#;
//! let parsed = parse(
//!     &Blob::from(document),
//!     "http://example.com/tileset.json",
//!     &ParseOptions::default(),
//! ).unwrap();
//! assert!(matches!(parsed, ParsedTiles3d::Tileset(_)));
//! ```

mod content;
pub mod schema;
mod tileset;

pub use content::parse_tile_content;
pub use tileset::{base_uri, parse_tileset, tile_type_from_url};

use anyhow::Result;
use scenetiles_core::{Blob, LoaderDescriptor, ParseOptions, TileContent, Tileset};

/// Self-description of the 3D Tiles loader.
pub const TILES3D_LOADER: LoaderDescriptor = LoaderDescriptor {
	id: "3d-tiles",
	name: "3D Tiles",
	version: env!("CARGO_PKG_VERSION"),
	extensions: &["json", "cmpt", "pnts", "b3dm", "i3dm"],
	mime_type: "application/octet-stream",
};

/// Result of one 3D Tiles parse call.
#[derive(Debug)]
pub enum ParsedTiles3d {
	Tileset(Tileset),
	Content(TileContent),
}

/// Parses a fetched buffer as either a tileset document or tile content.
///
/// Whether the buffer is a tileset is decided by `options.is_tileset` when
/// set, otherwise by checking the URL for a `.json` extension; everything
/// else defaults to tile content.
pub fn parse(data: &Blob, url: &str, options: &ParseOptions) -> Result<ParsedTiles3d> {
	let is_tileset = options.is_tileset.unwrap_or_else(|| url.contains(".json"));

	if is_tileset {
		Ok(ParsedTiles3d::Tileset(parse_tileset(data.as_str()?, url)?))
	} else {
		Ok(ParsedTiles3d::Content(parse_tile_content(data, url)?))
	}
}
