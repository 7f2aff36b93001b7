//! # scenetiles_i3s
//!
//! Loader for Esri I3S scene layers. I3S exposes tilesets, tile headers and
//! tile content as three distinct REST-like endpoints, so parsing is driven
//! by URL-pattern matching: a layer URL produces a [`Tileset`] with an
//! eagerly loaded root node, a node URL produces a single normalized
//! [`TileHeader`] stub, and everything else is treated as tile content parsed
//! against a previously loaded header.
//!
//! ## Usage Example
//!
//! ```rust
//! use scenetiles_i3s::{is_tile_header_url, is_tileset_url};
//!
//! assert!(is_tileset_url("http://x/SceneServer/layers/0"));
//! assert!(is_tile_header_url("http://x/SceneServer/layers/0/nodes/1-4-2"));
//! ```

mod content;
mod node;
pub mod schema;
mod tileset;

pub use content::parse_tile_content;
pub use node::{node_path, parse_node};
pub use tileset::parse_tileset;

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

use scenetiles_core::io::DataFetcher;
use scenetiles_core::{Blob, LoaderDescriptor, ParseOptions, TileContent, TileError, TileHeader, Tileset};

/// Self-description of the I3S loader.
pub const I3S_LOADER: LoaderDescriptor = LoaderDescriptor {
	id: "i3s tiles",
	name: "I3S 3D Tiles",
	version: env!("CARGO_PKG_VERSION"),
	extensions: &["json", "bin"],
	mime_type: "application/octet-stream",
};

static TILESET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"layers/\d+$").unwrap());
static TILE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"nodes/(\d+(-\d+)*|root)$").unwrap());

/// Returns `true` if `url` is a scene layer (tileset) endpoint.
#[must_use]
pub fn is_tileset_url(url: &str) -> bool {
	TILESET_REGEX.is_match(url)
}

/// Returns `true` if `url` is a node (tile header) endpoint.
#[must_use]
pub fn is_tile_header_url(url: &str) -> bool {
	TILE_HEADER_REGEX.is_match(url)
}

/// Result of one I3S parse call.
#[derive(Debug)]
pub enum ParsedI3s {
	Tileset(Tileset),
	TileHeader(TileHeader),
	Content(TileContent),
}

/// Parses a fetched buffer according to what its URL identifies.
///
/// Explicit `options` flags override the URL patterns. A URL matching none of
/// the endpoint patterns falls through to tile content, which needs `tile` as
/// context for its resource URLs and normalization anchor.
///
/// With `options.load_content` set, a parsed tile header that declares
/// geometry gets its content fetched and attached in the same call.
pub async fn parse(
	data: &Blob,
	url: &str,
	options: &ParseOptions,
	fetcher: &DataFetcher,
	tile: Option<&TileHeader>,
) -> Result<ParsedI3s> {
	let is_tileset = options.is_tileset.unwrap_or_else(|| is_tileset_url(url));
	let is_tile_header = options.is_tile_header.unwrap_or_else(|| is_tile_header_url(url));

	if is_tileset {
		return Ok(ParsedI3s::Tileset(parse_tileset(data.as_str()?, url, fetcher).await?));
	}

	if is_tile_header {
		let mut header = parse_node(data.as_str()?, url)?;
		if options.load_content && !header.is_empty() {
			let content = parse_tile_content(&header, fetcher).await?;
			header.attach_content(content);
		}
		return Ok(ParsedI3s::TileHeader(header));
	}

	let tile =
		tile.ok_or_else(|| TileError::Format(format!("tile content '{url}' requires a tile header as context")))?;
	Ok(ParsedI3s::Content(parse_tile_content(tile, fetcher).await?))
}
