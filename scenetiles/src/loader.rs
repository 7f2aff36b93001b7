//! Loader selection and one-call tileset/content loading.

use anyhow::Result;
use log::debug;

use scenetiles_core::io::DataFetcher;
use scenetiles_core::{LoaderDescriptor, TileContent, TileError, TileHeader, Tileset, TilesetSource};
use scenetiles_i3s::I3S_LOADER;
use scenetiles_tiles3d::TILES3D_LOADER;

/// Picks the loader responsible for a URL.
///
/// I3S endpoint patterns win over file extensions, since I3S resources
/// usually carry no extension at all; everything else falls to the 3D Tiles
/// loader, matching its own default-to-content behavior.
#[must_use]
pub fn select_loader(url: &str) -> &'static LoaderDescriptor {
	if scenetiles_i3s::is_tileset_url(url) || scenetiles_i3s::is_tile_header_url(url) {
		return &I3S_LOADER;
	}
	let extension = url.rsplit('.').next().unwrap_or_default();
	if !TILES3D_LOADER.supports_extension(extension) && I3S_LOADER.supports_extension(extension) {
		return &I3S_LOADER;
	}
	&TILES3D_LOADER
}

/// Fetches and parses a tileset of either source format.
pub async fn load_tileset(url: &str, fetcher: &DataFetcher) -> Result<Tileset> {
	debug!("loading tileset '{url}' via {} fetcher", fetcher.name());
	let blob = fetcher.fetch(url).await?;

	if scenetiles_i3s::is_tileset_url(url) {
		scenetiles_i3s::parse_tileset(blob.as_str()?, url, fetcher).await
	} else {
		scenetiles_tiles3d::parse_tileset(blob.as_str()?, url)
	}
}

/// Fetches and parses the content of one tile header, dispatching on the
/// tileset's source format.
pub async fn load_tile_content(header: &TileHeader, source: TilesetSource, fetcher: &DataFetcher) -> Result<TileContent> {
	match source {
		TilesetSource::I3s => scenetiles_i3s::parse_tile_content(header, fetcher).await,
		TilesetSource::Tiles3d => {
			let url = header
				.content_url
				.as_deref()
				.ok_or_else(|| TileError::Format("tile declares no content".to_string()))?;
			let blob = fetcher.fetch(url).await?;
			scenetiles_tiles3d::parse_tile_content(&blob, url)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_select_loader_prefers_i3s_endpoints() {
		assert_eq!(select_loader("http://x/SceneServer/layers/0").id, "i3s tiles");
		assert_eq!(select_loader("http://x/SceneServer/layers/0/nodes/1-4").id, "i3s tiles");
	}

	#[test]
	fn test_select_loader_by_extension() {
		assert_eq!(select_loader("http://x/tileset.json").id, "3d-tiles");
		assert_eq!(select_loader("http://x/tile.b3dm").id, "3d-tiles");
		assert_eq!(select_loader("http://x/nodes/1/geometries/0.bin").id, "i3s tiles");
	}

	#[test]
	fn test_select_loader_defaults_to_tiles3d() {
		assert_eq!(select_loader("http://x/opaque-content").id, "3d-tiles");
	}
}
