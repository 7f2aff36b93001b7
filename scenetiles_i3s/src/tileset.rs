//! Turning an I3S scene layer into a normalized tileset.

use anyhow::{Context, Result};
use log::debug;

use scenetiles_core::io::DataFetcher;
use scenetiles_core::{TileError, Tileset, TilesetSource};

use crate::node::parse_node;
use crate::schema::LayerDocument;

/// Parses a scene layer document and fetches its root node to build a
/// normalized tileset.
///
/// Unlike 3D Tiles, an I3S layer document carries no tile tree of its own;
/// every node is a separate REST resource. Only the root node at
/// `{url}/nodes/root` is loaded eagerly, its children stay behind their own
/// URLs until the traversal engine asks for them.
pub async fn parse_tileset(text: &str, url: &str, fetcher: &DataFetcher) -> Result<Tileset> {
	let layer: LayerDocument =
		serde_json::from_str(text).map_err(|e| TileError::Format(format!("invalid layer document: {e}")))?;
	debug!(
		"parsing I3S layer '{}' at {url}",
		layer.name.as_deref().unwrap_or("<unnamed>")
	);

	let root_url = format!("{url}/nodes/root");
	let root_blob = fetcher
		.fetch(&root_url)
		.await
		.with_context(|| format!("Failed to fetch root node '{root_url}'"))?;
	let root = parse_node(root_blob.as_str()?, &root_url)?;

	Ok(Tileset::from_root(root, url.to_string(), TilesetSource::I3s))
}

#[cfg(test)]
mod tests {
	use super::*;
	use scenetiles_core::io::DataFetcherMock;
	use scenetiles_core::{Blob, LodMetricType};

	const LAYER_JSON: &str = r#"{"id": 0, "name": "Buildings", "layerType": "3DObject"}"#;
	const ROOT_JSON: &str = r#"{
		"id": "root",
		"mbs": [8.5, 47.4, 0.0, 4000.0],
		"lodSelection": [{"metricType": "maxScreenThreshold", "maxError": 96}]
	}"#;

	#[tokio::test]
	async fn test_loads_root_node_eagerly() -> Result<()> {
		let url = "http://x/SceneServer/layers/0";
		let fetcher: DataFetcher =
			Box::new(DataFetcherMock::new().with("http://x/SceneServer/layers/0/nodes/root", Blob::from(ROOT_JSON)));

		let tileset = parse_tileset(LAYER_JSON, url, &fetcher).await?;
		assert_eq!(tileset.source, TilesetSource::I3s);
		assert_eq!(tileset.base_path, url);
		assert_eq!(tileset.root.id.as_deref(), Some("root"));
		assert_eq!(tileset.lod_metric_type, LodMetricType::MaxScreenThreshold);
		assert_eq!(tileset.lod_metric_value, 96.0);
		Ok(())
	}

	#[tokio::test]
	async fn test_unreachable_root_node_fails() {
		let fetcher: DataFetcher = Box::new(DataFetcherMock::new());
		let result = parse_tileset(LAYER_JSON, "http://x/layers/0", &fetcher).await;
		assert!(result.unwrap_err().to_string().contains("root node"));
	}

	#[tokio::test]
	async fn test_invalid_layer_document_is_format_error() {
		let fetcher: DataFetcher = Box::new(DataFetcherMock::new());
		let error = parse_tileset("not json", "http://x/layers/0", &fetcher).await.unwrap_err();
		assert!(matches!(error.downcast_ref::<TileError>(), Some(TileError::Format(_))));
	}
}
