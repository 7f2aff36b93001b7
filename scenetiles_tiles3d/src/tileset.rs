//! Normalization of 3D Tiles tileset documents into tile header trees.
//!
//! The whole tree is normalized in one pass. Tilesets can nest arbitrarily
//! deep, so traversal runs over an explicit stack of pending nodes, never the
//! call stack; every node is visited exactly once (sibling order is
//! unspecified).

use anyhow::{Result, bail};
use log::{debug, warn};
use serde_json::Value;

use scenetiles_core::{LodMetricType, Refine, TileError, TileHeader, TileType, Tileset, TilesetSource};

use crate::schema::{TileJson, TilesetDocument};

/// Parses a fetched tileset document into a normalized [`Tileset`].
///
/// `url` is the tileset's own URL; relative content URIs are resolved against
/// its directory.
pub fn parse_tileset(text: &str, url: &str) -> Result<Tileset> {
	let document: TilesetDocument =
		serde_json::from_str(text).map_err(|e| TileError::Format(format!("invalid tileset document: {e}")))?;

	let base_path = base_uri(url);
	let root = normalize_tile_headers(document.root, &base_path)?;
	debug!("normalized tileset '{url}' with root lod metric {}", root.lod_metric_value);

	Ok(Tileset::from_root(root, base_path, TilesetSource::Tiles3d))
}

/// Returns the directory part of a tileset URL, the base path non-absolute
/// content URIs are relative to.
#[must_use]
pub fn base_uri(url: &str) -> String {
	match url.rsplit_once('/') {
		Some((dir, _)) => dir.to_string(),
		None => String::new(),
	}
}

/// Normalizes the root node and all descendants with an explicit work list.
fn normalize_tile_headers(root: Value, base_path: &str) -> Result<TileHeader> {
	// Arena of finished headers; children always land at larger indices than
	// their parents, so popping from the back reattaches every child before
	// its parent comes up, and the last pop yields the root.
	let mut nodes: Vec<(TileHeader, usize)> = Vec::new();
	let mut stack: Vec<(Value, usize, Option<Refine>)> = vec![(root, 0, None)];

	while let Some((mut value, parent, inherited_refine)) = stack.pop() {
		let children = value.as_object_mut().and_then(|object| object.remove("children"));

		let tile: TileJson =
			serde_json::from_value(value).map_err(|e| TileError::Format(format!("invalid tile header: {e}")))?;
		let mut header = normalize_tile(tile, base_path);
		if header.refine.is_none() {
			header.refine = inherited_refine;
		}
		let refine = header.refine.clone();

		let index = nodes.len();
		nodes.push((header, parent));

		if let Some(Value::Array(children)) = children {
			for child in children {
				stack.push((child, index, refine.clone()));
			}
		}
	}

	loop {
		let Some((header, parent)) = nodes.pop() else {
			bail!("tileset document has no tile nodes");
		};
		if nodes.is_empty() {
			return Ok(header);
		}
		nodes[parent].0.children.push(header);
	}
}

/// Normalizes one tile node into the shared tile header schema.
fn normalize_tile(tile: TileJson, base_path: &str) -> TileHeader {
	let content_url = tile
		.content
		.and_then(crate::schema::ContentJson::into_uri)
		.map(|uri| format!("{base_path}/{uri}"));

	let transform = tile.transform.and_then(|values| {
		if values.len() == 16 {
			let mut array = [0.0; 16];
			array.copy_from_slice(&values);
			Some(glam::DMat4::from_cols_array(&array))
		} else {
			warn!("tile transform must have 16 values, got {}", values.len());
			None
		}
	});

	TileHeader {
		id: content_url.clone(),
		bounding_volume: tile.bounding_volume.and_then(super::schema::BoundingVolumeJson::into_volume),
		cartographic_center: None,
		refine: tile.refine.map(|r| Refine::from_declared(&r)),
		lod_metric_type: LodMetricType::GeometricError,
		lod_metric_value: tile.geometric_error.unwrap_or(0.0),
		tile_type: tile_type_from_url(content_url.as_deref()),
		transform,
		content_url,
		feature_url: None,
		texture_url: None,
		node_url: None,
		children: Vec::new(),
		content: None,
	}
}

/// Classifies a tile by its content URL's file extension.
///
/// No content means an empty tile. An unrecognized extension is passed
/// through as the tile type instead of failing the parse; downstream
/// consumers see the raw string.
#[must_use]
pub fn tile_type_from_url(content_url: Option<&str>) -> TileType {
	let Some(content_url) = content_url else {
		return TileType::Empty;
	};

	let extension = content_url.rsplit('.').next().unwrap_or(content_url);
	match extension {
		"pnts" => TileType::PointCloud,
		"i3dm" | "b3dm" => TileType::Scenegraph,
		other => {
			warn!("unrecognized content extension '{other}', passing it through as tile type");
			TileType::Other(other.to_string())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SIMPLE_TILESET: &str = r#"{
		"asset": {"version": "1.0"},
		"geometricError": 100,
		"root": {
			"geometricError": 100,
			"refine": "REPLACE",
			"boundingVolume": {"sphere": [0, 0, 0, 1000]},
			"children": [
				{"geometricError": 10, "content": {"uri": "a.b3dm"}}
			]
		}
	}"#;

	#[test]
	fn test_normalizes_root_and_children() -> Result<()> {
		let tileset = parse_tileset(SIMPLE_TILESET, "http://x/y/tileset.json")?;

		assert_eq!(tileset.base_path, "http://x/y");
		assert_eq!(tileset.source, TilesetSource::Tiles3d);
		assert_eq!(tileset.lod_metric_value, 100.0);
		assert_eq!(tileset.lod_metric_type, LodMetricType::GeometricError);

		let root = &tileset.root;
		assert_eq!(root.lod_metric_value, 100.0);
		assert_eq!(root.refine, Some(Refine::Replace));
		assert_eq!(root.tile_type, TileType::Empty);
		assert_eq!(root.children.len(), 1);

		let child = &root.children[0];
		assert_eq!(child.id.as_deref(), Some("http://x/y/a.b3dm"));
		assert_eq!(child.content_url.as_deref(), Some("http://x/y/a.b3dm"));
		assert_eq!(child.tile_type, TileType::Scenegraph);
		assert_eq!(child.lod_metric_value, 10.0);
		// Refinement is inherited from the parent when not declared.
		assert_eq!(child.refine, Some(Refine::Replace));
		Ok(())
	}

	#[test]
	fn test_deep_tree_is_traversed_without_recursion() -> Result<()> {
		// A 50-level chain; each level declares one child.
		let mut json = String::new();
		let depth = 50;
		for level in 0..depth {
			json.push_str(&format!(r#"{{"geometricError": {level}, "children": ["#));
		}
		json.push_str(r#"{"geometricError": 0, "content": {"uri": "leaf.pnts"}}"#);
		for _ in 0..depth {
			json.push_str("]}");
		}
		let document = format!(r#"{{"root": {json}}}"#);

		let tileset = parse_tileset(&document, "http://x/tileset.json")?;
		let mut tile = &tileset.root;
		let mut visited = 1;
		while let Some(child) = tile.children.first() {
			tile = child;
			visited += 1;
		}
		assert_eq!(visited, depth + 1);
		assert_eq!(tile.tile_type, TileType::PointCloud);
		Ok(())
	}

	#[test]
	fn test_every_node_visited_exactly_once() -> Result<()> {
		let document = r#"{"root": {
			"geometricError": 8,
			"children": [
				{"geometricError": 4, "children": [
					{"geometricError": 2, "content": {"uri": "a.pnts"}},
					{"geometricError": 2, "content": {"uri": "b.pnts"}}
				]},
				{"geometricError": 4, "content": {"uri": "c.b3dm"}}
			]
		}}"#;

		let tileset = parse_tileset(document, "http://x/tileset.json")?;
		let mut count = 0;
		let mut stack = vec![&tileset.root];
		while let Some(tile) = stack.pop() {
			count += 1;
			stack.extend(tile.children.iter());
		}
		assert_eq!(count, 5);
		Ok(())
	}

	#[test]
	fn test_unrecognized_extension_passes_through() {
		assert_eq!(
			tile_type_from_url(Some("http://x/a.vctr")),
			TileType::Other("vctr".to_string())
		);
		assert_eq!(tile_type_from_url(Some("noextension")), TileType::Other("noextension".to_string()));
		assert_eq!(tile_type_from_url(None), TileType::Empty);
	}

	#[test]
	fn test_invalid_json_is_format_error() {
		let error = parse_tileset("not json", "http://x/tileset.json").unwrap_err();
		assert!(matches!(error.downcast_ref::<TileError>(), Some(TileError::Format(_))));
	}

	#[test]
	fn test_missing_root_is_format_error() {
		let error = parse_tileset(r#"{"asset": {}}"#, "http://x/tileset.json").unwrap_err();
		assert!(matches!(error.downcast_ref::<TileError>(), Some(TileError::Format(_))));
	}

	#[test]
	fn test_transform_is_carried_over() -> Result<()> {
		let document = r#"{"root": {
			"geometricError": 1,
			"transform": [1,0,0,0, 0,1,0,0, 0,0,1,0, 10,20,30,1]
		}}"#;
		let tileset = parse_tileset(document, "http://x/tileset.json")?;
		let transform = tileset.root.transform.unwrap();
		assert_eq!(transform.w_axis.truncate(), glam::DVec3::new(10.0, 20.0, 30.0));
		Ok(())
	}
}
