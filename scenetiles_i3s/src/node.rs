//! Normalization of I3S node documents into the shared tile header schema.

use anyhow::Result;
use glam::DVec3;
use log::warn;

use scenetiles_core::geodetic::Ellipsoid;
use scenetiles_core::{BoundingVolume, LodMetricType, Refine, TileError, TileHeader, TileType};

use crate::schema::{NodeDocument, NodeRefJson};

/// Parses one node document fetched from `url` into a normalized tile header.
///
/// The node's resource hrefs are resolved against the node URL itself; the
/// minimum bounding sphere (`mbs`) is converted into a Cartesian sphere via
/// the WGS84 ellipsoid, and its cartographic center is kept as the geometry
/// normalization anchor. I3S supports only replacement refinement here, and
/// every node is a simple mesh. Declared children become lazy stub headers
/// carrying only their id and resolved node URL, so the traversal engine can
/// fetch and expand them on first reference.
pub fn parse_node(text: &str, url: &str) -> Result<TileHeader> {
	let node: NodeDocument =
		serde_json::from_str(text).map_err(|e| TileError::Format(format!("invalid node document: {e}")))?;
	normalize_node(node, url)
}

fn normalize_node(node: NodeDocument, url: &str) -> Result<TileHeader> {
	let feature_url = first_href(node.feature_data.as_deref()).map(|href| resolve_href(url, href));
	let content_url = first_href(node.geometry_data.as_deref()).map(|href| resolve_href(url, href));
	let texture_url = first_href(node.texture_data.as_deref()).map(|href| resolve_href(url, href));

	if node.mbs.len() != 4 {
		return Err(TileError::Format(format!("node 'mbs' must have 4 values, got {}", node.mbs.len())).into());
	}
	let cartographic_center = DVec3::new(node.mbs[0], node.mbs[1], node.mbs[2]);
	let center_cartesian = Ellipsoid::WGS84.cartographic_to_cartesian(cartographic_center);
	let bounding_volume = BoundingVolume::sphere(center_cartesian, node.mbs[3]);

	let lod = node
		.lod_selection
		.first()
		.ok_or_else(|| TileError::Format("node has no lodSelection entries".to_string()))?;

	let transform = node.transform.and_then(|values| {
		if values.len() == 16 {
			let mut array = [0.0; 16];
			array.copy_from_slice(&values);
			Some(glam::DMat4::from_cols_array(&array))
		} else {
			warn!("node transform must have 16 values, got {}", values.len());
			None
		}
	});

	let children = node
		.children
		.unwrap_or_default()
		.iter()
		.map(|child| child_stub(url, child))
		.collect();

	Ok(TileHeader {
		id: Some(node_path(url).to_string()),
		bounding_volume: Some(bounding_volume),
		cartographic_center: Some(cartographic_center),
		refine: Some(Refine::Replace),
		lod_metric_type: LodMetricType::from_declared(&lod.metric_type),
		lod_metric_value: lod.max_error,
		tile_type: TileType::SimpleMesh,
		transform,
		content_url,
		feature_url,
		texture_url,
		node_url: Some(url.to_string()),
		children,
		content: None,
	})
}

/// Builds a lazy stub header for a declared child node: only its id and the
/// node URL it will be parsed from.
fn child_stub(node_url: &str, child: &NodeRefJson) -> TileHeader {
	let url = match child.href.as_deref() {
		Some(href) => resolve_href(node_url, href),
		// Without an href, siblings live next to each other under `nodes/`.
		None => match node_url.rsplit_once('/') {
			Some((dir, _)) => format!("{dir}/{}", child.id),
			None => child.id.clone(),
		},
	};

	TileHeader {
		id: Some(child.id.clone()),
		node_url: Some(url),
		..TileHeader::default()
	}
}

fn first_href<'a>(resources: Option<&'a [crate::schema::ResourceRefJson]>) -> Option<&'a str> {
	resources.and_then(|r| r.first()).map(|r| r.href.as_str())
}

/// Resolves a node-relative href like `./geometries/0` or `../1-4-0` against
/// the node URL.
fn resolve_href(node_url: &str, href: &str) -> String {
	let mut base: Vec<&str> = node_url.split('/').collect();
	let mut rest = href;
	loop {
		if let Some(stripped) = rest.strip_prefix("./") {
			rest = stripped;
		} else if let Some(stripped) = rest.strip_prefix("../") {
			rest = stripped;
			base.pop();
		} else {
			break;
		}
	}
	format!("{}/{rest}", base.join("/"))
}

/// Extracts the node path (e.g. `root` or `1-4-2`) from a node URL, the
/// deterministic tile identity within its tileset.
#[must_use]
pub fn node_path(url: &str) -> &str {
	url.rsplit('/').next().unwrap_or(url)
}
