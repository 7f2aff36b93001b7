//! Serde schema of I3S layer, node and feature documents.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use scenetiles_core::attributes::AttributeSchema;

/// The scene layer document behind a `.../layers/<n>` endpoint.
///
/// Only the identifying fields matter here; the tile tree itself hangs off
/// the separately fetched node documents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDocument {
	#[serde(default)]
	pub id: Option<Value>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub layer_type: Option<String>,
}

/// One node document behind a `.../nodes/<path>` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDocument {
	#[serde(default)]
	pub id: Option<String>,
	/// Minimum bounding sphere: longitude (deg), latitude (deg), height (m),
	/// radius (m).
	pub mbs: Vec<f64>,
	pub lod_selection: Vec<LodSelectionJson>,
	#[serde(default)]
	pub feature_data: Option<Vec<ResourceRefJson>>,
	#[serde(default)]
	pub geometry_data: Option<Vec<ResourceRefJson>>,
	#[serde(default)]
	pub texture_data: Option<Vec<ResourceRefJson>>,
	#[serde(default)]
	pub transform: Option<Vec<f64>>,
	#[serde(default)]
	pub children: Option<Vec<NodeRefJson>>,
}

/// One LOD selection entry; the first one drives tile selection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LodSelectionJson {
	pub metric_type: String,
	#[serde(default)]
	pub max_error: f64,
}

/// A relative reference to a node resource (feature / geometry / texture).
#[derive(Debug, Deserialize)]
pub struct ResourceRefJson {
	pub href: String,
}

/// A reference to a child node, left as a lazy stub until first use.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRefJson {
	pub id: String,
	#[serde(default)]
	pub href: Option<String>,
}

/// The feature document fetched alongside a node's geometry buffer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDocument {
	pub geometry_data: Vec<FeatureGeometryJson>,
}

/// Geometry metadata inside a feature document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGeometryJson {
	pub params: GeometryParamsJson,
	/// Column-major 4×4 transform of the geometry, identity if absent.
	#[serde(default)]
	pub transformation: Option<Vec<f64>>,
}

/// Vertex attribute layout of one geometry buffer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryParamsJson {
	pub vertex_attributes: HashMap<String, AttributeSchema>,
}
