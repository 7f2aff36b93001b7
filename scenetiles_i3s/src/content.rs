//! Fetching and normalizing one I3S node's renderable content.

use anyhow::{Context, Result, ensure};
use glam::DMat4;
use log::{debug, warn};

use scenetiles_core::attributes::decode_attributes;
use scenetiles_core::io::DataFetcher;
use scenetiles_core::normalize::normalize_positions;
use scenetiles_core::{Blob, TileContent, TileError, TileHeader, VertexAttributes};

use crate::schema::FeatureDocument;

/// Fetches a node's feature document and geometry buffer and normalizes them
/// into renderer-ready content.
///
/// The feature document and the geometry buffer are independent resources and
/// are fetched concurrently; the optional texture rides along in the same
/// round. Positions come out as f64 globe-centered Cartesians with the
/// matching local-frame matrix, all other attributes keep their decoded
/// scalar types.
pub async fn parse_tile_content(header: &TileHeader, fetcher: &DataFetcher) -> Result<TileContent> {
	let feature_url = header
		.feature_url
		.as_deref()
		.ok_or_else(|| TileError::Format("node has no feature data resource".to_string()))?;
	let content_url = header
		.content_url
		.as_deref()
		.ok_or_else(|| TileError::Format("node has no geometry resource".to_string()))?;
	let center = header
		.cartographic_center
		.ok_or_else(|| TileError::Format("node has no cartographic center".to_string()))?;

	let (feature_blob, geometry_blob, texture) = futures::try_join!(
		fetcher.fetch(feature_url),
		fetcher.fetch(content_url),
		fetch_optional(fetcher, header.texture_url.as_deref()),
	)
	.with_context(|| format!("Failed to fetch content of tile '{}'", header.id.as_deref().unwrap_or("?")))?;

	let feature_json: serde_json::Value = serde_json::from_str(feature_blob.as_str()?)
		.map_err(|e| TileError::Format(format!("invalid feature document: {e}")))?;
	let feature: FeatureDocument = serde_json::from_value(feature_json.clone())
		.map_err(|e| TileError::Format(format!("invalid feature document: {e}")))?;
	let geometry = feature
		.geometry_data
		.first()
		.ok_or_else(|| TileError::Format("feature document has no geometryData entries".to_string()))?;

	let decoded = decode_attributes(geometry_blob.as_slice(), &geometry.params.vertex_attributes)?;
	debug!(
		"decoded {} attributes, {} vertices from '{content_url}'",
		decoded.attributes.len(),
		decoded.vertex_count
	);

	let transform = geometry
		.transformation
		.as_deref()
		.and_then(|values| {
			if values.len() == 16 {
				let mut array = [0.0; 16];
				array.copy_from_slice(values);
				Some(DMat4::from_cols_array(&array))
			} else {
				warn!("geometry transformation must have 16 values, got {}", values.len());
				None
			}
		})
		.unwrap_or(DMat4::IDENTITY);

	let mut attributes = VertexAttributes::default();
	let mut model_matrix = None;
	let mut cartographic_origin = None;
	let mut cartesian_origin = None;

	if let Some(position) = decoded.attributes.get("position") {
		let offsets = position
			.data
			.as_f32()
			.ok_or_else(|| TileError::Schema("position attribute must be Float32".to_string()))?;
		ensure!(
			offsets.len() % 3 == 0,
			TileError::Schema(format!("position scalar count {} is not a multiple of 3", offsets.len()))
		);

		let normalized = normalize_positions(offsets, center, &transform);
		attributes.positions = Some(normalized.positions);
		model_matrix = Some(normalized.model_matrix);
		cartographic_origin = Some(normalized.cartographic_origin);
		cartesian_origin = Some(normalized.cartesian_origin);
	}
	if let Some(normal) = decoded.attributes.get("normal") {
		attributes.normals = normal.data.as_f32().map(<[f32]>::to_vec);
	}
	if let Some(color) = decoded.attributes.get("color") {
		attributes.colors = color.data.as_u8().map(<[u8]>::to_vec);
	}
	if let Some(uv) = decoded.attributes.get("uv0") {
		attributes.tex_coords = uv.data.as_f32().map(<[f32]>::to_vec);
	}

	Ok(TileContent {
		vertex_count: decoded.vertex_count,
		attributes,
		model_matrix,
		cartographic_origin,
		cartesian_origin,
		feature_data: Some(feature_json),
		texture,
		payload: None,
		byte_length: geometry_blob.len(),
	})
}

async fn fetch_optional(fetcher: &DataFetcher, url: Option<&str>) -> Result<Option<Blob>> {
	match url {
		Some(url) => Ok(Some(fetcher.fetch(url).await?)),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use byteorder::{LittleEndian, WriteBytesExt};
	use glam::DVec3;
	use scenetiles_core::io::DataFetcherMock;
	use scenetiles_core::{LodMetricType, Refine, TileType};

	const FEATURE_JSON: &str = r#"{
		"geometryData": [{
			"params": {
				"vertexAttributes": {
					"position": {"byteOffset": 0, "count": 9, "valueType": "Float32", "valuesPerElement": 3},
					"normal": {"byteOffset": 36, "count": 9, "valueType": "Float32", "valuesPerElement": 3},
					"color": {"byteOffset": 72, "count": 12, "valueType": "UInt8", "valuesPerElement": 4}
				}
			}
		}]
	}"#;

	fn geometry_buffer() -> Vec<u8> {
		let mut buffer = Vec::new();
		// Three lon/lat/height offsets around the anchor.
		for v in [0.0f32, 0.0, 5.0, 0.001, 0.0, 8.0, 0.0, 0.001, 2.0] {
			buffer.write_f32::<LittleEndian>(v).unwrap();
		}
		// Unit normals pointing up.
		for v in [0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0] {
			buffer.write_f32::<LittleEndian>(v).unwrap();
		}
		// Three RGBA colors.
		buffer.extend_from_slice(&[255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255]);
		buffer
	}

	fn header() -> TileHeader {
		TileHeader {
			id: Some("root".to_string()),
			cartographic_center: Some(DVec3::new(13.4, 52.5, 0.0)),
			refine: Some(Refine::Replace),
			lod_metric_type: LodMetricType::MaxScreenThreshold,
			lod_metric_value: 34.5,
			tile_type: TileType::SimpleMesh,
			feature_url: Some("http://x/nodes/root/features/0".to_string()),
			content_url: Some("http://x/nodes/root/geometries/0".to_string()),
			..TileHeader::default()
		}
	}

	fn fetcher() -> DataFetcher {
		Box::new(
			DataFetcherMock::new()
				.with("http://x/nodes/root/features/0", Blob::from(FEATURE_JSON))
				.with("http://x/nodes/root/geometries/0", Blob::from(geometry_buffer()))
				.with("http://x/nodes/root/textures/0_0", Blob::from(&[0xFFu8, 0xD8])),
		)
	}

	#[tokio::test]
	async fn test_parses_and_normalizes_content() -> Result<()> {
		let content = parse_tile_content(&header(), &fetcher()).await?;

		assert_eq!(content.vertex_count, 3);
		assert_eq!(content.byte_length, geometry_buffer().len());

		let positions = content.attributes.positions.as_deref().unwrap();
		assert_eq!(positions.len(), 9);
		for triple in positions.chunks_exact(3) {
			let length = DVec3::new(triple[0], triple[1], triple[2]).length();
			assert!((6.3e6..6.5e6).contains(&length));
		}

		assert_eq!(content.attributes.normals.as_deref().unwrap().len(), 9);
		assert_eq!(content.attributes.colors.as_deref().unwrap().len(), 12);
		assert!(content.attributes.tex_coords.is_none());
		assert_eq!(content.cartographic_origin, Some(DVec3::new(13.4, 52.5, -2.0)));
		assert!(content.model_matrix.is_some());
		assert!(content.feature_data.is_some());
		assert!(content.texture.is_none());
		Ok(())
	}

	#[tokio::test]
	async fn test_fetches_texture_when_declared() -> Result<()> {
		let mut header = header();
		header.texture_url = Some("http://x/nodes/root/textures/0_0".to_string());

		let content = parse_tile_content(&header, &fetcher()).await?;
		assert_eq!(content.texture.unwrap().as_slice(), &[0xFF, 0xD8]);
		Ok(())
	}

	#[tokio::test]
	async fn test_header_without_resources_is_format_error() {
		let mut header = header();
		header.feature_url = None;

		let error = parse_tile_content(&header, &fetcher()).await.unwrap_err();
		assert!(matches!(error.downcast_ref::<TileError>(), Some(TileError::Format(_))));
	}

	#[tokio::test]
	async fn test_fetch_failure_propagates() {
		let fetcher: DataFetcher = Box::new(DataFetcherMock::new());
		let result = parse_tile_content(&header(), &fetcher).await;
		assert!(result.unwrap_err().to_string().contains("tile 'root'"));
	}
}
