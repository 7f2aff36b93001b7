//! Binary tile content parsing for the `pnts` / `b3dm` / `i3dm` / `cmpt`
//! buffer family.
//!
//! This layer only validates the common header and computes the byte offset
//! of the embedded payload; the payload itself (a glTF scenegraph or a point
//! cloud feature table) is handed to the external model parser untouched.
//! Parsers are selected through a lookup table keyed by the format tag, so a
//! new content kind is added by extending the table, not by subclassing.

use anyhow::{Result, ensure};
use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;
use std::io::Cursor;

use scenetiles_core::{Blob, TileContent, TileError};

/// A content parser turns a raw buffer into validated tile content.
type ContentParser = fn(&Blob) -> Result<TileContent>;

/// Lookup table from format tag (file extension and magic) to parser.
const CONTENT_PARSERS: &[(&str, ContentParser)] = &[
	("pnts", parse_pnts),
	("b3dm", parse_b3dm),
	("i3dm", parse_i3dm),
	("cmpt", parse_cmpt),
];

/// Parses a fetched tile content buffer.
///
/// The parser is chosen by the URL's file extension; when the extension is
/// unknown, the buffer's 4-byte magic decides. An unknown magic is a
/// [`TileError::Format`].
pub fn parse_tile_content(data: &Blob, url: &str) -> Result<TileContent> {
	let extension = url.rsplit('.').next().unwrap_or("");

	let by_extension = CONTENT_PARSERS.iter().find(|(tag, _)| *tag == extension);
	if let Some((_, parser)) = by_extension {
		return parser(data);
	}

	let magic = read_magic(data)?;
	let by_magic = CONTENT_PARSERS.iter().find(|(tag, _)| *tag == magic);
	match by_magic {
		Some((tag, parser)) => {
			debug!("content '{url}' detected as '{tag}' by magic");
			parser(data)
		}
		None => Err(TileError::Format(format!("unrecognized tile content magic '{magic}' at '{url}'")).into()),
	}
}

fn read_magic(data: &Blob) -> Result<String> {
	ensure!(
		data.len() >= 4,
		TileError::Format(format!("tile content too short for a magic: {} bytes", data.len()))
	);
	Ok(String::from_utf8_lossy(&data.as_slice()[0..4]).to_string())
}

/// The 12-byte header every format in the family starts with.
struct CommonHeader {
	byte_length: usize,
}

fn read_common_header(cursor: &mut Cursor<&[u8]>, data: &Blob, expected_magic: &[u8; 4]) -> Result<CommonHeader> {
	ensure!(
		data.len() >= 12,
		TileError::Format(format!("tile content too short for a header: {} bytes", data.len()))
	);

	let mut magic = [0u8; 4];
	std::io::Read::read_exact(cursor, &mut magic)?;
	ensure!(
		&magic == expected_magic,
		TileError::Format(format!(
			"expected magic {:?}, got {:?}",
			String::from_utf8_lossy(expected_magic),
			String::from_utf8_lossy(&magic)
		))
	);

	let version = cursor.read_u32::<LittleEndian>()?;
	ensure!(
		version == 1,
		TileError::Format(format!("unsupported tile content version {version}"))
	);

	let byte_length = cursor.read_u32::<LittleEndian>()? as usize;
	ensure!(
		byte_length == data.len(),
		TileError::Format(format!(
			"declared byte length {byte_length} does not match buffer length {}",
			data.len()
		))
	);

	Ok(CommonHeader { byte_length })
}

/// Reads the four feature/batch table lengths following the common header.
fn read_table_lengths(cursor: &mut Cursor<&[u8]>) -> Result<usize> {
	let feature_table_json = cursor.read_u32::<LittleEndian>()? as usize;
	let feature_table_binary = cursor.read_u32::<LittleEndian>()? as usize;
	let batch_table_json = cursor.read_u32::<LittleEndian>()? as usize;
	let batch_table_binary = cursor.read_u32::<LittleEndian>()? as usize;
	Ok(feature_table_json + feature_table_binary + batch_table_json + batch_table_binary)
}

fn payload_from(data: &Blob, offset: usize) -> Result<Blob> {
	ensure!(
		offset <= data.len(),
		TileError::Format(format!(
			"payload offset {offset} exceeds buffer length {}",
			data.len()
		))
	);
	Ok(Blob::from(&data.as_slice()[offset..]))
}

/// Point cloud content: the feature table (offset 28) is the payload.
fn parse_pnts(data: &Blob) -> Result<TileContent> {
	let mut cursor = Cursor::new(data.as_slice());
	let header = read_common_header(&mut cursor, data, b"pnts")?;

	Ok(TileContent {
		payload: Some(payload_from(data, 28)?),
		byte_length: header.byte_length,
		..TileContent::default()
	})
}

/// Batched model content: the glTF body follows the feature and batch tables.
fn parse_b3dm(data: &Blob) -> Result<TileContent> {
	let mut cursor = Cursor::new(data.as_slice());
	let header = read_common_header(&mut cursor, data, b"b3dm")?;

	ensure!(
		data.len() >= 28,
		TileError::Format(format!("b3dm header needs 28 bytes, got {}", data.len()))
	);
	let tables = read_table_lengths(&mut cursor)?;

	Ok(TileContent {
		payload: Some(payload_from(data, 28 + tables)?),
		byte_length: header.byte_length,
		..TileContent::default()
	})
}

/// Instanced model content: like `b3dm` plus a trailing `gltfFormat` word.
fn parse_i3dm(data: &Blob) -> Result<TileContent> {
	let mut cursor = Cursor::new(data.as_slice());
	let header = read_common_header(&mut cursor, data, b"i3dm")?;

	ensure!(
		data.len() >= 32,
		TileError::Format(format!("i3dm header needs 32 bytes, got {}", data.len()))
	);
	let tables = read_table_lengths(&mut cursor)?;
	let gltf_format = cursor.read_u32::<LittleEndian>()?;
	ensure!(
		gltf_format <= 1,
		TileError::Format(format!("unrecognized i3dm gltfFormat {gltf_format}"))
	);

	Ok(TileContent {
		payload: Some(payload_from(data, 32 + tables)?),
		byte_length: header.byte_length,
		..TileContent::default()
	})
}

/// Composite content: the payload is the concatenation of inner tiles,
/// dispatched individually by the external parser.
fn parse_cmpt(data: &Blob) -> Result<TileContent> {
	let mut cursor = Cursor::new(data.as_slice());
	let header = read_common_header(&mut cursor, data, b"cmpt")?;

	ensure!(
		data.len() >= 16,
		TileError::Format(format!("cmpt header needs 16 bytes, got {}", data.len()))
	);
	let tiles_length = cursor.read_u32::<LittleEndian>()?;
	debug!("cmpt content with {tiles_length} inner tiles");

	Ok(TileContent {
		payload: Some(payload_from(data, 16)?),
		byte_length: header.byte_length,
		..TileContent::default()
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use byteorder::WriteBytesExt;

	fn build_b3dm(feature_json: &[u8], gltf: &[u8]) -> Blob {
		let mut buffer = Vec::new();
		buffer.extend_from_slice(b"b3dm");
		buffer.write_u32::<LittleEndian>(1).unwrap();
		let total = 28 + feature_json.len() + gltf.len();
		buffer.write_u32::<LittleEndian>(total as u32).unwrap();
		buffer.write_u32::<LittleEndian>(feature_json.len() as u32).unwrap();
		buffer.write_u32::<LittleEndian>(0).unwrap();
		buffer.write_u32::<LittleEndian>(0).unwrap();
		buffer.write_u32::<LittleEndian>(0).unwrap();
		buffer.extend_from_slice(feature_json);
		buffer.extend_from_slice(gltf);
		Blob::from(buffer)
	}

	fn build_pnts(feature_table: &[u8]) -> Blob {
		let mut buffer = Vec::new();
		buffer.extend_from_slice(b"pnts");
		buffer.write_u32::<LittleEndian>(1).unwrap();
		buffer.write_u32::<LittleEndian>((28 + feature_table.len()) as u32).unwrap();
		buffer.write_u32::<LittleEndian>(feature_table.len() as u32).unwrap();
		buffer.write_u32::<LittleEndian>(0).unwrap();
		buffer.write_u32::<LittleEndian>(0).unwrap();
		buffer.write_u32::<LittleEndian>(0).unwrap();
		buffer.extend_from_slice(feature_table);
		Blob::from(buffer)
	}

	#[test]
	fn test_b3dm_payload_skips_tables() -> Result<()> {
		let data = build_b3dm(b"{\"BATCH_LENGTH\":0}", b"glTF-payload");
		let content = parse_tile_content(&data, "http://x/a.b3dm")?;
		assert_eq!(content.payload.unwrap().as_slice(), b"glTF-payload");
		assert_eq!(content.byte_length, data.len());
		Ok(())
	}

	#[test]
	fn test_pnts_payload_is_feature_table() -> Result<()> {
		let data = build_pnts(b"{\"POINTS_LENGTH\":3}");
		let content = parse_tile_content(&data, "http://x/a.pnts")?;
		assert_eq!(content.payload.unwrap().as_slice(), b"{\"POINTS_LENGTH\":3}");
		Ok(())
	}

	#[test]
	fn test_magic_fallback_when_extension_unknown() -> Result<()> {
		let data = build_pnts(b"table");
		let content = parse_tile_content(&data, "http://x/content-no-extension")?;
		assert!(content.payload.is_some());
		Ok(())
	}

	#[test]
	fn test_wrong_magic_is_format_error() {
		let data = build_pnts(b"table");
		let error = parse_tile_content(&data, "http://x/a.b3dm").unwrap_err();
		assert!(matches!(error.downcast_ref::<TileError>(), Some(TileError::Format(_))));
	}

	#[test]
	fn test_byte_length_mismatch_is_format_error() {
		let mut bytes = build_b3dm(b"", b"payload").into_vec();
		bytes.pop();
		let error = parse_tile_content(&Blob::from(bytes), "http://x/a.b3dm").unwrap_err();
		assert!(matches!(error.downcast_ref::<TileError>(), Some(TileError::Format(_))));
	}

	#[test]
	fn test_truncated_buffer_is_format_error() {
		let error = parse_tile_content(&Blob::from(&b"b3"[..]), "http://x/a.b3dm").unwrap_err();
		assert!(matches!(error.downcast_ref::<TileError>(), Some(TileError::Format(_))));
	}

	#[test]
	fn test_cmpt_payload_is_inner_tiles() -> Result<()> {
		let inner = build_pnts(b"p").into_vec();
		let mut buffer = Vec::new();
		buffer.extend_from_slice(b"cmpt");
		buffer.write_u32::<LittleEndian>(1).unwrap();
		buffer.write_u32::<LittleEndian>((16 + inner.len()) as u32).unwrap();
		buffer.write_u32::<LittleEndian>(1).unwrap();
		buffer.extend_from_slice(&inner);

		let content = parse_tile_content(&Blob::from(buffer), "http://x/a.cmpt")?;
		assert_eq!(content.payload.unwrap().as_slice(), &inner[..]);
		Ok(())
	}
}
