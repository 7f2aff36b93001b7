//! Vertex attribute decoding.
//!
//! Interprets a raw geometry buffer plus a per-attribute schema (as declared
//! in an I3S feature document's `vertexAttributes`) into typed numeric
//! buffers. Decoding is strict: an unrecognized value type is a
//! [`TileError::Schema`], a span exceeding the buffer is a
//! [`TileError::Range`]; nothing is ever silently truncated. Re-decoding the
//! same buffer yields bit-identical output.

use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use serde::Deserialize;
use std::collections::HashMap;

use crate::types::TileError;

/// Declared layout of one vertex attribute inside a geometry buffer.
///
/// `count` is the total number of scalar elements; `values_per_element` is how
/// many of them form one vertex's value (3 for positions and normals, 4 for
/// RGBA colors, 2 for texture coordinates).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSchema {
	#[serde(default)]
	pub byte_offset: usize,
	pub count: usize,
	pub value_type: String,
	pub values_per_element: usize,
}

/// Decoded scalar data of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeData {
	UInt8(Vec<u8>),
	Float32(Vec<f32>),
}

impl AttributeData {
	/// Number of scalar elements.
	#[must_use]
	pub fn len(&self) -> usize {
		match self {
			AttributeData::UInt8(values) => values.len(),
			AttributeData::Float32(values) => values.len(),
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the scalars as f32, if this is a float attribute.
	#[must_use]
	pub fn as_f32(&self) -> Option<&[f32]> {
		match self {
			AttributeData::Float32(values) => Some(values),
			AttributeData::UInt8(_) => None,
		}
	}

	/// Returns the scalars as u8, if this is a byte attribute.
	#[must_use]
	pub fn as_u8(&self) -> Option<&[u8]> {
		match self {
			AttributeData::UInt8(values) => Some(values),
			AttributeData::Float32(_) => None,
		}
	}
}

/// One decoded attribute plus the metadata the renderer needs to interpret it.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
	pub data: AttributeData,
	pub values_per_element: usize,
	/// `true` for color attributes: 0-255 integers representing a 0-1 range.
	pub normalized: bool,
}

/// All attributes decoded from one geometry buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedAttributes {
	/// Derived from the `position` attribute's element count divided by 3;
	/// zero when no position attribute is declared.
	pub vertex_count: usize,
	pub attributes: HashMap<String, Attribute>,
}

/// Decodes every attribute declared in `schema` out of `buffer`.
///
/// # Errors
/// [`TileError::Schema`] if an attribute declares an unrecognized value type,
/// [`TileError::Range`] if a declared span exceeds the buffer's length.
pub fn decode_attributes(buffer: &[u8], schema: &HashMap<String, AttributeSchema>) -> Result<DecodedAttributes> {
	let mut decoded = DecodedAttributes::default();

	for (name, attribute) in schema {
		let data = decode_one(buffer, name, attribute)?;

		if name == "position" {
			decoded.vertex_count = attribute.count / 3;
		}

		decoded.attributes.insert(
			name.clone(),
			Attribute {
				data,
				values_per_element: attribute.values_per_element,
				normalized: name == "color",
			},
		);
	}

	Ok(decoded)
}

fn decode_one(buffer: &[u8], name: &str, schema: &AttributeSchema) -> Result<AttributeData> {
	let element_size = match schema.value_type.as_str() {
		"UInt8" => 1,
		"Float32" => 4,
		other => {
			return Err(TileError::Schema(format!("attribute '{name}' has unrecognized value type '{other}'")).into());
		}
	};

	let needed = schema.count.saturating_mul(element_size);
	let end = schema.byte_offset.checked_add(needed).filter(|end| *end <= buffer.len());
	let Some(end) = end else {
		return Err(TileError::Range {
			attribute: name.to_string(),
			offset: schema.byte_offset,
			needed,
			available: buffer.len(),
		}
		.into());
	};
	let bytes = &buffer[schema.byte_offset..end];

	Ok(match schema.value_type.as_str() {
		"UInt8" => AttributeData::UInt8(bytes.to_vec()),
		_ => {
			let mut values = vec![0f32; schema.count];
			LittleEndian::read_f32_into(bytes, &mut values);
			AttributeData::Float32(values)
		}
	})
}
