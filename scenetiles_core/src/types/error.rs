//! Error taxonomy shared by all format loaders.
//!
//! Only fatal conditions are errors: a document that cannot be parsed
//! ([`TileError::Format`]) aborts that tileset/tile parse, and a bad attribute
//! schema ([`TileError::Schema`], [`TileError::Range`]) aborts that tile's
//! content parse only. Unrecognized bounding volume shapes and file extensions
//! are resolved via documented defaults and never surface here.

use thiserror::Error;

/// Fatal parse errors. Carried inside [`anyhow::Error`] so callers can
/// downcast when they need to distinguish the failure class.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileError {
	/// The document is not valid JSON/UTF-8 or a required field is missing.
	#[error("format error: {0}")]
	Format(String),

	/// An attribute schema declares an unrecognized value type.
	#[error("schema error: {0}")]
	Schema(String),

	/// An attribute schema spans more bytes than the buffer holds.
	#[error("range error: attribute '{attribute}' needs {needed} bytes at offset {offset}, buffer has {available}")]
	Range {
		attribute: String,
		offset: usize,
		needed: usize,
		available: usize,
	},
}
