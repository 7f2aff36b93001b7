//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] used for
//! fetched documents and binary tile payloads.
//!
//! # Examples
//!
//! ```rust
//! use scenetiles_core::Blob;
//!
//! let blob = Blob::from("tileset.json contents");
//! assert_eq!(blob.len(), 21);
//! assert_eq!(blob.as_str().unwrap(), "tileset.json contents");
//! ```

use anyhow::Result;
use std::fmt::Debug;

use super::TileError;

/// A simple wrapper around [`Vec<u8>`] holding one fetched resource: a JSON
/// document, a geometry buffer or an opaque payload handed on to the renderer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Returns the underlying bytes as a slice.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Interprets the bytes as UTF-8 text.
	///
	/// # Errors
	/// Returns a [`TileError::Format`] if the bytes are not valid UTF-8, since
	/// every text payload in this crate is required to be a UTF-8 JSON document.
	pub fn as_str(&self) -> Result<&str> {
		std::str::from_utf8(&self.0).map_err(|e| TileError::Format(format!("blob is not valid UTF-8: {e}")).into())
	}

	/// Consumes the `Blob` and returns the underlying vector.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the length in bytes.
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` if the `Blob` holds no bytes.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(vec: Vec<u8>) -> Blob {
		Blob(vec)
	}
}

impl From<&[u8]> for Blob {
	fn from(slice: &[u8]) -> Blob {
		Blob(slice.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(array: &[u8; N]) -> Blob {
		Blob(array.to_vec())
	}
}

impl From<&str> for Blob {
	fn from(text: &str) -> Blob {
		Blob(text.as_bytes().to_vec())
	}
}

impl From<String> for Blob {
	fn from(text: String) -> Blob {
		Blob(text.into_bytes())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Blob").field("length", &self.0.len()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_basics() {
		let blob = Blob::from(vec![1u8, 2, 3]);
		assert_eq!(blob.len(), 3);
		assert!(!blob.is_empty());
		assert_eq!(blob.as_slice(), &[1, 2, 3]);
		assert_eq!(blob.clone().into_vec(), vec![1, 2, 3]);
		assert_eq!(format!("{blob:?}"), "Blob { length: 3 }");
	}

	#[test]
	fn test_empty() {
		let blob = Blob::new_empty();
		assert_eq!(blob.len(), 0);
		assert!(blob.is_empty());
	}

	#[test]
	fn test_as_str() {
		assert_eq!(Blob::from("Xylofön").as_str().unwrap(), "Xylofön");
		assert!(Blob::from(&[0xff, 0xfe]).as_str().is_err());
	}
}
