//! This module provides functionality for fetching tile resources from the
//! local file system.
//!
//! # Overview
//!
//! The `DataFetcherFile` struct resolves fetched URLs against a root
//! directory, so tileset documents that reference relative content URLs can be
//! served straight from disk. The module ensures the root exists and is a
//! directory before accepting it.

use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::DataFetcherTrait;
use crate::types::Blob;

/// A fetcher that reads resources below a root directory.
#[derive(Debug)]
pub struct DataFetcherFile {
	name: String,
	root: PathBuf,
}

impl DataFetcherFile {
	/// Creates a fetcher rooted at `path`.
	///
	/// # Arguments
	///
	/// * `path` - The directory fetched URLs are resolved against.
	pub fn open(path: &Path) -> Result<Box<DataFetcherFile>> {
		ensure!(path.exists(), "directory {path:?} does not exist");
		ensure!(path.is_dir(), "path {path:?} must be a directory");

		let root = path.canonicalize()?;
		Ok(Box::new(DataFetcherFile {
			name: root.to_string_lossy().to_string(),
			root,
		}))
	}
}

#[async_trait]
impl DataFetcherTrait for DataFetcherFile {
	async fn fetch(&self, url: &str) -> Result<Blob> {
		let relative = url.strip_prefix("file://").unwrap_or(url);
		let path = self.root.join(relative.trim_start_matches('/'));

		let bytes = std::fs::read(&path).with_context(|| format!("failed to read {path:?}"))?;
		Ok(Blob::from(bytes))
	}

	fn name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_fetch_relative_url() -> Result<()> {
		let dir = tempfile::tempdir()?;
		std::fs::create_dir(dir.path().join("nodes"))?;
		std::fs::write(dir.path().join("nodes/root"), b"{\"id\":\"root\"}")?;

		let fetcher = DataFetcherFile::open(dir.path())?;
		let blob = fetcher.fetch("nodes/root").await?;
		assert_eq!(blob.as_str()?, "{\"id\":\"root\"}");
		Ok(())
	}

	#[tokio::test]
	async fn test_missing_file_propagates_error() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let fetcher = DataFetcherFile::open(dir.path())?;
		assert!(fetcher.fetch("missing.json").await.is_err());
		Ok(())
	}

	#[test]
	fn test_open_rejects_files() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let file = dir.path().join("a.json");
		std::fs::write(&file, b"{}")?;
		assert!(DataFetcherFile::open(&file).is_err());
		Ok(())
	}
}
