//! An in-memory fetcher for tests: maps URLs to canned responses.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;

use super::DataFetcherTrait;
use crate::types::Blob;

/// A fetcher serving a fixed URL→bytes map. Unknown URLs fail like a network
/// error would, so failure-path behavior can be tested too.
#[derive(Debug, Default)]
pub struct DataFetcherMock {
	responses: HashMap<String, Blob>,
}

impl DataFetcherMock {
	#[must_use]
	pub fn new() -> DataFetcherMock {
		DataFetcherMock::default()
	}

	/// Registers a response, returning `self` for chaining.
	#[must_use]
	pub fn with(mut self, url: &str, blob: Blob) -> DataFetcherMock {
		self.responses.insert(url.to_string(), blob);
		self
	}
}

#[async_trait]
impl DataFetcherTrait for DataFetcherMock {
	async fn fetch(&self, url: &str) -> Result<Blob> {
		match self.responses.get(url) {
			Some(blob) => Ok(blob.clone()),
			None => bail!("mock fetcher has no response for '{url}'"),
		}
	}

	fn name(&self) -> &str {
		"mock"
	}
}
