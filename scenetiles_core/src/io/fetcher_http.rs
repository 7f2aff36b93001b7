//! This module provides functionality for fetching tile resources from HTTP
//! endpoints.
//!
//! # Overview
//!
//! The `DataFetcherHttp` struct fetches complete resources from HTTP and
//! HTTPS URLs using the `reqwest` library. I3S servers expose tilesets, node
//! documents and geometry payloads as separate REST-like endpoints, so one
//! fetcher instance is reused across many small requests and keeps its
//! connections alive.

use anyhow::{Result, bail, ensure};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use super::DataFetcherTrait;
use crate::types::Blob;

/// A fetcher that reads resources from HTTP(S) endpoints.
#[derive(Debug)]
pub struct DataFetcherHttp {
	client: Client,
	name: String,
}

impl DataFetcherHttp {
	/// Creates an HTTP fetcher with a keep-alive client.
	pub fn new() -> Result<Box<DataFetcherHttp>> {
		let client = Client::builder().tcp_keepalive(Duration::from_secs(600)).build()?;

		Ok(Box::new(DataFetcherHttp {
			client,
			name: "http".to_string(),
		}))
	}
}

#[async_trait]
impl DataFetcherTrait for DataFetcherHttp {
	async fn fetch(&self, url: &str) -> Result<Blob> {
		let url = Url::parse(url)?;
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in '{url}', expected 'http' or 'https'"),
		}

		let response = self.client.get(url.clone()).send().await?;
		ensure!(
			response.status().is_success(),
			"fetching '{url}' failed with status {}",
			response.status()
		);

		let bytes = response.bytes().await?;
		Ok(Blob::from(bytes.to_vec()))
	}

	fn name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_rejects_non_http_schemes() -> Result<()> {
		let fetcher = DataFetcherHttp::new()?;
		assert!(fetcher.fetch("ftp://example.com/tileset.json").await.is_err());
		assert!(fetcher.fetch("not a url").await.is_err());
		Ok(())
	}
}
