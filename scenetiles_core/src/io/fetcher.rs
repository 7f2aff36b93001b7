//! This module defines the `DataFetcherTrait`, the only I/O boundary of the
//! loaders.
//!
//! # Overview
//!
//! Both format loaders suspend exclusively at fetch calls: the I3S loader
//! fetches node documents and geometry buffers lazily, and the facade fetches
//! root tileset documents. Implementations decide where bytes come from
//! (file system, HTTP, an in-memory map for tests). Fetch failures are
//! propagated upward unmodified; the loaders perform no retries and hold no
//! cancellable handles, so a caller that abandons a load simply discards the
//! in-flight future.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

use crate::types::Blob;

/// Type alias for a boxed dynamic implementation of the `DataFetcherTrait`.
pub type DataFetcher = Box<dyn DataFetcherTrait>;

/// A trait for fetching one resource per call, addressed by URL.
#[async_trait]
pub trait DataFetcherTrait: Debug + Send + Sync {
	/// Fetches the complete resource at `url`.
	async fn fetch(&self, url: &str) -> Result<Blob>;

	/// Gets the name of the fetch source, for diagnostics.
	fn name(&self) -> &str;
}
