//! Fetching of tile resources from files and HTTP endpoints.

mod fetcher;
mod fetcher_file;
mod fetcher_http;
mod fetcher_mock;

pub use fetcher::{DataFetcher, DataFetcherTrait};
pub use fetcher_file::DataFetcherFile;
pub use fetcher_http::DataFetcherHttp;
pub use fetcher_mock::DataFetcherMock;
