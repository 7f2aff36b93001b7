//! # SceneTiles
//!
//! SceneTiles is a Rust library that normalizes hierarchical 3D geospatial
//! tile formats into one render-ready in-memory model.
//!
//! ## Features
//! - **3D Tiles**: parses tileset JSON trees and `pnts`/`b3dm`/`i3dm`/`cmpt`
//!   content buffers.
//! - **I3S**: parses scene layers, node documents and geometry buffers from
//!   their REST-like endpoints.
//! - **Normalization**: both formats come out as the same tile-header tree,
//!   with geometry re-expressed in a numerically stable local frame and a
//!   per-tile zoom heuristic for LOD selection.
//!
//! ## Usage Example
//!
//! ```rust
//! use scenetiles::{
//!     core::{io::DataFetcherMock, io::DataFetcher, Blob, TilesetSource},
//!     load_tileset,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let fetcher: DataFetcher = Box::new(DataFetcherMock::new().with(
//!         "http://example.com/tileset.json",
//!         Blob::from(r#"{"root": {"geometricError": 100}}"#),
//!     ));
//!
//!     let tileset = load_tileset("http://example.com/tileset.json", &fetcher).await.unwrap();
//!     assert_eq!(tileset.source, TilesetSource::Tiles3d);
//! }
//! ```

mod loader;

pub use loader::{load_tile_content, load_tileset, select_loader};

pub use scenetiles_core as core;
pub use scenetiles_i3s as i3s;
pub use scenetiles_tiles3d as tiles3d;
