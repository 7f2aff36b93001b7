//! The normalized tile data model shared by all format loaders.

mod blob;
mod bounding_volume;
mod content;
mod error;
mod loader;
mod lod_metric;
mod options;
mod refine;
mod tile_header;
mod tile_type;
mod tileset;

pub use blob::Blob;
pub use bounding_volume::BoundingVolume;
pub use content::{TileContent, VertexAttributes};
pub use error::TileError;
pub use loader::LoaderDescriptor;
pub use lod_metric::LodMetricType;
pub use options::ParseOptions;
pub use refine::Refine;
pub use tile_header::TileHeader;
pub use tile_type::TileType;
pub use tileset::{Tileset, TilesetSource};
