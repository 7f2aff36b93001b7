//! Shared building blocks for normalized tile loading.
//!
//! Contains the normalized tile data model (tilesets, tile headers, content),
//! WGS84 geodetic math, the vertex attribute decoder, the geometry normalizer,
//! the LOD ("zoom") estimator and the async fetch abstraction used by the
//! format crates.

pub mod attributes;
pub mod geodetic;
pub mod io;
pub mod lod;
pub mod normalize;
pub mod types;

pub use types::*;
