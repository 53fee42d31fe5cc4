//! # Overzoom
//!
//! Tile source adapters for vector-tile map clients.
//!
//! The centrepiece is [`OverzoomSource`], a decorator that serves requests
//! above a source's real data ceiling from the nearest ancestor tile, so a
//! renderer can keep zooming past the deepest level a tile server provides.
//! Every source implements the same [`TileSource`] trait, which lets adapters
//! be nested into a provider chain (overzoom → cache → network).

pub mod core;
pub mod logging;
pub mod prelude;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::geo::TileCoord;

pub use tiles::{
    http::HttpTileSource,
    memory::MemoryTileSource,
    overzoom::{OverzoomConfig, OverzoomRegion, OverzoomSource},
    source::{ProviderKind, TileSource, TilingScheme},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tile not found: {0}")]
    TileNotFound(TileCoord),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Source error: {0}")]
    Source(String),
}
