//! Tile sources
//!
//! Every source implements [`TileSource`], so they nest freely:
//! an [`OverzoomSource`] can wrap an [`HttpTileSource`], a
//! [`MemoryTileSource`], or any other implementation.

pub mod http;
pub mod memory;
pub mod overzoom;
pub mod source;

// Re-exports for convenience
pub use http::HttpTileSource;
pub use memory::MemoryTileSource;
pub use overzoom::{OverzoomConfig, OverzoomRegion, OverzoomSource};
pub use source::{ProviderKind, TileSource, TilingScheme};
