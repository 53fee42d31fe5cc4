use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::constants::VECTOR_TILE_SIZE;
use crate::core::geo::TileCoord;
use crate::Result;

/// How tiles of a source are laid out and addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilingScheme {
    /// Edge length of a tile in pixels
    pub tile_size: u32,
    /// Rows are numbered from the south (TMS) instead of the north (XYZ)
    pub tms: bool,
    /// Offset added to the map zoom to get the tile zoom
    pub zoom_offset: i8,
}

impl Default for TilingScheme {
    fn default() -> Self {
        Self {
            tile_size: VECTOR_TILE_SIZE,
            tms: false,
            zoom_offset: 0,
        }
    }
}

/// Kind of payload a source serves. Purely descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    Vector,
    Raster,
    RasterDem,
    Other(String),
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::Vector
    }
}

/// Anything that can produce tile bytes for a given coordinate.
///
/// Implementations own their transport and failure modes; the returned bytes
/// are opaque to callers.
#[async_trait]
pub trait TileSource: Send + Sync {
    /// Shallowest zoom level the source serves
    fn min_zoom(&self) -> u8;

    /// Deepest zoom level callers may request
    fn max_zoom(&self) -> u8;

    fn tiling_scheme(&self) -> TilingScheme;

    fn provider_kind(&self) -> ProviderKind;

    /// Fetch the encoded tile at `tile`.
    async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>>;
}

#[async_trait]
impl<S: TileSource + ?Sized> TileSource for Box<S> {
    fn min_zoom(&self) -> u8 {
        (**self).min_zoom()
    }

    fn max_zoom(&self) -> u8 {
        (**self).max_zoom()
    }

    fn tiling_scheme(&self) -> TilingScheme {
        (**self).tiling_scheme()
    }

    fn provider_kind(&self) -> ProviderKind {
        (**self).provider_kind()
    }

    async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>> {
        (**self).fetch(tile).await
    }
}

#[async_trait]
impl<S: TileSource + ?Sized> TileSource for Arc<S> {
    fn min_zoom(&self) -> u8 {
        (**self).min_zoom()
    }

    fn max_zoom(&self) -> u8 {
        (**self).max_zoom()
    }

    fn tiling_scheme(&self) -> TilingScheme {
        (**self).tiling_scheme()
    }

    fn provider_kind(&self) -> ProviderKind {
        (**self).provider_kind()
    }

    async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>> {
        (**self).fetch(tile).await
    }
}
