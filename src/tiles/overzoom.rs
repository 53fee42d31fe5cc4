//! Overzoom adapter
//!
//! Wraps a [`TileSource`] whose data stops at some zoom level and keeps
//! answering deeper requests by handing out the ancestor tile at that level.
//! The renderer is expected to upscale the returned parent; see
//! [`OverzoomSource::overzoom_region`] for the part of the parent that covers
//! the requested tile.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::source::{ProviderKind, TileSource, TilingScheme};
use crate::core::constants::{DEFAULT_REPORTED_MAX_ZOOM, MAX_SUPPORTED_ZOOM};
use crate::core::geo::TileCoord;
use crate::{Error, Result};

/// Zoom settings for an [`OverzoomSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverzoomConfig {
    /// Deepest zoom the wrapped source has real data for
    pub source_max_zoom: u8,
    /// Zoom ceiling advertised to callers; `None` falls back to
    /// [`DEFAULT_REPORTED_MAX_ZOOM`]
    #[serde(default)]
    pub reported_max_zoom: Option<u8>,
}

impl OverzoomConfig {
    pub fn new(source_max_zoom: u8) -> Self {
        Self {
            source_max_zoom,
            reported_max_zoom: None,
        }
    }

    pub fn with_reported_max_zoom(mut self, reported_max_zoom: u8) -> Self {
        self.reported_max_zoom = Some(reported_max_zoom);
        self
    }

    /// Parse a config from JSON, e.g. `{"source_max_zoom": 14}`
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The reported ceiling with the default applied
    pub fn resolved_reported_max_zoom(&self) -> u8 {
        self.reported_max_zoom.unwrap_or(DEFAULT_REPORTED_MAX_ZOOM)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(Error::InvalidConfig(format!(
                "source max zoom {} exceeds supported maximum {}",
                self.source_max_zoom, MAX_SUPPORTED_ZOOM
            )));
        }
        let reported = self.resolved_reported_max_zoom();
        if reported < self.source_max_zoom {
            return Err(Error::InvalidConfig(format!(
                "reported max zoom {} is below source max zoom {}",
                reported, self.source_max_zoom
            )));
        }
        Ok(())
    }
}

/// Where an overzoomed tile sits inside the parent that is actually fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverzoomRegion {
    /// Tile handed to the wrapped source
    pub parent: TileCoord,
    /// Requested tiles per parent edge (`2^(z - parent.z)`)
    pub scale: u64,
    /// Column of the requested tile inside the parent, `0..scale`
    pub offset_x: u32,
    /// Row of the requested tile inside the parent, `0..scale`
    pub offset_y: u32,
}

/// Tile source that serves requests above `source_max_zoom` from the
/// ancestor tile at `source_max_zoom`.
#[derive(Debug)]
pub struct OverzoomSource<S> {
    inner: S,
    config: OverzoomConfig,
    source_max_zoom: u8,
    reported_max_zoom: u8,
}

impl<S: TileSource> OverzoomSource<S> {
    /// Wrap `inner`, advertising [`DEFAULT_REPORTED_MAX_ZOOM`]
    pub fn new(inner: S, source_max_zoom: u8) -> Result<Self> {
        Self::with_config(inner, OverzoomConfig::new(source_max_zoom))
    }

    pub fn with_config(inner: S, config: OverzoomConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner,
            config,
            source_max_zoom: config.source_max_zoom,
            reported_max_zoom: config.resolved_reported_max_zoom(),
        })
    }

    /// Zoom ceiling callers such as a renderer should clamp to
    pub fn reported_max_zoom(&self) -> u8 {
        self.reported_max_zoom
    }

    /// Deepest zoom with real data, for scale and positioning math
    pub fn source_max_zoom(&self) -> u8 {
        self.source_max_zoom
    }

    /// The config this adapter was built from, unresolved
    pub fn config(&self) -> OverzoomConfig {
        self.config
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// The identity the wrapped source receives for a request of `tile`.
    ///
    /// Applying it twice is the same as applying it once.
    pub fn resolve(&self, tile: TileCoord) -> TileCoord {
        if tile.z <= self.source_max_zoom {
            return tile;
        }
        tile.ancestor_at(self.source_max_zoom).unwrap_or(tile)
    }

    /// Part of the parent tile covering `tile`, or `None` when `tile` is
    /// served as is or lies deeper than [`MAX_SUPPORTED_ZOOM`].
    pub fn overzoom_region(&self, tile: TileCoord) -> Option<OverzoomRegion> {
        if tile.z <= self.source_max_zoom || tile.z > MAX_SUPPORTED_ZOOM {
            return None;
        }
        let scale = divisor(tile.z - self.source_max_zoom);
        Some(OverzoomRegion {
            parent: self.resolve(tile),
            scale,
            offset_x: (u64::from(tile.x) % scale) as u32,
            offset_y: (u64::from(tile.y) % scale) as u32,
        })
    }
}

/// `2^zoom_delta`; always at least 1. Callers keep `zoom_delta` within
/// [`MAX_SUPPORTED_ZOOM`].
fn divisor(zoom_delta: u8) -> u64 {
    1u64 << zoom_delta
}

#[async_trait]
impl<S: TileSource> TileSource for OverzoomSource<S> {
    fn min_zoom(&self) -> u8 {
        self.inner.min_zoom()
    }

    fn max_zoom(&self) -> u8 {
        self.reported_max_zoom
    }

    fn tiling_scheme(&self) -> TilingScheme {
        self.inner.tiling_scheme()
    }

    fn provider_kind(&self) -> ProviderKind {
        self.inner.provider_kind()
    }

    async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>> {
        let target = self.resolve(tile);
        if target == tile {
            log::trace!("overzoom passthrough {}", tile);
        } else {
            log::debug!("overzoom {} -> parent {}", tile, target);
        }
        self.inner.fetch(target).await
    }
}
