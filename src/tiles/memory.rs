use std::sync::RwLock;

use async_trait::async_trait;

use super::source::{ProviderKind, TileSource, TilingScheme};
use crate::core::geo::TileCoord;
use crate::prelude::HashMap;
use crate::{Error, Result};

/// In-process tile source backed by a hash map.
///
/// Useful for offline bundles and as a delegate in tests. With
/// [`MemoryTileSource::with_request_log`] every identity passed to
/// [`TileSource::fetch`] is recorded and can be read back with
/// [`MemoryTileSource::requests`]; without it nothing is retained.
#[derive(Debug)]
pub struct MemoryTileSource {
    tiles: RwLock<HashMap<TileCoord, Vec<u8>>>,
    requests: Option<RwLock<Vec<TileCoord>>>,
    min_zoom: u8,
    max_zoom: u8,
    tiling_scheme: TilingScheme,
    provider_kind: ProviderKind,
}

impl MemoryTileSource {
    /// Create an empty source serving zoom levels `min_zoom..=max_zoom`
    pub fn new(min_zoom: u8, max_zoom: u8) -> Self {
        Self {
            tiles: RwLock::new(HashMap::default()),
            requests: None,
            min_zoom,
            max_zoom,
            tiling_scheme: TilingScheme::default(),
            provider_kind: ProviderKind::default(),
        }
    }

    /// Record every fetched identity
    pub fn with_request_log(mut self) -> Self {
        self.requests = Some(RwLock::new(Vec::new()));
        self
    }

    pub fn with_tiling_scheme(mut self, tiling_scheme: TilingScheme) -> Self {
        self.tiling_scheme = tiling_scheme;
        self
    }

    pub fn with_provider_kind(mut self, provider_kind: ProviderKind) -> Self {
        self.provider_kind = provider_kind;
        self
    }

    /// Store a tile, replacing any previous bytes
    pub fn insert(&self, tile: TileCoord, data: Vec<u8>) {
        if let Ok(mut tiles) = self.tiles.write() {
            tiles.insert(tile, data);
        }
    }

    /// Remove a tile from the source
    pub fn remove(&self, tile: &TileCoord) -> Option<Vec<u8>> {
        self.tiles.write().ok()?.remove(tile)
    }

    /// Check if a tile is stored
    pub fn contains(&self, tile: &TileCoord) -> bool {
        self.tiles
            .read()
            .map(|tiles| tiles.contains_key(tile))
            .unwrap_or(false)
    }

    /// Get the current number of stored tiles
    pub fn len(&self) -> usize {
        self.tiles.read().map(|tiles| tiles.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every identity this source was asked for, in call order.
    /// Empty unless the request log is enabled.
    pub fn requests(&self) -> Vec<TileCoord> {
        self.requests
            .as_ref()
            .and_then(|log| log.read().ok().map(|requests| requests.clone()))
            .unwrap_or_default()
    }

    /// Drain the request log
    pub fn take_requests(&self) -> Vec<TileCoord> {
        self.requests
            .as_ref()
            .and_then(|log| log.write().ok().map(|mut requests| std::mem::take(&mut *requests)))
            .unwrap_or_default()
    }
}

#[async_trait]
impl TileSource for MemoryTileSource {
    fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    fn tiling_scheme(&self) -> TilingScheme {
        self.tiling_scheme
    }

    fn provider_kind(&self) -> ProviderKind {
        self.provider_kind.clone()
    }

    async fn fetch(&self, tile: TileCoord) -> Result<Vec<u8>> {
        if let Some(Ok(mut requests)) = self.requests.as_ref().map(|log| log.write()) {
            requests.push(tile);
        }

        let tiles = self
            .tiles
            .read()
            .map_err(|_| Error::Source("memory tile store poisoned".to_string()))?;
        tiles.get(&tile).cloned().ok_or(Error::TileNotFound(tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_basic_operations() {
        let source = MemoryTileSource::new(0, 14).with_request_log();
        let tile = TileCoord::new(1, 2, 3);

        assert!(source.is_empty());
        source.insert(tile, vec![1, 2, 3]);
        assert_eq!(source.len(), 1);
        assert!(source.contains(&tile));

        assert_eq!(source.fetch(tile).await.unwrap(), vec![1, 2, 3]);
        assert_eq!(source.requests(), vec![tile]);

        assert_eq!(source.remove(&tile), Some(vec![1, 2, 3]));
        assert!(source.is_empty());
    }

    #[tokio::test]
    async fn test_missing_tile_is_not_found() {
        let source = MemoryTileSource::new(0, 14).with_request_log();
        let tile = TileCoord::new(7, 7, 4);

        match source.fetch(tile).await {
            Err(Error::TileNotFound(missing)) => assert_eq!(missing, tile),
            other => panic!("expected TileNotFound, got {:?}", other),
        }
        // Failed lookups are still recorded
        assert_eq!(source.requests(), vec![tile]);
    }

    #[tokio::test]
    async fn test_requests_not_retained_without_log() {
        let source = MemoryTileSource::new(0, 0);
        let tile = TileCoord::new(0, 0, 0);
        source.insert(tile, vec![0]);

        for _ in 0..1_000 {
            source.fetch(tile).await.unwrap();
        }
        assert!(source.requests().is_empty());
        assert!(source.take_requests().is_empty());
    }

    #[tokio::test]
    async fn test_take_requests_drains_log() {
        let source = MemoryTileSource::new(0, 4).with_request_log();
        let tile = TileCoord::new(1, 1, 1);
        let _ = source.fetch(tile).await;
        let _ = source.fetch(tile).await;

        assert_eq!(source.take_requests(), vec![tile, tile]);
        assert!(source.requests().is_empty());
    }
}
