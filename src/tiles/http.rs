use async_trait::async_trait;
use once_cell::sync::Lazy;

use super::source::{ProviderKind, TileSource, TilingScheme};
use crate::core::geo::TileCoord;
use crate::{Error, Result};

/// Shared async HTTP client for tile fetching. Building the client once
/// avoids TLS and connection pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("overzoom/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .tcp_keepalive(std::time::Duration::from_secs(30))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});

/// Tile source fetching from a `{z}/{x}/{y}` URL template.
///
/// One GET per fetch: no retries and no caching. Wrap it in other sources
/// for that.
#[derive(Debug, Clone)]
pub struct HttpTileSource {
    url_template: String,
    subdomains: Vec<String>,
    min_zoom: u8,
    max_zoom: u8,
    tiling_scheme: TilingScheme,
    provider_kind: ProviderKind,
}

impl HttpTileSource {
    /// Create a source for `url_template`, e.g.
    /// `https://{s}.tiles.example.com/{z}/{x}/{y}.pbf`
    pub fn new(url_template: impl Into<String>, min_zoom: u8, max_zoom: u8) -> Self {
        Self {
            url_template: url_template.into(),
            subdomains: Vec::new(),
            min_zoom,
            max_zoom,
            tiling_scheme: TilingScheme::default(),
            provider_kind: ProviderKind::default(),
        }
    }

    pub fn with_subdomains<I, T>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
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

    /// Build the request URL for `tile`
    pub fn url(&self, tile: TileCoord) -> String {
        let y = if self.tiling_scheme.tms {
            // Flip to a south-origin row index
            let rows = tile.axis_len();
            rows.saturating_sub(1).saturating_sub(u64::from(tile.y))
        } else {
            u64::from(tile.y)
        };

        let mut url = self
            .url_template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &y.to_string());

        if self.subdomains.is_empty() {
            // No subdomains configured: drop the `{s}.` host label
            url = url.replace("{s}.", "").replace("{s}", "");
        } else {
            let idx = ((u64::from(tile.x) + u64::from(tile.y)) % self.subdomains.len() as u64) as usize;
            url = url.replace("{s}", &self.subdomains[idx]);
        }
        url
    }
}

#[async_trait]
impl TileSource for HttpTileSource {
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
        let url = self.url(tile);
        log::debug!("fetch tile {} from {}", tile, url);

        let resp = HTTP_CLIENT.get(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::TileNotFound(tile));
        }
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = resp.bytes().await?;
        log::trace!("downloaded tile {} ({} bytes)", tile, bytes.len());
        Ok(bytes.to_vec())
    }
}
