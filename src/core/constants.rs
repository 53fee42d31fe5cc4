//! Core constants derived from common web-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Zoom ceiling advertised by an overzoom adapter when none is configured.
/// Matches the usual map-renderer ceiling callers already rely on.
pub const DEFAULT_REPORTED_MAX_ZOOM: u8 = 22;

/// Deepest zoom level accepted for an overzoom data ceiling.
pub const MAX_SUPPORTED_ZOOM: u8 = 30;

/// Default square tile size in pixels for vector tiles.
pub const VECTOR_TILE_SIZE: u32 = 512;
