//! Prelude module for common overzoom types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use overzoom::prelude::*;`

pub use crate::core::{
    constants::{DEFAULT_REPORTED_MAX_ZOOM, MAX_SUPPORTED_ZOOM},
    geo::TileCoord,
};

pub use crate::tiles::{
    http::HttpTileSource,
    memory::MemoryTileSource,
    overzoom::{OverzoomConfig, OverzoomRegion, OverzoomSource},
    source::{ProviderKind, TileSource, TilingScheme},
};

pub use crate::{Error, Result};

pub use std::sync::Arc;

pub use fxhash::FxHashMap as HashMap;
