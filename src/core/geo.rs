use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Gets the parent tile at a lower zoom level
    pub fn parent(&self) -> Option<TileCoord> {
        if self.z == 0 {
            None
        } else {
            Some(TileCoord::new(self.x / 2, self.y / 2, self.z - 1))
        }
    }

    /// Gets the ancestor containing this tile at `zoom`.
    ///
    /// Returns the tile itself when `zoom == self.z` and `None` when `zoom`
    /// is deeper than this tile.
    pub fn ancestor_at(&self, zoom: u8) -> Option<TileCoord> {
        if zoom > self.z {
            return None;
        }
        let shift = u32::from(self.z - zoom);
        // x, y < 2^32, so a shift of 32 or more always lands on column/row 0.
        let x = self.x.checked_shr(shift).unwrap_or(0);
        let y = self.y.checked_shr(shift).unwrap_or(0);
        Some(TileCoord::new(x, y, zoom))
    }

    /// Gets the child tiles at a higher zoom level.
    /// Empty for invalid tiles and at the deepest supported zoom.
    pub fn children(&self) -> Vec<TileCoord> {
        if self.z >= crate::constants::MAX_SUPPORTED_ZOOM || !self.is_valid() {
            Vec::new()
        } else {
            vec![
                TileCoord::new(self.x * 2, self.y * 2, self.z + 1),
                TileCoord::new(self.x * 2 + 1, self.y * 2, self.z + 1),
                TileCoord::new(self.x * 2, self.y * 2 + 1, self.z + 1),
                TileCoord::new(self.x * 2 + 1, self.y * 2 + 1, self.z + 1),
            ]
        }
    }

    /// Number of tiles along one axis at this zoom level
    pub fn axis_len(&self) -> u64 {
        1u64 << self.z.min(63)
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = self.axis_len();
        u64::from(self.x) < max_coord && u64::from(self.y) < max_coord
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_and_children() {
        let tile = TileCoord::new(5, 9, 4);
        assert_eq!(tile.parent(), Some(TileCoord::new(2, 4, 3)));
        assert_eq!(TileCoord::new(0, 0, 0).parent(), None);

        for child in tile.children() {
            assert_eq!(child.parent(), Some(tile));
        }
    }

    #[test]
    fn test_children_of_invalid_tile_is_empty() {
        assert!(TileCoord::new(u32::MAX, 0, 5).children().is_empty());
        assert!(TileCoord::new(0, 1 << 31, 5).children().is_empty());
        assert!(TileCoord::new(0, 0, 30).children().is_empty());
        assert_eq!(TileCoord::new((1 << 29) - 1, 0, 29).children().len(), 4);
    }

    #[test]
    fn test_ancestor_at() {
        let tile = TileCoord::new(12345, 23456, 16);
        assert_eq!(tile.ancestor_at(14), Some(TileCoord::new(3086, 5864, 14)));
        assert_eq!(tile.ancestor_at(16), Some(tile));
        assert_eq!(tile.ancestor_at(0), Some(TileCoord::new(0, 0, 0)));
        assert_eq!(tile.ancestor_at(17), None);

        // Walking up one level at a time agrees with the direct jump
        let mut walked = tile;
        while walked.z > 10 {
            walked = walked.parent().unwrap();
        }
        assert_eq!(tile.ancestor_at(10), Some(walked));
    }

    #[test]
    fn test_is_valid() {
        assert!(TileCoord::new(0, 0, 0).is_valid());
        assert!(!TileCoord::new(1, 0, 0).is_valid());
        assert!(TileCoord::new(3, 3, 2).is_valid());
        assert!(!TileCoord::new(4, 3, 2).is_valid());
        assert!(TileCoord::new(u32::MAX, u32::MAX, 32).is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(TileCoord::new(3086, 5864, 14).to_string(), "14/3086/5864");
    }
}
