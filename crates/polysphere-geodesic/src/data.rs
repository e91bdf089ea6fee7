//! Generated per-polygon and per-edge terrain data.

use glam::DVec3;

/// Terrain zone of a region, derived from its height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ZoneType {
    /// Low ground, `height < 1/3`.
    Water = 0,
    /// Mid ground, `1/3 <= height < 2/3`.
    Plains = 1,
    /// High ground, `height >= 2/3`.
    Mountain = 2,
}

impl ZoneType {
    /// All zones in ascending height order.
    pub const ALL: [ZoneType; 3] = [ZoneType::Water, ZoneType::Plains, ZoneType::Mountain];

    const PLAINS_FLOOR: f64 = 1.0 / 3.0;
    const MOUNTAIN_FLOOR: f64 = 2.0 / 3.0;

    /// Band a height in `[0, 1]` into a zone.
    #[must_use]
    pub fn from_height(height: f64) -> ZoneType {
        if height < Self::PLAINS_FLOOR {
            ZoneType::Water
        } else if height < Self::MOUNTAIN_FLOOR {
            ZoneType::Plains
        } else {
            ZoneType::Mountain
        }
    }

    /// Dense index of this zone, usable for palette lookups.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Data generated for one polygon by [`crate::GeodesicSphere::regenerate_data`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonData {
    /// Normalized height in `[0, 1]`.
    pub height: f64,
    /// Zone banded from `height`.
    pub zone: ZoneType,
    /// Random RGBA display color, independent of height.
    pub color: [f32; 4],
}

/// Data generated for one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeData {
    /// Ridge strength in `[0, 1]`.
    pub ridge: f64,
}

/// A scalar height field over the unit sphere.
///
/// `stream` is a key unique to one polygon on one level (see
/// [`polygon_stream`]). Spatially coherent sources ignore it; per-region
/// random sources use it to draw an independent value.
pub trait HeightSource {
    /// Seed that also drives color and ridge streams during regeneration.
    fn seed(&self) -> u64;

    /// Sample a height in `[0, 1]` for a unit direction.
    fn height(&self, direction: DVec3, stream: u64) -> f64;
}

/// Stream key for polygon `index` on a sphere of the given frequency.
#[must_use]
pub fn polygon_stream(frequency: u32, index: usize) -> u64 {
    (u64::from(frequency) << 32) | index as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_bands() {
        assert_eq!(ZoneType::from_height(0.0), ZoneType::Water);
        assert_eq!(ZoneType::from_height(0.32), ZoneType::Water);
        assert_eq!(ZoneType::from_height(0.34), ZoneType::Plains);
        assert_eq!(ZoneType::from_height(0.66), ZoneType::Plains);
        assert_eq!(ZoneType::from_height(0.67), ZoneType::Mountain);
        assert_eq!(ZoneType::from_height(1.0), ZoneType::Mountain);
    }

    #[test]
    fn test_zone_index_matches_all_order() {
        for (i, zone) in ZoneType::ALL.iter().enumerate() {
            assert_eq!(zone.index(), i);
        }
    }

    #[test]
    fn test_polygon_stream_unique_across_levels() {
        assert_ne!(polygon_stream(1, 5), polygon_stream(3, 5));
        assert_ne!(polygon_stream(1, 5), polygon_stream(1, 6));
    }
}
