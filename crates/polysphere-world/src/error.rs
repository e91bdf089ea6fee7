//! World error types.

use polysphere_geodesic::GeodesicError;

/// Errors raised by hierarchy queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A lookup on one of the level spheres failed.
    #[error(transparent)]
    Geodesic(#[from] GeodesicError),

    /// Level index outside `0..count`.
    #[error("level {level} out of range ({count} levels)")]
    LevelOutOfRange {
        /// Requested level.
        level: usize,
        /// Number of levels in the hierarchy.
        count: usize,
    },

    /// A resolution query asked for a coarse level finer than its source.
    #[error("coarse level {coarse} is finer than level {fine}")]
    InvalidLevelOrdering {
        /// Source level.
        fine: usize,
        /// Target level.
        coarse: usize,
    },

    /// Level frequencies must be non-empty and strictly increasing.
    #[error("invalid level frequencies {0:?}")]
    InvalidFrequencies(Vec<u32>),
}
