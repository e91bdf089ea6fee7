//! Geodesic sphere error types.

/// Errors raised by [`crate::GeodesicSphere`] queries.
///
/// All variants are programmer errors: the caller passed an index that does
/// not exist or asked for data before it was generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeodesicError {
    /// Generated data was requested before the first regeneration.
    #[error("sphere data has not been generated yet")]
    InvalidState,

    /// A polygon index outside `0..count`.
    #[error("polygon index {index} out of range (polygon count {count})")]
    PolygonOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of polygons on the sphere.
        count: usize,
    },

    /// An edge index outside `0..count`.
    #[error("edge index {index} out of range (edge count {count})")]
    EdgeOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of edges on the sphere.
        count: usize,
    },

    /// A corner index outside `0..count`.
    #[error("corner index {index} out of range (corner count {count})")]
    CornerOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of corner points on the sphere.
        count: usize,
    },
}
