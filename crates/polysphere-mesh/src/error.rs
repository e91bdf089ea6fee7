//! Mesh generation error types.

use polysphere_geodesic::GeodesicError;

/// Errors raised while assembling mesh buffers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// A polygon, edge or corner lookup on the source sphere failed.
    #[error(transparent)]
    Geodesic(#[from] GeodesicError),

    /// The per-polygon color slice does not match the polygon count.
    #[error("expected {expected} polygon colors, got {got}")]
    ColorCountMismatch {
        /// Polygon count of the sphere.
        expected: usize,
        /// Length of the supplied color slice.
        got: usize,
    },
}
