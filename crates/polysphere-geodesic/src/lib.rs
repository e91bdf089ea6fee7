//! Geodesic polygon spheres: icosahedron subdivision, Goldberg dual tessellation, and per-level region data.

mod data;
mod error;
mod icosahedron;
mod parent;
mod seed;
mod sphere;

pub use data::{EdgeData, HeightSource, PolygonData, ZoneType, polygon_stream};
pub use error::GeodesicError;
pub use icosahedron::PENTAGON_COUNT;
pub use seed::{derive_seed, stream_rng};
pub use sphere::{Edge, GeodesicSphere, Polygon};
