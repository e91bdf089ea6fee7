//! Mesh generation for geodesic spheres: faceted and border-aware smoothed polygon meshes, edge skeletons, and GPU-ready buffers.

pub mod border;
pub mod builder;
pub mod faceted;
pub mod layout;
pub mod packed;
pub mod skeleton;
pub mod smoothed;
pub mod sphere_mesh;

mod error;

pub use border::{BorderPredicate, NoBorders};
pub use builder::{MeshBuilder, NormalMode, build_polygon_mesh, fan_triangles};
pub use error::MeshError;
pub use faceted::FacetedBuilder;
pub use layout::PolygonLayout;
pub use packed::{MeshVertex, as_bytes};
pub use skeleton::{
    BAND_TRIANGLES, EdgeShape, EdgeStyle, MITERED_BAND_TRIANGLES, build_edge_mesh, edge_band,
    edge_band_mitered, edge_line,
};
pub use smoothed::SmoothedBuilder;
pub use sphere_mesh::{IndexBuffer, IndexWidth, Primitive, SphereMesh};
