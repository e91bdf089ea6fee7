//! The mesh builder seam shared by the faceted and smoothed strategies.
//!
//! Every polygon is emitted as its own vertex block: the center vertex
//! followed by one ring vertex per corner, fanned into `sides` triangles.
//! Strategies differ only in the normals they assign to that block.

use glam::{DVec3, Vec3};
use polysphere_geodesic::{GeodesicError, GeodesicSphere, Polygon};
use tracing::debug;

use crate::error::MeshError;
use crate::sphere_mesh::{Primitive, SphereMesh};

/// How vertex normals are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NormalMode {
    /// Normals of the polyhedral surface (flat or smoothed by strategy).
    #[default]
    Polyhedron,
    /// The unit sphere normal at each vertex.
    Sphere,
}

/// Produces per-polygon vertex, index and normal data for one sphere.
pub trait MeshBuilder {
    /// The render-level sphere this builder reads.
    fn sphere(&self) -> &GeodesicSphere;

    /// Polyhedron-mode normals for polygon `polygon`, in vertex order.
    fn polyhedron_normals(&self, polygon: usize) -> Result<Vec<Vec3>, GeodesicError>;

    /// Center vertex followed by the ring vertices.
    fn polygon_vertices(&self, polygon: usize) -> Result<Vec<Vec3>, GeodesicError> {
        let sphere = self.sphere();
        let p = sphere.polygon(polygon)?;
        let corners = sphere.corner_positions();
        Ok(std::iter::once(p.center())
            .chain(p.corners().iter().map(|&c| corners[c]))
            .map(|v| v.as_vec3())
            .collect())
    }

    /// Normals for polygon `polygon` in the requested mode.
    fn polygon_normals(&self, polygon: usize, mode: NormalMode) -> Result<Vec<Vec3>, GeodesicError> {
        match mode {
            NormalMode::Polyhedron => self.polyhedron_normals(polygon),
            NormalMode::Sphere => Ok(self
                .polygon_vertices(polygon)?
                .into_iter()
                .map(Vec3::normalize)
                .collect()),
        }
    }

    /// Fan indices for a polygon whose block starts at `offset`.
    fn polygon_triangles(&self, offset: u32, sides: usize) -> Vec<u32> {
        fan_triangles(offset, sides)
    }
}

/// Triangle fan around a center vertex at `offset`, ring at `offset + 1..`.
pub fn fan_triangles(offset: u32, sides: usize) -> Vec<u32> {
    let sides = sides as u32;
    (0..sides)
        .flat_map(|i| [offset, offset + 1 + i, offset + 1 + (i + 1) % sides])
        .collect()
}

/// Doubled-area normal of fan triangle `slot` of `polygon`:
/// `(corner[slot] - center) x (corner[slot + 1] - center)`.
pub(crate) fn fan_cross(sphere: &GeodesicSphere, polygon: &Polygon, slot: usize) -> DVec3 {
    let corners = polygon.corners();
    let positions = sphere.corner_positions();
    let c = polygon.center();
    let a = positions[corners[slot]];
    let b = positions[corners[(slot + 1) % corners.len()]];
    (a - c).cross(b - c)
}

/// Unit normal of the polygon's fan, the sum of its fan triangle normals.
pub(crate) fn polygon_plane_normal(sphere: &GeodesicSphere, polygon: &Polygon) -> DVec3 {
    (0..polygon.sides())
        .map(|slot| fan_cross(sphere, polygon, slot))
        .fold(DVec3::ZERO, |acc, n| acc + n)
        .normalize_or_zero()
}

/// Assemble full polygon-face buffers for every polygon of the builder's
/// sphere. `colors` holds one color per polygon, copied to all of its
/// vertices.
pub fn build_polygon_mesh<B: MeshBuilder + ?Sized>(
    builder: &B,
    normals: NormalMode,
    colors: &[[f32; 4]],
) -> Result<SphereMesh, MeshError> {
    let sphere = builder.sphere();
    let count = sphere.polygon_count();
    if colors.len() != count {
        return Err(MeshError::ColorCountMismatch {
            expected: count,
            got: colors.len(),
        });
    }

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normal_buf: Vec<[f32; 3]> = Vec::new();
    let mut color_buf: Vec<[f32; 4]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (polygon, &color) in colors.iter().enumerate() {
        let sides = sphere.sides(polygon)?;
        indices.extend(builder.polygon_triangles(positions.len() as u32, sides));
        positions.extend(builder.polygon_vertices(polygon)?.iter().map(Vec3::to_array));
        normal_buf.extend(
            builder
                .polygon_normals(polygon, normals)?
                .iter()
                .map(Vec3::to_array),
        );
        color_buf.extend(std::iter::repeat_n(color, sides + 1));
    }

    let mesh = SphereMesh::new(positions, normal_buf, color_buf, indices, Primitive::Triangles);
    debug!(
        frequency = sphere.frequency(),
        vertices = mesh.vertex_count(),
        triangles = mesh.primitive_count(),
        index_width = ?mesh.indices.width(),
        "built polygon mesh"
    );
    Ok(mesh)
}
