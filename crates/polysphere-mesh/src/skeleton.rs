//! Edge skeleton geometry: lines or thin bands drawn along polygon edges.
//!
//! A band straddles the great-circle chord between an edge's two corner
//! points and is lifted slightly off the unit sphere so it does not
//! z-fight with the polygon faces underneath.
//!
//! Band geometry depends only on the edge's own corners and the draw mask.
//! Mitered bands meet at every shared corner regardless of which border
//! predicate shaded the faces, so hiding a neighbor never moves a tip.

use glam::{DVec3, Vec3};
use polysphere_geodesic::GeodesicSphere;
use tracing::debug;

use crate::sphere_mesh::{Primitive, SphereMesh};

/// Triangle indices of a [`edge_band`] quad.
pub const BAND_TRIANGLES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Triangle indices of a [`edge_band_mitered`] hexagon, fanned from the
/// first tip.
pub const MITERED_BAND_TRIANGLES: [u32; 12] = [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5];

/// Geometry emitted per drawn edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeShape {
    /// One line segment between the corners.
    Line,
    /// A quad straddling the edge.
    Band,
    /// A hexagon with tips on the corners. Three bands meeting at a corner
    /// tile it without overlap.
    #[default]
    MiteredBand,
}

/// Shape and size of edge skeleton geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    /// Geometry kind.
    pub shape: EdgeShape,
    /// Half the band width, in unit-sphere units.
    pub half_width: f64,
    /// Height above the unit sphere.
    pub lift: f64,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            shape: EdgeShape::default(),
            half_width: 0.002,
            lift: 0.001,
        }
    }
}

impl EdgeStyle {
    /// Vertices emitted per edge.
    pub fn vertices_per_edge(&self) -> usize {
        match self.shape {
            EdgeShape::Line => 2,
            EdgeShape::Band => 4,
            EdgeShape::MiteredBand => 6,
        }
    }

    /// Indices relative to the edge's first vertex.
    pub fn local_indices(&self) -> &'static [u32] {
        match self.shape {
            EdgeShape::Line => &[0, 1],
            EdgeShape::Band => &BAND_TRIANGLES,
            EdgeShape::MiteredBand => &MITERED_BAND_TRIANGLES,
        }
    }

    /// Vertices for the edge between corner points `c0` and `c1`.
    pub fn edge_vertices(&self, c0: DVec3, c1: DVec3) -> Vec<Vec3> {
        match self.shape {
            EdgeShape::Line => edge_line(c0, c1, self.lift).to_vec(),
            EdgeShape::Band => edge_band(c0, c1, self.half_width, self.lift).to_vec(),
            EdgeShape::MiteredBand => {
                edge_band_mitered(c0, c1, self.half_width, self.lift).to_vec()
            }
        }
    }
}

fn lifted(p: DVec3, lift: f64) -> Vec3 {
    (p.normalize() * (1.0 + lift)).as_vec3()
}

/// Unit edge direction and the unit side vector tangent to the sphere at
/// the edge midpoint.
fn edge_frame(c0: DVec3, c1: DVec3) -> (DVec3, DVec3) {
    let mid = (c0 + c1).normalize();
    let dir = (c1 - c0).normalize();
    (dir, mid.cross(dir).normalize())
}

/// Two lifted endpoints.
pub fn edge_line(c0: DVec3, c1: DVec3, lift: f64) -> [Vec3; 2] {
    [lifted(c0, lift), lifted(c1, lift)]
}

/// Quad of half-width `half_width` straddling the edge, wound outward with
/// [`BAND_TRIANGLES`].
pub fn edge_band(c0: DVec3, c1: DVec3, half_width: f64, lift: f64) -> [Vec3; 4] {
    let (_, side) = edge_frame(c0, c1);
    let sw = side * half_width;
    [c0 + sw, c0 - sw, c1 - sw, c1 + sw].map(|p| lifted(p, lift))
}

/// Hexagon with tips at `c0` and `c1` and 30 degree miters, wound outward
/// with [`MITERED_BAND_TRIANGLES`].
pub fn edge_band_mitered(c0: DVec3, c1: DVec3, half_width: f64, lift: f64) -> [Vec3; 6] {
    let (dir, side) = edge_frame(c0, c1);
    let sw = side * half_width;
    let m = dir * (half_width / 3f64.sqrt());
    [c0, c0 + m - sw, c1 - m - sw, c1, c1 - m + sw, c0 + m + sw].map(|p| lifted(p, lift))
}

/// Build skeleton geometry for every edge of `sphere` where `draw` is true.
///
/// Normals point along the vertex direction and every vertex gets `color`.
pub fn build_edge_mesh(
    sphere: &GeodesicSphere,
    style: &EdgeStyle,
    color: [f32; 4],
    draw: impl Fn(usize) -> bool,
) -> SphereMesh {
    let corners = sphere.corner_positions();
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (index, edge) in sphere.edges().iter().enumerate() {
        if !draw(index) {
            continue;
        }
        let [c0, c1] = edge.corners().map(|c| corners[c]);
        let base = positions.len() as u32;
        indices.extend(style.local_indices().iter().map(|&i| base + i));
        positions.extend(style.edge_vertices(c0, c1).iter().map(Vec3::to_array));
    }

    let normals = positions
        .iter()
        .map(|&p| Vec3::from(p).normalize().to_array())
        .collect();
    let colors = vec![color; positions.len()];
    let primitive = match style.shape {
        EdgeShape::Line => Primitive::Lines,
        EdgeShape::Band | EdgeShape::MiteredBand => Primitive::Triangles,
    };
    let mesh = SphereMesh::new(positions, normals, colors, indices, primitive);
    debug!(
        frequency = sphere.frequency(),
        shape = ?style.shape,
        vertices = mesh.vertex_count(),
        "built edge mesh"
    );
    mesh
}
