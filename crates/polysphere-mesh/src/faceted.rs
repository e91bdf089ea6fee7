//! Flat-shaded polygon meshes: one plane normal per polygon.

use glam::Vec3;
use polysphere_geodesic::{GeodesicError, GeodesicSphere};

use crate::builder::{MeshBuilder, polygon_plane_normal};

/// Builds meshes where every vertex of a polygon carries that polygon's
/// plane normal.
#[derive(Clone, Copy, Debug)]
pub struct FacetedBuilder<'a> {
    sphere: &'a GeodesicSphere,
}

impl<'a> FacetedBuilder<'a> {
    /// Create a builder over `sphere`.
    pub fn new(sphere: &'a GeodesicSphere) -> Self {
        Self { sphere }
    }
}

impl MeshBuilder for FacetedBuilder<'_> {
    fn sphere(&self) -> &GeodesicSphere {
        self.sphere
    }

    fn polyhedron_normals(&self, polygon: usize) -> Result<Vec<Vec3>, GeodesicError> {
        let p = self.sphere.polygon(polygon)?;
        let normal = polygon_plane_normal(self.sphere, p).as_vec3();
        Ok(vec![normal; p.sides() + 1])
    }
}
