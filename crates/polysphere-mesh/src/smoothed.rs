//! Border-aware smooth shading.
//!
//! Each ring vertex sits on a corner shared by three polygons. Its normal
//! averages the face normals of the polygons that belong to the same
//! smoothing group at that corner, where a border edge splits groups. The
//! sum runs over the group in ascending polygon order, so every polygon
//! that shares a group at a corner computes a bit-identical normal and the
//! mesh has no shading seams across non-border edges.

use glam::{DVec3, Vec3};
use polysphere_geodesic::{GeodesicError, GeodesicSphere};

use crate::border::BorderPredicate;
use crate::builder::{MeshBuilder, fan_cross};

/// Builds meshes whose normals are shared across non-border edges.
#[derive(Clone, Debug)]
pub struct SmoothedBuilder<'a, P> {
    sphere: &'a GeodesicSphere,
    border: P,
}

impl<'a, P: BorderPredicate> SmoothedBuilder<'a, P> {
    /// Create a builder over `sphere` with border predicate `border`.
    pub fn new(sphere: &'a GeodesicSphere, border: P) -> Self {
        Self { sphere, border }
    }

    /// The border predicate in use.
    pub fn border(&self) -> &P {
        &self.border
    }

    fn is_border(&self, a: usize, b: usize) -> bool {
        self.border.is_border(a.min(b), a.max(b))
    }

    /// Polygons whose shading merges with `polygon` at ring corner `slot`,
    /// sorted ascending.
    ///
    /// The corner touches `polygon` and its neighbors `a = n[slot]` and
    /// `b = n[slot + 1]`. A neighbor joins when its edge with `polygon` is
    /// not a border, or when it is reachable around the corner through the
    /// third polygon without crossing a border.
    fn smoothing_group(&self, polygon: usize, neighbors: &[usize], slot: usize) -> Vec<usize> {
        let a = neighbors[slot];
        let b = neighbors[(slot + 1) % neighbors.len()];
        let mut group = vec![polygon];
        if !self.is_border(polygon, a) || (!self.is_border(polygon, b) && !self.is_border(a, b)) {
            group.push(a);
        }
        if !self.is_border(polygon, b) || (!self.is_border(polygon, a) && !self.is_border(a, b)) {
            group.push(b);
        }
        group.sort_unstable();
        group
    }

    /// Area-weighted normal contribution of `polygon` at `corner`: the sum
    /// of its two fan triangles touching that corner.
    fn corner_weight(&self, polygon: usize, corner: usize) -> Result<DVec3, GeodesicError> {
        let p = self.sphere.polygon(polygon)?;
        let Some(slot) = p.corners().iter().position(|&c| c == corner) else {
            return Err(GeodesicError::CornerOutOfRange {
                index: corner,
                count: self.sphere.corner_count(),
            });
        };
        let previous = (slot + p.sides() - 1) % p.sides();
        Ok(fan_cross(self.sphere, p, previous) + fan_cross(self.sphere, p, slot))
    }
}

impl<P: BorderPredicate> MeshBuilder for SmoothedBuilder<'_, P> {
    fn sphere(&self) -> &GeodesicSphere {
        self.sphere
    }

    fn polyhedron_normals(&self, polygon: usize) -> Result<Vec<Vec3>, GeodesicError> {
        let p = self.sphere.polygon(polygon)?;
        let center = (0..p.sides())
            .map(|slot| fan_cross(self.sphere, p, slot))
            .fold(DVec3::ZERO, |acc, n| acc + n)
            .normalize_or_zero();

        let mut normals = Vec::with_capacity(p.sides() + 1);
        normals.push(center.as_vec3());
        for (slot, &corner) in p.corners().iter().enumerate() {
            let mut sum = DVec3::ZERO;
            for member in self.smoothing_group(polygon, p.neighbors(), slot) {
                sum += self.corner_weight(member, corner)?;
            }
            normals.push(sum.normalize_or_zero().as_vec3());
        }
        Ok(normals)
    }
}
