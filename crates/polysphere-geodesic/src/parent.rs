//! Cross-level parent links: nearest-center search over a coarser sphere.

use glam::DVec3;

use crate::sphere::GeodesicSphere;

/// Dot-product difference below which two centers count as equidistant.
const TIE_EPSILON: f64 = 1e-9;

impl GeodesicSphere {
    /// Polygon whose center is nearest to `direction`.
    ///
    /// Greedy walk over the neighbor graph starting at `start`; the walk
    /// ends at the global nearest center because the polygon centers form a
    /// spherical Delaunay triangulation. Exact ties resolve to the lowest
    /// index, independent of `start`.
    #[must_use]
    pub fn nearest_polygon(&self, direction: DVec3, start: usize) -> usize {
        let polygons = self.polygons();
        let mut current = start.min(polygons.len() - 1);
        let mut best = polygons[current].center().dot(direction);

        loop {
            let mut step = None;
            for &n in polygons[current].neighbors() {
                let d = polygons[n].center().dot(direction);
                if d > best + TIE_EPSILON {
                    best = d;
                    step = Some(n);
                }
            }
            match step {
                Some(n) => current = n,
                None => break,
            }
        }

        polygons[current]
            .neighbors()
            .iter()
            .copied()
            .filter(|&n| (polygons[n].center().dot(direction) - best).abs() <= TIE_EPSILON)
            .fold(current, usize::min)
    }

    /// Link every polygon to the nearest polygon of `coarse`.
    ///
    /// Called once when a hierarchy is assembled; the links are topology and
    /// never change afterwards.
    pub fn link_parents(&mut self, coarse: &GeodesicSphere) {
        let mut hint = 0;
        let parents: Vec<usize> = self
            .polygons()
            .iter()
            .map(|polygon| {
                hint = coarse.nearest_polygon(polygon.center(), hint);
                hint
            })
            .collect();
        for (polygon, parent) in self.polygons_mut().iter_mut().zip(parents) {
            polygon.parent = Some(parent);
        }
    }
}
