//! Closed-form vertex and triangle offsets of polygon meshes.
//!
//! Meshes from [`build_polygon_mesh`](crate::build_polygon_mesh) emit the
//! pentagons first (6 vertices, 5 triangles each) and then the hexagons
//! (7 vertices, 6 triangles each), so picking a triangle maps back to its
//! polygon without a lookup table.

use polysphere_geodesic::{GeodesicSphere, PENTAGON_COUNT};

const PENTAGON_VERTICES: usize = 6;
const HEXAGON_VERTICES: usize = 7;
const PENTAGON_TRIANGLES: usize = 5;
const HEXAGON_TRIANGLES: usize = 6;

/// Offsets into the buffers of a polygon mesh with `polygon_count` polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolygonLayout {
    polygon_count: usize,
}

impl PolygonLayout {
    /// Layout for a mesh of `sphere`.
    pub fn new(sphere: &GeodesicSphere) -> Self {
        Self::with_polygon_count(sphere.polygon_count())
    }

    /// Layout for a mesh of `polygon_count` polygons.
    pub fn with_polygon_count(polygon_count: usize) -> Self {
        Self { polygon_count }
    }

    /// Total vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.offset(self.polygon_count, PENTAGON_VERTICES, HEXAGON_VERTICES)
    }

    /// Total triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.offset(self.polygon_count, PENTAGON_TRIANGLES, HEXAGON_TRIANGLES)
    }

    fn offset(&self, polygon: usize, pentagon: usize, hexagon: usize) -> usize {
        if polygon < PENTAGON_COUNT {
            polygon * pentagon
        } else {
            PENTAGON_COUNT * pentagon + (polygon - PENTAGON_COUNT) * hexagon
        }
    }

    /// First vertex of polygon `polygon`, which is its center vertex.
    pub fn first_vertex(&self, polygon: usize) -> Option<usize> {
        (polygon < self.polygon_count)
            .then(|| self.offset(polygon, PENTAGON_VERTICES, HEXAGON_VERTICES))
    }

    /// Center vertex of polygon `polygon`.
    pub fn center_vertex(&self, polygon: usize) -> Option<usize> {
        self.first_vertex(polygon)
    }

    /// First triangle of polygon `polygon`.
    pub fn first_triangle(&self, polygon: usize) -> Option<usize> {
        (polygon < self.polygon_count)
            .then(|| self.offset(polygon, PENTAGON_TRIANGLES, HEXAGON_TRIANGLES))
    }

    /// Polygon owning triangle `triangle`.
    pub fn polygon_for_triangle(&self, triangle: usize) -> Option<usize> {
        if triangle >= self.triangle_count() {
            return None;
        }
        let pentagon_triangles = PENTAGON_COUNT * PENTAGON_TRIANGLES;
        Some(if triangle < pentagon_triangles {
            triangle / PENTAGON_TRIANGLES
        } else {
            (triangle - pentagon_triangles) / HEXAGON_TRIANGLES + PENTAGON_COUNT
        })
    }

    /// Polygon owning vertex `vertex`.
    pub fn polygon_for_vertex(&self, vertex: usize) -> Option<usize> {
        if vertex >= self.vertex_count() {
            return None;
        }
        let pentagon_vertices = PENTAGON_COUNT * PENTAGON_VERTICES;
        Some(if vertex < pentagon_vertices {
            vertex / PENTAGON_VERTICES
        } else {
            (vertex - pentagon_vertices) / HEXAGON_VERTICES + PENTAGON_COUNT
        })
    }
}
