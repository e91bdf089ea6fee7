//! Geodesic sphere tessellation: the Goldberg dual of a subdivided icosahedron.
//!
//! Each icosahedron edge is split into `frequency + 1` segments and every face
//! is filled with a triangular grid. The grid vertices, projected onto the
//! unit sphere, become polygon centers; the grid triangles become polygon
//! corners. The 12 icosahedron vertices are the pentagons (indices `0..12`),
//! every other grid vertex is a hexagon.

use std::fmt::Write as _;

use glam::DVec3;
use hashbrown::HashMap;
use rand::Rng;
use tracing::debug;

use crate::data::{EdgeData, HeightSource, PolygonData, ZoneType, polygon_stream};
use crate::error::GeodesicError;
use crate::icosahedron::{self, PENTAGON_COUNT};
use crate::seed::{COLOR_STREAM, RIDGE_STREAM, stream_rng};

/// One pentagonal or hexagonal cell of a [`GeodesicSphere`].
#[derive(Clone, Debug)]
pub struct Polygon {
    center: DVec3,
    neighbors: Vec<usize>,
    edges: Vec<usize>,
    corners: Vec<usize>,
    pub(crate) parent: Option<usize>,
}

impl Polygon {
    /// Unit direction of the polygon center.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Adjacent polygons, counter-clockwise around the outward normal,
    /// starting with the lowest index.
    #[must_use]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Edge shared with each neighbor, aligned with [`Self::neighbors`].
    #[must_use]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// Corner point indices. Corner `i` lies between neighbor `i` and
    /// neighbor `i + 1`.
    #[must_use]
    pub fn corners(&self) -> &[usize] {
        &self.corners
    }

    /// Number of sides: 5 or 6.
    #[must_use]
    pub fn sides(&self) -> usize {
        self.neighbors.len()
    }

    /// Containing polygon one level coarser, `None` on the coarsest level.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Position of `neighbor` within this polygon's ring.
    #[must_use]
    pub fn neighbor_slot(&self, neighbor: usize) -> Option<usize> {
        self.neighbors.iter().position(|&n| n == neighbor)
    }
}

/// An undirected adjacency between two polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    polygons: [usize; 2],
    corners: [usize; 2],
}

impl Edge {
    /// The two incident polygons, lower index first.
    #[must_use]
    pub fn polygons(&self) -> [usize; 2] {
        self.polygons
    }

    /// The two corner points bounding the physical edge.
    #[must_use]
    pub fn corners(&self) -> [usize; 2] {
        self.corners
    }
}

#[derive(Clone, Debug)]
struct SphereData {
    polygons: Vec<PolygonData>,
    edges: Vec<EdgeData>,
}

/// One resolution level: frozen topology plus regenerable region data.
#[derive(Clone, Debug)]
pub struct GeodesicSphere {
    frequency: u32,
    polygons: Vec<Polygon>,
    edges: Vec<Edge>,
    corners: Vec<DVec3>,
    data: Option<SphereData>,
}

/// Subdivided icosahedron: unit grid vertices and CCW grid triangles.
struct TriangleGrid {
    positions: Vec<DVec3>,
    triangles: Vec<[usize; 3]>,
}

impl TriangleGrid {
    fn build(segments: usize) -> Self {
        let n = segments;
        let ico = icosahedron::vertices();
        let faces = icosahedron::faces(&ico);
        let ico_edges = icosahedron::edges();
        let edge_slot: HashMap<(usize, usize), usize> = ico_edges
            .iter()
            .enumerate()
            .map(|(slot, &pair)| (pair, slot))
            .collect();

        let mut positions = Vec::with_capacity(10 * n * n + 2);
        positions.extend_from_slice(&ico);
        for &(a, b) in &ico_edges {
            for t in 1..n {
                positions.push(ico[a].lerp(ico[b], t as f64 / n as f64).normalize());
            }
        }

        // Grid vertex `t` steps from `a` toward `b` on an icosahedron edge.
        let edge_point = |a: usize, b: usize, t: usize| -> usize {
            let (lo, hi, step) = if a < b { (a, b, t) } else { (b, a, n - t) };
            PENTAGON_COUNT + edge_slot[&(lo, hi)] * (n - 1) + step - 1
        };

        let mut triangles = Vec::with_capacity(20 * n * n);
        for [a, b, c] in faces {
            // grid[i][j] is the vertex at a + i/n (b - a) + j/n (c - a).
            let mut grid: Vec<Vec<usize>> = Vec::with_capacity(n + 1);
            for i in 0..=n {
                let mut row = Vec::with_capacity(n + 1 - i);
                for j in 0..=(n - i) {
                    let id = if i == 0 && j == 0 {
                        a
                    } else if i == n {
                        b
                    } else if j == n {
                        c
                    } else if j == 0 {
                        edge_point(a, b, i)
                    } else if i == 0 {
                        edge_point(a, c, j)
                    } else if i + j == n {
                        edge_point(b, c, j)
                    } else {
                        let point = ico[a]
                            + (ico[b] - ico[a]) * (i as f64 / n as f64)
                            + (ico[c] - ico[a]) * (j as f64 / n as f64);
                        positions.push(point.normalize());
                        positions.len() - 1
                    };
                    row.push(id);
                }
                grid.push(row);
            }

            for i in 0..n {
                for j in 0..(n - i) {
                    triangles.push([grid[i][j], grid[i + 1][j], grid[i][j + 1]]);
                    if i + j + 1 < n {
                        triangles.push([grid[i + 1][j], grid[i + 1][j + 1], grid[i][j + 1]]);
                    }
                }
            }
        }

        Self {
            positions,
            triangles,
        }
    }
}

impl GeodesicSphere {
    /// Build the tessellation for `frequency` extra points per icosahedron
    /// edge.
    ///
    /// Produces `10 (frequency + 1)^2 + 2` polygons: 12 pentagons and
    /// `10 ((frequency + 1)^2 - 1)` hexagons. Frequency 0 is the
    /// dodecahedron. Fully deterministic.
    pub fn new(frequency: u32) -> Self {
        let grid = TriangleGrid::build(frequency as usize + 1);
        let count = grid.positions.len();

        let corners: Vec<DVec3> = grid
            .triangles
            .iter()
            .map(|&[a, b, c]| (grid.positions[a] + grid.positions[b] + grid.positions[c]).normalize())
            .collect();

        // For each vertex: (from, to, triangle) steps of its CCW fan.
        let mut fans: Vec<Vec<(usize, usize, usize)>> = vec![Vec::with_capacity(6); count];
        for (t, &[a, b, c]) in grid.triangles.iter().enumerate() {
            fans[a].push((b, c, t));
            fans[b].push((c, a, t));
            fans[c].push((a, b, t));
        }

        let mut polygons: Vec<Polygon> = Vec::with_capacity(count);
        for (center, fan) in grid.positions.iter().zip(&fans) {
            let mut neighbors = Vec::with_capacity(fan.len());
            let mut ring_corners = Vec::with_capacity(fan.len());
            let mut current = fan.iter().map(|&(from, _, _)| from).min().unwrap_or(0);
            while let Some(&(_, to, tri)) = fan.iter().find(|&&(from, _, _)| from == current) {
                neighbors.push(current);
                ring_corners.push(tri);
                current = to;
                if neighbors.len() == fan.len() {
                    break;
                }
            }
            debug_assert_eq!(neighbors.len(), fan.len());
            polygons.push(Polygon {
                center: *center,
                edges: vec![0; neighbors.len()],
                neighbors,
                corners: ring_corners,
                parent: None,
            });
        }

        // Edge ids in ascending (polygon, ring slot) order of the lower endpoint.
        let mut edges = Vec::with_capacity(grid.triangles.len() * 3 / 2);
        for p in 0..count {
            let sides = polygons[p].sides();
            for slot in 0..sides {
                let q = polygons[p].neighbors[slot];
                let edge = if p < q {
                    let prev = polygons[p].corners[(slot + sides - 1) % sides];
                    let next = polygons[p].corners[slot];
                    edges.push(Edge {
                        polygons: [p, q],
                        corners: [prev, next],
                    });
                    edges.len() - 1
                } else {
                    let back = polygons[q].neighbor_slot(p).unwrap_or(0);
                    polygons[q].edges[back]
                };
                polygons[p].edges[slot] = edge;
            }
        }

        debug!(
            frequency,
            polygons = polygons.len(),
            edges = edges.len(),
            corners = corners.len(),
            "built geodesic sphere"
        );

        Self {
            frequency,
            polygons,
            edges,
            corners,
            data: None,
        }
    }

    /// Subdivision frequency this sphere was built with.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Number of polygons.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Number of unique edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of shared corner points.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// All polygons in index order.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub(crate) fn polygons_mut(&mut self) -> &mut [Polygon] {
        &mut self.polygons
    }

    /// All edges in index order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All corner points in index order.
    #[must_use]
    pub fn corner_positions(&self) -> &[DVec3] {
        &self.corners
    }

    /// The polygon record at `index`.
    pub fn polygon(&self, index: usize) -> Result<&Polygon, GeodesicError> {
        self.polygons
            .get(index)
            .ok_or(GeodesicError::PolygonOutOfRange {
                index,
                count: self.polygons.len(),
            })
    }

    /// The edge record at `index`.
    pub fn edge(&self, index: usize) -> Result<&Edge, GeodesicError> {
        self.edges.get(index).ok_or(GeodesicError::EdgeOutOfRange {
            index,
            count: self.edges.len(),
        })
    }

    /// Number of sides of polygon `index`.
    pub fn sides(&self, index: usize) -> Result<usize, GeodesicError> {
        Ok(self.polygon(index)?.sides())
    }

    /// Ordered neighbors of polygon `index`.
    pub fn neighbors(&self, index: usize) -> Result<&[usize], GeodesicError> {
        Ok(self.polygon(index)?.neighbors())
    }

    /// Unit center direction of polygon `index`.
    pub fn center(&self, index: usize) -> Result<DVec3, GeodesicError> {
        Ok(self.polygon(index)?.center())
    }

    /// Parent polygon one level coarser.
    pub fn parent(&self, index: usize) -> Result<Option<usize>, GeodesicError> {
        Ok(self.polygon(index)?.parent())
    }

    /// Unit position of a corner point.
    pub fn corner_position(&self, index: usize) -> Result<DVec3, GeodesicError> {
        self.corners
            .get(index)
            .copied()
            .ok_or(GeodesicError::CornerOutOfRange {
                index,
                count: self.corners.len(),
            })
    }

    /// The two polygons incident to edge `index`, lower index first.
    pub fn edge_polygons(&self, index: usize) -> Result<[usize; 2], GeodesicError> {
        Ok(self.edge(index)?.polygons())
    }

    /// The two corner points bounding edge `index`.
    pub fn edge_corners(&self, index: usize) -> Result<[usize; 2], GeodesicError> {
        Ok(self.edge(index)?.corners())
    }

    /// Edge joining `a` and `b`, or `None` if they are not adjacent.
    pub fn edge_between(&self, a: usize, b: usize) -> Result<Option<usize>, GeodesicError> {
        let polygon = self.polygon(a)?;
        self.polygon(b)?;
        Ok(polygon.neighbor_slot(b).map(|slot| polygon.edges[slot]))
    }

    /// Whether [`Self::regenerate_data`] has run at least once.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Generated data for polygon `index`.
    pub fn polygon_data(&self, index: usize) -> Result<&PolygonData, GeodesicError> {
        self.polygon(index)?;
        let data = self.data.as_ref().ok_or(GeodesicError::InvalidState)?;
        Ok(&data.polygons[index])
    }

    /// Generated data for edge `index`.
    pub fn edge_data(&self, index: usize) -> Result<&EdgeData, GeodesicError> {
        self.edge(index)?;
        let data = self.data.as_ref().ok_or(GeodesicError::InvalidState)?;
        Ok(&data.edges[index])
    }

    /// Zone of polygon `index`.
    pub fn zone(&self, index: usize) -> Result<ZoneType, GeodesicError> {
        Ok(self.polygon_data(index)?.zone)
    }

    /// Resample every polygon and edge from `source`, replacing all
    /// previously generated data.
    ///
    /// Heights come from `source` at each polygon center. Colors and ridge
    /// strengths are drawn from streams seeded by `source.seed()` and this
    /// sphere's frequency, so they are reproducible per seed.
    pub fn regenerate_data<S: HeightSource + ?Sized>(&mut self, source: &S) {
        let seed = source.seed();
        let level_key = u64::from(self.frequency);

        let mut color_rng = stream_rng(seed, COLOR_STREAM | level_key);
        let polygons = self
            .polygons
            .iter()
            .enumerate()
            .map(|(index, polygon)| {
                let height = source
                    .height(polygon.center, polygon_stream(self.frequency, index))
                    .clamp(0.0, 1.0);
                PolygonData {
                    height,
                    zone: ZoneType::from_height(height),
                    color: [
                        color_rng.random::<f32>(),
                        color_rng.random::<f32>(),
                        color_rng.random::<f32>(),
                        1.0,
                    ],
                }
            })
            .collect();

        let mut ridge_rng = stream_rng(seed, RIDGE_STREAM | level_key);
        let edges = (0..self.edges.len())
            .map(|_| EdgeData {
                ridge: ridge_rng.random::<f64>(),
            })
            .collect();

        self.data = Some(SphereData { polygons, edges });
        debug!(frequency = self.frequency, seed, "regenerated sphere data");
    }

    /// Human-readable summary of polygon `index`, for debugging picks.
    pub fn polygon_info(&self, index: usize) -> Result<String, GeodesicError> {
        let polygon = self.polygon(index)?;
        let mut info = format!(
            "polygon {index} (frequency {}): {} sides, neighbors {:?}",
            self.frequency,
            polygon.sides(),
            polygon.neighbors()
        );
        if let Some(parent) = polygon.parent() {
            let _ = write!(info, ", parent {parent}");
        }
        if let Some(data) = &self.data {
            let d = &data.polygons[index];
            let _ = write!(info, ", height {:.3}, zone {:?}", d.height, d.zone);
        }
        Ok(info)
    }
}
