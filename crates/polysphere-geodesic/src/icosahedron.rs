//! The base icosahedron that every geodesic level subdivides.

use glam::DVec3;

/// Number of pentagons on every geodesic sphere (one per icosahedron vertex).
///
/// Pentagons always occupy polygon indices `0..PENTAGON_COUNT`.
pub const PENTAGON_COUNT: usize = 12;

/// Number of icosahedron edges.
pub(crate) const EDGE_COUNT: usize = 30;

const FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// The 12 icosahedron vertices projected onto the unit sphere.
pub(crate) fn vertices() -> [DVec3; PENTAGON_COUNT] {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    [
        DVec3::new(-1.0, phi, 0.0),
        DVec3::new(1.0, phi, 0.0),
        DVec3::new(-1.0, -phi, 0.0),
        DVec3::new(1.0, -phi, 0.0),
        DVec3::new(0.0, -1.0, phi),
        DVec3::new(0.0, 1.0, phi),
        DVec3::new(0.0, -1.0, -phi),
        DVec3::new(0.0, 1.0, -phi),
        DVec3::new(phi, 0.0, -1.0),
        DVec3::new(phi, 0.0, 1.0),
        DVec3::new(-phi, 0.0, -1.0),
        DVec3::new(-phi, 0.0, 1.0),
    ]
    .map(DVec3::normalize)
}

/// The 20 faces, each wound counter-clockwise when seen from outside.
pub(crate) fn faces(vertices: &[DVec3; PENTAGON_COUNT]) -> [[usize; 3]; 20] {
    FACES.map(|[a, b, c]| {
        let normal = (vertices[b] - vertices[a]).cross(vertices[c] - vertices[a]);
        if normal.dot(vertices[a] + vertices[b] + vertices[c]) < 0.0 {
            [a, c, b]
        } else {
            [a, b, c]
        }
    })
}

/// The 30 undirected edges as `(low, high)` pairs in ascending order.
pub(crate) fn edges() -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = FACES
        .iter()
        .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
        .map(|(a, b)| (a.min(b), a.max(b)))
        .collect();
    edges.sort_unstable();
    edges.dedup();
    debug_assert_eq!(edges.len(), EDGE_COUNT);
    edges
}
