//! End-to-end properties of the hierarchy and the meshes built from it.

use polysphere_mesh::{
    BorderPredicate, EdgeStyle, FacetedBuilder, MeshBuilder, NormalMode, SmoothedBuilder,
    SphereMesh, build_edge_mesh, build_polygon_mesh,
};
use polysphere_terrain::HeightGeneratorKind;
use polysphere_world::{
    BorderKind, BorderMask, BorderSnapshot, Coloring, DrawMask, SphereHierarchy, WorldSettings,
    polygon_colors, smoothing_border,
};

fn settings(seed: u64, sea_level: f64) -> WorldSettings {
    WorldSettings {
        seed,
        sea_level,
        ..WorldSettings::default()
    }
}

fn heights(h: &SphereHierarchy, level: usize) -> Vec<f64> {
    let sphere = h.sphere(level).unwrap();
    (0..sphere.polygon_count())
        .map(|p| sphere.polygon_data(p).unwrap().height)
        .collect()
}

#[test]
fn ancestor_resolution_is_transitive() {
    let mut h = SphereHierarchy::new(&[0, 1, 3, 7], settings(1, 0.5)).unwrap();
    h.regenerate();
    let finest = h.level_count() - 1;
    for p in 0..h.sphere(finest).unwrap().polygon_count() {
        for coarse in 0..=finest {
            let direct = h.polygon_index(p, finest, coarse).unwrap();
            for mid in coarse..=finest {
                let via = h.polygon_index(p, finest, mid).unwrap();
                assert_eq!(h.polygon_index(via, mid, coarse).unwrap(), direct);
            }
        }
    }
}

#[test]
fn lost_edges_stay_lost() {
    let h = SphereHierarchy::new(&[0, 1, 3, 7], settings(1, 0.5)).unwrap();
    let finest = h.level_count() - 1;
    for e in 0..h.sphere(finest).unwrap().edge_count() {
        let mut lost = false;
        for coarse in (0..finest).rev() {
            let resolved = h.edge_index(e, finest, coarse).unwrap();
            if lost {
                assert_eq!(resolved, None);
            }
            lost |= resolved.is_none();
        }
    }
}

#[test]
fn seed_42_regenerates_identically() {
    let mut h = SphereHierarchy::new(&[0, 1, 3], settings(42, 0.5)).unwrap();
    h.regenerate();
    let first: Vec<Vec<f64>> = (0..3).map(|l| heights(&h, l)).collect();
    h.regenerate();
    let second: Vec<Vec<f64>> = (0..3).map(|l| heights(&h, l)).collect();
    assert_eq!(first, second);

    let level0 = h.sphere(0).unwrap();
    for i in 0..level0.polygon_count() {
        let height = level0.polygon_data(i).unwrap().height;
        assert_eq!(h.region_is_sea(0, i).unwrap(), height < 0.5);
    }
}

fn build_all(seed: u64) -> (SphereMesh, SphereMesh) {
    let mut h = SphereHierarchy::new(&[0, 1, 3, 7], settings(seed, 0.5)).unwrap();
    h.update_settings(WorldSettings {
        kind: HeightGeneratorKind::CoherentNoise,
        ..*h.settings()
    });
    h.regenerate();

    let snap = BorderSnapshot::new(&h, 3, 1, 0.3);
    let coloring = Coloring::Terrain;
    let mask = BorderMask::build(&h, &snap, smoothing_border(coloring)).unwrap();
    let colors = polygon_colors(&h, &snap, coloring).unwrap();
    let sphere = h.sphere(3).unwrap();
    let faces = build_polygon_mesh(
        &SmoothedBuilder::new(sphere, mask),
        NormalMode::Polyhedron,
        &colors,
    )
    .unwrap();
    let draw = DrawMask::for_coloring(&h, &snap, coloring).unwrap();
    let edges = build_edge_mesh(sphere, &EdgeStyle::default(), [0.0, 0.0, 0.0, 1.0], |e| {
        draw.is_drawn(e)
    });
    (faces, edges)
}

#[test]
fn meshes_are_bit_identical_across_runs() {
    let (faces_a, edges_a) = build_all(42);
    let (faces_b, edges_b) = build_all(42);
    assert_eq!(faces_a, faces_b);
    assert_eq!(edges_a, edges_b);
    assert_eq!(faces_a.indices.as_bytes(), faces_b.indices.as_bytes());
}

#[test]
fn smoothed_mesh_shares_vertices_across_non_borders() {
    let mut h = SphereHierarchy::new(&[0, 1, 3], settings(5, 0.5)).unwrap();
    h.regenerate();
    let snap = BorderSnapshot::new(&h, 2, 0, 0.1);
    let mask = BorderMask::build(&h, &snap, BorderKind::Region).unwrap();
    let sphere = h.sphere(2).unwrap();
    let builder = SmoothedBuilder::new(sphere, mask.clone());

    let ring = |p: usize, corner: usize| {
        let slot = sphere
            .polygon(p)
            .unwrap()
            .corners()
            .iter()
            .position(|&c| c == corner)
            .unwrap();
        let verts = builder.polygon_vertices(p).unwrap();
        let normals = builder.polygon_normals(p, NormalMode::Polyhedron).unwrap();
        (verts[slot + 1].to_array(), normals[slot + 1].to_array())
    };

    let mut creased = 0;
    for edge in sphere.edges() {
        let [p, q] = edge.polygons();
        for corner in edge.corners() {
            let (pos_p, normal_p) = ring(p, corner);
            let (pos_q, normal_q) = ring(q, corner);
            assert_eq!(pos_p, pos_q);
            if !mask.is_border(p, q) {
                assert_eq!(normal_p, normal_q);
            } else if normal_p != normal_q {
                creased += 1;
            }
        }
    }
    assert!(creased > 0);
}

#[test]
fn faceted_and_smoothed_share_layout() {
    let mut h = SphereHierarchy::new(&[0, 3], settings(8, 0.5)).unwrap();
    h.regenerate();
    let sphere = h.sphere(1).unwrap();
    let colors = vec![[1.0; 4]; sphere.polygon_count()];
    let flat = build_polygon_mesh(&FacetedBuilder::new(sphere), NormalMode::Polyhedron, &colors)
        .unwrap();
    let snap = BorderSnapshot::new(&h, 1, 0, 0.1);
    let mask = BorderMask::build(&h, &snap, BorderKind::Zone).unwrap();
    let smooth =
        build_polygon_mesh(&SmoothedBuilder::new(sphere, mask), NormalMode::Polyhedron, &colors)
            .unwrap();
    assert_eq!(flat.positions, smooth.positions);
    assert_eq!(flat.indices, smooth.indices);
    assert_ne!(flat.normals, smooth.normals);
}
