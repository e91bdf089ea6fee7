//! Headless walkthroughs of the world pipeline, driven by [`Config`].

use polysphere_config::{ColoringMode, Config, EdgeTopology, GeneratorKind, NormalsMode};
use polysphere_mesh::{
    EdgeShape, EdgeStyle, FacetedBuilder, NormalMode, PolygonLayout, SmoothedBuilder, SphereMesh,
    as_bytes, build_edge_mesh, build_polygon_mesh,
};
use polysphere_terrain::{HeightGeneratorKind, NoiseSettings};
use polysphere_world::{
    BorderMask, BorderSnapshot, Coloring, DrawMask, SphereHierarchy, WorldError, WorldSettings,
    highlight_selection, polygon_colors, smoothing_border,
};
use tracing::{debug, info, warn};

/// Boxed error for the demo's fallible steps.
pub type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn coloring(mode: ColoringMode) -> Coloring {
    match mode {
        ColoringMode::Zones => Coloring::Zones,
        ColoringMode::Terrain => Coloring::Terrain,
        ColoringMode::Random => Coloring::Random,
        ColoringMode::White => Coloring::White,
    }
}

pub fn normal_mode(mode: NormalsMode) -> NormalMode {
    match mode {
        NormalsMode::Polyhedron => NormalMode::Polyhedron,
        NormalsMode::Sphere => NormalMode::Sphere,
    }
}

pub fn edge_style(config: &Config) -> EdgeStyle {
    let shape = match (config.view.edge_topology, config.view.smooth_edges) {
        (EdgeTopology::Lines, _) => EdgeShape::Line,
        (EdgeTopology::Bands, true) => EdgeShape::MiteredBand,
        (EdgeTopology::Bands, false) => EdgeShape::Band,
    };
    EdgeStyle {
        shape,
        half_width: config.view.edge_width * 0.5,
        lift: config.view.edge_lift,
    }
}

/// World settings from the terrain section with the resolved world seed.
pub fn world_settings(config: &Config, seed: u64) -> WorldSettings {
    let terrain = &config.terrain;
    WorldSettings {
        kind: match terrain.generator {
            GeneratorKind::UniformRandom => HeightGeneratorKind::UniformRandom,
            GeneratorKind::CoherentNoise => HeightGeneratorKind::CoherentNoise,
        },
        noise: NoiseSettings {
            seed_offset: terrain.noise.seed_offset,
            frequency: terrain.noise.frequency,
            octaves: terrain.noise.octaves,
            lacunarity: terrain.noise.lacunarity,
            persistence: terrain.noise.persistence,
        },
        sea_level: terrain.sea_level,
        seed,
    }
}

/// Number of polygons below sea level at `level`.
pub fn sea_count(hierarchy: &SphereHierarchy, level: usize) -> Result<usize, WorldError> {
    let sea = (0..hierarchy.sphere(level)?.polygon_count())
        .map(|p| hierarchy.region_is_sea(level, p))
        .collect::<Result<Vec<bool>, _>>()?;
    Ok(sea.into_iter().filter(|&s| s).count())
}

/// Build the hierarchy and generate its data.
pub fn demonstrate_hierarchy(config: &Config, settings: WorldSettings) -> DemoResult<SphereHierarchy> {
    let mut hierarchy = SphereHierarchy::new(&config.levels.frequencies, WorldSettings::default())?;
    let changed = hierarchy.update_settings(settings);
    hierarchy.regenerate();

    for level in 0..hierarchy.level_count() {
        let sphere = hierarchy.sphere(level)?;
        let sea = sea_count(&hierarchy, level)?;
        info!(
            level,
            frequency = sphere.frequency(),
            polygons = sphere.polygon_count(),
            edges = sphere.edge_count(),
            sea,
            "level"
        );
    }
    debug!(changed, seed = settings.seed, "applied settings");
    Ok(hierarchy)
}

/// Polygon mesh for the configured view.
pub fn demonstrate_polygon_mesh(
    hierarchy: &SphereHierarchy,
    snapshot: &BorderSnapshot,
    config: &Config,
) -> DemoResult<SphereMesh> {
    let coloring = coloring(config.view.coloring);
    let colors = polygon_colors(hierarchy, snapshot, coloring)?;
    let sphere = hierarchy.sphere(snapshot.render_level)?;
    let normals = normal_mode(config.view.normals);

    let mesh = if config.view.smooth_polygons {
        let mask = BorderMask::build(hierarchy, snapshot, smoothing_border(coloring))?;
        info!(
            kind = ?smoothing_border(coloring),
            borders = mask.len(),
            "smoothing polygons"
        );
        build_polygon_mesh(&SmoothedBuilder::new(sphere, mask), normals, &colors)?
    } else {
        build_polygon_mesh(&FacetedBuilder::new(sphere), normals, &colors)?
    };

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.primitive_count(),
        index_width = ?mesh.indices.width(),
        vertex_bytes = as_bytes(&mesh.interleaved()).len(),
        index_bytes = mesh.indices.as_bytes().len(),
        "polygon mesh"
    );
    Ok(mesh)
}

/// Edge skeleton for the configured view.
pub fn demonstrate_edge_mesh(
    hierarchy: &SphereHierarchy,
    snapshot: &BorderSnapshot,
    config: &Config,
) -> DemoResult<SphereMesh> {
    let draw = DrawMask::for_coloring(hierarchy, snapshot, coloring(config.view.coloring))?;
    let sphere = hierarchy.sphere(snapshot.render_level)?;
    let style = edge_style(config);
    let mesh = build_edge_mesh(sphere, &style, [0.0, 0.0, 0.0, 1.0], |e| draw.is_drawn(e));
    info!(
        drawn = draw.count(),
        shape = ?style.shape,
        primitives = mesh.primitive_count(),
        index_width = ?mesh.indices.width(),
        "edge mesh"
    );
    Ok(mesh)
}

/// Resolve a picked triangle to its polygon and highlight the neighbors.
pub fn demonstrate_picking(
    hierarchy: &SphereHierarchy,
    snapshot: &BorderSnapshot,
    mesh: &SphereMesh,
    triangle: usize,
) -> DemoResult<()> {
    let sphere = hierarchy.sphere(snapshot.render_level)?;
    let layout = PolygonLayout::new(sphere);
    let Some(polygon) = layout.polygon_for_triangle(triangle) else {
        warn!(triangle, triangles = layout.triangle_count(), "pick missed the mesh");
        return Ok(());
    };

    info!("{}", sphere.polygon_info(polygon)?);
    let (region, data) =
        hierarchy.region_data(polygon, snapshot.render_level, snapshot.data_level)?;
    info!(
        polygon,
        region,
        data_level = snapshot.data_level,
        height = data.height,
        zone = ?data.zone,
        "picked"
    );

    let mut colors = mesh.colors.clone();
    highlight_selection(&mut colors, sphere, &layout, polygon)?;
    let changed = colors.iter().zip(&mesh.colors).filter(|(a, b)| a != b).count();
    debug!(changed, "highlighted selection");
    Ok(())
}

/// Cross-level lookups on the picked polygon's edges.
pub fn demonstrate_edge_resolution(
    hierarchy: &SphereHierarchy,
    snapshot: &BorderSnapshot,
    triangle: usize,
) -> DemoResult<()> {
    let sphere = hierarchy.sphere(snapshot.render_level)?;
    let Some(polygon) = PolygonLayout::new(sphere).polygon_for_triangle(triangle) else {
        return Ok(());
    };
    for &edge in sphere.polygon(polygon)?.edges() {
        let coarse = hierarchy.edge_index(edge, snapshot.render_level, snapshot.data_level)?;
        match coarse {
            Some(coarse) => debug!(edge, coarse, "edge survives to data level"),
            None => debug!(edge, "edge interior to a region"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_style_mapping() {
        let mut config = Config::default();
        assert_eq!(edge_style(&config).shape, EdgeShape::MiteredBand);
        assert_eq!(edge_style(&config), EdgeStyle::default());
        config.view.smooth_edges = false;
        assert_eq!(edge_style(&config).shape, EdgeShape::Band);
        config.view.edge_topology = EdgeTopology::Lines;
        assert_eq!(edge_style(&config).shape, EdgeShape::Line);
    }

    #[test]
    fn test_world_settings_mapping() {
        let mut config = Config::default();
        config.terrain.generator = GeneratorKind::CoherentNoise;
        let settings = world_settings(&config, 42);
        assert_eq!(settings.kind, HeightGeneratorKind::CoherentNoise);
        assert_eq!(settings.noise, NoiseSettings::default());
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.sea_level, 0.7);
    }

    #[test]
    fn test_sea_count_propagates_errors() {
        let settings = WorldSettings {
            sea_level: 2.0,
            ..WorldSettings::default()
        };
        let mut hierarchy = SphereHierarchy::new(&[0, 1], settings).unwrap();
        assert!(matches!(
            sea_count(&hierarchy, 0),
            Err(WorldError::Geodesic(_))
        ));
        hierarchy.regenerate();
        assert_eq!(sea_count(&hierarchy, 0), Ok(12));
        assert_eq!(
            sea_count(&hierarchy, 5),
            Err(WorldError::LevelOutOfRange { level: 5, count: 2 })
        );
    }

    #[test]
    fn test_default_pipeline_runs() {
        let mut config = Config::default();
        config.levels.frequencies = vec![0, 1, 3];
        config.view.render_level = 2;
        config.view.coloring = ColoringMode::Random;
        let hierarchy = demonstrate_hierarchy(&config, world_settings(&config, 5)).unwrap();
        let snapshot = BorderSnapshot::new(&hierarchy, 2, 1, 0.1);
        let mesh = demonstrate_polygon_mesh(&hierarchy, &snapshot, &config).unwrap();
        let edges = demonstrate_edge_mesh(&hierarchy, &snapshot, &config).unwrap();
        assert!(!mesh.is_empty());
        assert!(!edges.is_empty());
        assert!(demonstrate_picking(&hierarchy, &snapshot, &mesh, 61).is_ok());
        assert!(demonstrate_edge_resolution(&hierarchy, &snapshot, 61).is_ok());
    }
}
