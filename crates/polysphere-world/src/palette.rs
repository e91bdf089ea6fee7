//! Polygon coloring modes and selection highlighting.

use polysphere_geodesic::GeodesicSphere;
use polysphere_mesh::PolygonLayout;

use crate::border::{BorderKind, BorderSnapshot};
use crate::error::WorldError;
use crate::hierarchy::SphereHierarchy;

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 0.92, 0.016, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const WHITE: [f32; 4] = [1.0; 4];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Zone colors indexed by [`ZoneType::index`](polysphere_geodesic::ZoneType::index).
const ZONE_COLORS: [[f32; 4]; 3] = [RED, YELLOW, GREEN];

/// Marker colors for the neighbors of a selected polygon, in ring order.
pub const NEIGHBOR_COLORS: [[f32; 4]; 6] = [RED, WHITE, WHITE, CYAN, BLUE, MAGENTA];

/// How render-level polygons are colored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Coloring {
    /// One color per zone.
    #[default]
    Zones,
    /// Blue sea, green land.
    Terrain,
    /// The region's random display color.
    Random,
    /// Everything white.
    White,
}

impl Coloring {
    /// All modes in cycling order.
    pub const ALL: [Coloring; 4] = [
        Coloring::Zones,
        Coloring::Terrain,
        Coloring::Random,
        Coloring::White,
    ];

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Coloring {
        match self {
            Coloring::Zones => Coloring::Terrain,
            Coloring::Terrain => Coloring::Random,
            Coloring::Random => Coloring::White,
            Coloring::White => Coloring::Zones,
        }
    }
}

/// Border kind that polygon smoothing should respect under `coloring`, so
/// creases line up with color boundaries.
pub fn smoothing_border(coloring: Coloring) -> BorderKind {
    match coloring {
        Coloring::Random => BorderKind::Region,
        Coloring::Terrain => BorderKind::TerrainOrRidge,
        Coloring::Zones | Coloring::White => BorderKind::Zone,
    }
}

/// One color per render-level polygon, taken from its region at the data
/// level.
pub fn polygon_colors(
    hierarchy: &SphereHierarchy,
    snapshot: &BorderSnapshot,
    coloring: Coloring,
) -> Result<Vec<[f32; 4]>, WorldError> {
    let render = hierarchy.sphere(snapshot.render_level)?;
    (0..render.polygon_count())
        .map(|polygon| {
            let (_, data) =
                hierarchy.region_data(polygon, snapshot.render_level, snapshot.data_level)?;
            Ok(match coloring {
                Coloring::Zones => ZONE_COLORS[data.zone.index()],
                Coloring::Terrain if data.height < snapshot.sea_level => BLUE,
                Coloring::Terrain => GREEN,
                Coloring::Random => data.color,
                Coloring::White => WHITE,
            })
        })
        .collect()
}

/// Mark `polygon`'s center vertex black and each neighbor's center with
/// [`NEIGHBOR_COLORS`] in a per-vertex color buffer laid out by `layout`.
pub fn highlight_selection(
    colors: &mut [[f32; 4]],
    sphere: &GeodesicSphere,
    layout: &PolygonLayout,
    polygon: usize,
) -> Result<(), WorldError> {
    let neighbors = sphere.neighbors(polygon)?;
    let marks = std::iter::once((polygon, BLACK))
        .chain(neighbors.iter().copied().zip(NEIGHBOR_COLORS));
    for (p, color) in marks {
        if let Some(slot) = layout.center_vertex(p).and_then(|v| colors.get_mut(v)) {
            *slot = color;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldSettings;

    fn world() -> SphereHierarchy {
        let settings = WorldSettings {
            sea_level: 0.5,
            seed: 3,
            ..WorldSettings::default()
        };
        let mut h = SphereHierarchy::new(&[0, 1, 3], settings).unwrap();
        h.regenerate();
        h
    }

    #[test]
    fn test_cycle_visits_every_mode() {
        let mut mode = Coloring::default();
        for expected in Coloring::ALL {
            assert_eq!(mode, expected);
            mode = mode.next();
        }
        assert_eq!(mode, Coloring::Zones);
    }

    #[test]
    fn test_smoothing_border_by_mode() {
        assert_eq!(smoothing_border(Coloring::Random), BorderKind::Region);
        assert_eq!(smoothing_border(Coloring::Terrain), BorderKind::TerrainOrRidge);
        assert_eq!(smoothing_border(Coloring::Zones), BorderKind::Zone);
        assert_eq!(smoothing_border(Coloring::White), BorderKind::Zone);
    }

    #[test]
    fn test_terrain_colors_follow_sea() {
        let h = world();
        let snap = BorderSnapshot::new(&h, 2, 2, 0.1);
        let colors = polygon_colors(&h, &snap, Coloring::Terrain).unwrap();
        assert_eq!(colors.len(), h.sphere(2).unwrap().polygon_count());
        for (p, color) in colors.iter().enumerate() {
            let expected = if h.region_is_sea(2, p).unwrap() { BLUE } else { GREEN };
            assert_eq!(*color, expected);
        }
    }

    #[test]
    fn test_random_colors_shared_within_region() {
        let h = world();
        let snap = BorderSnapshot::new(&h, 2, 0, 0.1);
        let colors = polygon_colors(&h, &snap, Coloring::Random).unwrap();
        for p in 0..colors.len() {
            let region = h.polygon_index(p, 2, 0).unwrap();
            let expected = h.sphere(0).unwrap().polygon_data(region).unwrap().color;
            assert_eq!(colors[p], expected);
        }
    }

    #[test]
    fn test_zone_colors() {
        let h = world();
        let snap = BorderSnapshot::new(&h, 1, 1, 0.1);
        let colors = polygon_colors(&h, &snap, Coloring::Zones).unwrap();
        let sphere = h.sphere(1).unwrap();
        for (p, color) in colors.iter().enumerate() {
            assert_eq!(*color, ZONE_COLORS[sphere.zone(p).unwrap().index()]);
        }
    }

    #[test]
    fn test_highlight_selection() {
        let h = world();
        let sphere = h.sphere(1).unwrap();
        let layout = PolygonLayout::new(sphere);
        let mut colors = vec![WHITE; layout.vertex_count()];
        highlight_selection(&mut colors, sphere, &layout, 15).unwrap();
        assert_eq!(colors[layout.center_vertex(15).unwrap()], BLACK);
        let first = sphere.neighbors(15).unwrap()[0];
        assert_eq!(colors[layout.center_vertex(first).unwrap()], RED);
        assert!(highlight_selection(&mut colors, sphere, &layout, 999).is_err());
    }
}
