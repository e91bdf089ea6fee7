//! Border and draw masks evaluated from a fixed snapshot of world state.
//!
//! A [`BorderMask`] is computed eagerly, so a mesh built from it does not
//! change when the hierarchy is later regenerated or its settings move.

use hashbrown::HashSet;
use polysphere_geodesic::GeodesicSphere;
use polysphere_mesh::BorderPredicate;

use crate::error::WorldError;
use crate::hierarchy::SphereHierarchy;
use crate::palette::Coloring;

/// Which discontinuity between two adjacent polygons counts as a border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderKind {
    /// The polygons belong to different regions at the data level.
    Region,
    /// Exactly one region is below sea level.
    Terrain,
    /// The edge survives to the data level with a ridge below the density.
    Ridge,
    /// The regions have different zones.
    Zone,
    /// [`BorderKind::Terrain`] or [`BorderKind::Ridge`].
    TerrainOrRidge,
}

/// The world parameters a mask is evaluated against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderSnapshot {
    /// Level whose tessellation is drawn.
    pub render_level: usize,
    /// Level whose data drives borders, at most `render_level`.
    pub data_level: usize,
    /// Sea level threshold.
    pub sea_level: f64,
    /// Edges with a ridge below this are ridge borders.
    pub ridge_density: f64,
}

impl BorderSnapshot {
    /// Snapshot `hierarchy`'s current sea level. `data_level` is clamped to
    /// `render_level`.
    pub fn new(
        hierarchy: &SphereHierarchy,
        render_level: usize,
        data_level: usize,
        ridge_density: f64,
    ) -> Self {
        Self {
            render_level,
            data_level: data_level.min(render_level),
            sea_level: hierarchy.settings().sea_level,
            ridge_density,
        }
    }
}

/// Per render-level polygon view of the data level.
struct Regions<'a> {
    render: &'a GeodesicSphere,
    data: &'a GeodesicSphere,
    region: Vec<usize>,
}

impl<'a> Regions<'a> {
    fn resolve(
        hierarchy: &'a SphereHierarchy,
        snapshot: &BorderSnapshot,
    ) -> Result<Self, WorldError> {
        let render = hierarchy.sphere(snapshot.render_level)?;
        let data_level = snapshot.data_level.min(snapshot.render_level);
        let data = hierarchy.sphere(data_level)?;
        let region = (0..render.polygon_count())
            .map(|p| hierarchy.polygon_index(p, snapshot.render_level, data_level))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            render,
            data,
            region,
        })
    }

    fn is_sea(&self, polygon: usize, sea_level: f64) -> Result<bool, WorldError> {
        Ok(self.data.polygon_data(self.region[polygon])?.height < sea_level)
    }

    /// Ridge strength of render edge `edge` at the data level, if it
    /// survives that far.
    fn coarse_ridge(
        &self,
        hierarchy: &SphereHierarchy,
        snapshot: &BorderSnapshot,
        edge: usize,
    ) -> Result<Option<f64>, WorldError> {
        let data_level = snapshot.data_level.min(snapshot.render_level);
        match hierarchy.edge_index(edge, snapshot.render_level, data_level)? {
            Some(coarse) => Ok(Some(self.data.edge_data(coarse)?.ridge)),
            None => Ok(None),
        }
    }
}

/// Render-level polygon pairs whose shared edge is a border.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BorderMask {
    pairs: HashSet<(usize, usize)>,
}

impl BorderMask {
    /// Evaluate `kind` for every edge of the render level.
    pub fn build(
        hierarchy: &SphereHierarchy,
        snapshot: &BorderSnapshot,
        kind: BorderKind,
    ) -> Result<Self, WorldError> {
        let regions = Regions::resolve(hierarchy, snapshot)?;
        let mut pairs = HashSet::new();

        for (index, edge) in regions.render.edges().iter().enumerate() {
            let [a, b] = edge.polygons();
            let terrain = || -> Result<bool, WorldError> {
                Ok(regions.is_sea(a, snapshot.sea_level)?
                    != regions.is_sea(b, snapshot.sea_level)?)
            };
            let ridge = || -> Result<bool, WorldError> {
                Ok(regions
                    .coarse_ridge(hierarchy, snapshot, index)?
                    .is_some_and(|r| r < snapshot.ridge_density))
            };
            let border = match kind {
                BorderKind::Region => regions.region[a] != regions.region[b],
                BorderKind::Terrain => terrain()?,
                BorderKind::Ridge => ridge()?,
                BorderKind::Zone => {
                    regions.data.zone(regions.region[a])? != regions.data.zone(regions.region[b])?
                }
                BorderKind::TerrainOrRidge => terrain()? || ridge()?,
            };
            if border {
                pairs.insert((a, b));
            }
        }

        Ok(Self { pairs })
    }

    /// Whether the pair is a border, in either order.
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&(a.min(b), a.max(b)))
    }

    /// Number of border edges.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no edge is a border.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl BorderPredicate for BorderMask {
    fn is_border(&self, a: usize, b: usize) -> bool {
        self.contains(a, b)
    }
}

/// Which render-level edges the edge skeleton draws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawMask {
    draw: Vec<bool>,
}

impl DrawMask {
    /// Edges shown under `coloring`: those that still separate two regions
    /// at the data level. Random coloring draws all of them, Terrain only
    /// those with a ridge below the density. Zones and White draw none.
    pub fn for_coloring(
        hierarchy: &SphereHierarchy,
        snapshot: &BorderSnapshot,
        coloring: Coloring,
    ) -> Result<Self, WorldError> {
        let render = hierarchy.sphere(snapshot.render_level)?;
        let draw = match coloring {
            Coloring::Zones | Coloring::White => vec![false; render.edge_count()],
            Coloring::Random | Coloring::Terrain => {
                let regions = Regions::resolve(hierarchy, snapshot)?;
                (0..render.edge_count())
                    .map(|edge| -> Result<bool, WorldError> {
                        let ridge = regions.coarse_ridge(hierarchy, snapshot, edge)?;
                        Ok(match coloring {
                            Coloring::Random => ridge.is_some(),
                            _ => ridge.is_some_and(|r| r < snapshot.ridge_density),
                        })
                    })
                    .collect::<Result<_, _>>()?
            }
        };
        Ok(Self { draw })
    }

    /// Whether edge `edge` is drawn.
    pub fn is_drawn(&self, edge: usize) -> bool {
        self.draw.get(edge).copied().unwrap_or(false)
    }

    /// Number of drawn edges.
    pub fn count(&self) -> usize {
        self.draw.iter().filter(|&&d| d).count()
    }
}
