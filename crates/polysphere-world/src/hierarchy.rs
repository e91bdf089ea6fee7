//! Ordered geodesic levels with parent links between consecutive levels.

use polysphere_geodesic::{GeodesicError, GeodesicSphere, PolygonData};
use polysphere_terrain::HeightField;
use tracing::{debug, info};

use crate::error::WorldError;
use crate::settings::WorldSettings;

/// Levels `0..count`, coarsest first, plus the active height field.
///
/// Every polygon at level `L > 0` links to the level `L - 1` polygon whose
/// center is nearest, so any fine polygon resolves to a single region at
/// every coarser level.
#[derive(Clone)]
pub struct SphereHierarchy {
    levels: Vec<GeodesicSphere>,
    settings: WorldSettings,
    field: HeightField,
}

impl SphereHierarchy {
    /// Build one level per frequency and link parents level by level.
    ///
    /// `frequencies` must be non-empty and strictly increasing. Data is not
    /// generated until [`Self::regenerate`].
    pub fn new(frequencies: &[u32], settings: WorldSettings) -> Result<Self, WorldError> {
        if frequencies.is_empty() || frequencies.windows(2).any(|w| w[0] >= w[1]) {
            return Err(WorldError::InvalidFrequencies(frequencies.to_vec()));
        }

        let mut levels: Vec<GeodesicSphere> = Vec::with_capacity(frequencies.len());
        for &frequency in frequencies {
            let mut sphere = GeodesicSphere::new(frequency);
            if let Some(coarse) = levels.last() {
                sphere.link_parents(coarse);
            }
            levels.push(sphere);
        }

        info!(
            levels = levels.len(),
            finest_polygons = levels.last().map_or(0, GeodesicSphere::polygon_count),
            "built sphere hierarchy"
        );
        Ok(Self {
            levels,
            field: settings.height_field(),
            settings,
        })
    }

    /// `count` levels at frequencies `2^i - 1`.
    pub fn with_default_levels(count: usize, settings: WorldSettings) -> Result<Self, WorldError> {
        let frequencies: Option<Vec<u32>> = (0..count)
            .map(|i| {
                u32::try_from(i)
                    .ok()
                    .and_then(|i| 1u32.checked_shl(i))
                    .map(|f| f - 1)
            })
            .collect();
        match frequencies {
            Some(frequencies) => Self::new(&frequencies, settings),
            None => Err(WorldError::InvalidFrequencies(Vec::new())),
        }
    }

    /// Number of levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Sphere at `level`.
    pub fn sphere(&self, level: usize) -> Result<&GeodesicSphere, WorldError> {
        self.levels.get(level).ok_or(WorldError::LevelOutOfRange {
            level,
            count: self.levels.len(),
        })
    }

    /// Active settings.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Active height field.
    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Replace the settings, rebuilding the height field when needed.
    ///
    /// Returns `true` if anything held changed, i.e. the host should
    /// regenerate or recolor.
    pub fn update_settings(&mut self, next: WorldSettings) -> bool {
        let change = self.settings.diff(&next);
        if change.rebuild_field {
            self.field = next.height_field();
        }
        self.settings = next;
        debug!(?change, "updated world settings");
        change.changed()
    }

    /// Resample every level from the active height field.
    pub fn regenerate(&mut self) {
        for sphere in &mut self.levels {
            sphere.regenerate_data(&self.field);
        }
        info!(
            seed = self.settings.seed,
            kind = ?self.field.kind(),
            "regenerated world"
        );
    }

    fn check_levels(&self, fine: usize, coarse: usize) -> Result<(), WorldError> {
        self.sphere(fine)?;
        self.sphere(coarse)?;
        if coarse > fine {
            return Err(WorldError::InvalidLevelOrdering { fine, coarse });
        }
        Ok(())
    }

    /// Ancestor of polygon `polygon` at level `coarse`.
    pub fn polygon_index(
        &self,
        polygon: usize,
        fine: usize,
        coarse: usize,
    ) -> Result<usize, WorldError> {
        self.check_levels(fine, coarse)?;
        self.levels[fine].polygon(polygon)?;

        let mut polygon = polygon;
        for level in (coarse + 1..=fine).rev() {
            polygon = self.levels[level]
                .parent(polygon)?
                .ok_or(GeodesicError::InvalidState)?;
        }
        Ok(polygon)
    }

    /// Edge at level `coarse` that edge `edge` at level `fine` coarsens to.
    ///
    /// Each step maps both incident polygons to their parents. The edge
    /// survives only while the parents differ and are adjacent; once it
    /// falls inside a single region the result is `None` for every coarser
    /// level.
    pub fn edge_index(
        &self,
        edge: usize,
        fine: usize,
        coarse: usize,
    ) -> Result<Option<usize>, WorldError> {
        self.check_levels(fine, coarse)?;
        self.levels[fine].edge(edge)?;

        let mut edge = edge;
        for level in (coarse + 1..=fine).rev() {
            let sphere = &self.levels[level];
            let [a, b] = sphere.edge_polygons(edge)?;
            let pa = sphere.parent(a)?.ok_or(GeodesicError::InvalidState)?;
            let pb = sphere.parent(b)?.ok_or(GeodesicError::InvalidState)?;
            if pa == pb {
                return Ok(None);
            }
            match self.levels[level - 1].edge_between(pa, pb)? {
                Some(parent_edge) => edge = parent_edge,
                None => return Ok(None),
            }
        }
        Ok(Some(edge))
    }

    /// Whether polygon `polygon` at `level` lies below sea level.
    pub fn region_is_sea(&self, level: usize, polygon: usize) -> Result<bool, WorldError> {
        let data = self.sphere(level)?.polygon_data(polygon)?;
        Ok(data.height < self.settings.sea_level)
    }

    /// Region and data of render-level polygon `polygon` at `data_level`,
    /// which is clamped to `render_level`.
    pub fn region_data(
        &self,
        polygon: usize,
        render_level: usize,
        data_level: usize,
    ) -> Result<(usize, &PolygonData), WorldError> {
        let data_level = data_level.min(render_level);
        let region = self.polygon_index(polygon, render_level, data_level)?;
        Ok((region, self.levels[data_level].polygon_data(region)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polysphere_terrain::HeightGeneratorKind;

    fn hierarchy() -> SphereHierarchy {
        let mut h = SphereHierarchy::new(&[0, 1, 3], WorldSettings::default()).unwrap();
        h.regenerate();
        h
    }

    #[test]
    fn test_rejects_bad_frequencies() {
        let s = WorldSettings::default();
        assert!(matches!(
            SphereHierarchy::new(&[], s),
            Err(WorldError::InvalidFrequencies(_))
        ));
        assert!(matches!(
            SphereHierarchy::new(&[1, 1], s),
            Err(WorldError::InvalidFrequencies(_))
        ));
        assert!(matches!(
            SphereHierarchy::new(&[3, 1], s),
            Err(WorldError::InvalidFrequencies(_))
        ));
    }

    #[test]
    fn test_default_levels() {
        let h = SphereHierarchy::with_default_levels(4, WorldSettings::default()).unwrap();
        let freqs: Vec<u32> = (0..4).map(|l| h.sphere(l).unwrap().frequency()).collect();
        assert_eq!(freqs, vec![0, 1, 3, 7]);
        assert!(SphereHierarchy::with_default_levels(0, WorldSettings::default()).is_err());
    }

    #[test]
    fn test_level_out_of_range() {
        let h = hierarchy();
        assert_eq!(
            h.sphere(3).err(),
            Some(WorldError::LevelOutOfRange { level: 3, count: 3 })
        );
        assert!(h.polygon_index(0, 5, 0).is_err());
    }

    #[test]
    fn test_polygon_index_one_step_is_parent() {
        let h = hierarchy();
        for level in 1..h.level_count() {
            let sphere = h.sphere(level).unwrap();
            for p in 0..sphere.polygon_count() {
                assert_eq!(
                    h.polygon_index(p, level, level - 1).unwrap(),
                    sphere.parent(p).unwrap().unwrap()
                );
                assert_eq!(h.polygon_index(p, level, level).unwrap(), p);
            }
        }
    }

    #[test]
    fn test_polygon_index_rejects_inverted_levels() {
        let h = hierarchy();
        assert_eq!(
            h.polygon_index(0, 0, 2),
            Err(WorldError::InvalidLevelOrdering { fine: 0, coarse: 2 })
        );
        assert_eq!(
            h.edge_index(0, 1, 2),
            Err(WorldError::InvalidLevelOrdering { fine: 1, coarse: 2 })
        );
    }

    #[test]
    fn test_polygon_out_of_range() {
        let h = hierarchy();
        assert!(matches!(
            h.polygon_index(10_000, 2, 0),
            Err(WorldError::Geodesic(GeodesicError::PolygonOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_edge_index_out_of_range() {
        let h = hierarchy();
        assert_eq!(
            h.edge_index(99_999, 2, 0),
            Err(WorldError::Geodesic(GeodesicError::EdgeOutOfRange {
                index: 99_999,
                count: 480,
            }))
        );
        assert_eq!(
            h.edge_index(0, 7, 0),
            Err(WorldError::LevelOutOfRange { level: 7, count: 3 })
        );
    }

    #[test]
    fn test_region_is_sea_out_of_range() {
        let h = hierarchy();
        assert_eq!(
            h.region_is_sea(0, 12),
            Err(WorldError::Geodesic(GeodesicError::PolygonOutOfRange {
                index: 12,
                count: 12,
            }))
        );
        assert_eq!(
            h.region_is_sea(7, 0),
            Err(WorldError::LevelOutOfRange { level: 7, count: 3 })
        );
    }

    #[test]
    fn test_interior_edge_has_no_coarse_edge() {
        let h = hierarchy();
        let sphere = h.sphere(2).unwrap();
        let mut interior = 0;
        for (e, edge) in sphere.edges().iter().enumerate() {
            let [a, b] = edge.polygons();
            if sphere.parent(a).unwrap() == sphere.parent(b).unwrap() {
                interior += 1;
                assert_eq!(h.edge_index(e, 2, 1).unwrap(), None);
                assert_eq!(h.edge_index(e, 2, 0).unwrap(), None);
            }
        }
        assert!(interior > 0);
    }

    #[test]
    fn test_surviving_edge_joins_parents() {
        let h = hierarchy();
        let fine = h.sphere(2).unwrap();
        let coarse = h.sphere(1).unwrap();
        let mut survived = 0;
        for e in 0..fine.edge_count() {
            if let Some(ce) = h.edge_index(e, 2, 1).unwrap() {
                survived += 1;
                let [a, b] = fine.edge_polygons(e).unwrap();
                let mut parents = [
                    h.polygon_index(a, 2, 1).unwrap(),
                    h.polygon_index(b, 2, 1).unwrap(),
                ];
                parents.sort_unstable();
                assert_eq!(coarse.edge_polygons(ce).unwrap(), parents);
            }
        }
        assert!(survived > 0);
        assert_eq!(h.edge_index(7, 2, 2).unwrap(), Some(7));
    }

    #[test]
    fn test_region_is_sea_before_regenerate() {
        let h = SphereHierarchy::new(&[0, 1], WorldSettings::default()).unwrap();
        assert_eq!(
            h.region_is_sea(0, 0),
            Err(WorldError::Geodesic(GeodesicError::InvalidState))
        );
    }

    #[test]
    fn test_update_settings_rebuilds_field() {
        let mut h = hierarchy();
        let s = *h.settings();
        assert!(!h.update_settings(s));
        assert!(h.update_settings(WorldSettings {
            kind: HeightGeneratorKind::CoherentNoise,
            ..s
        }));
        assert_eq!(h.height_field().kind(), HeightGeneratorKind::CoherentNoise);
        assert!(h.update_settings(WorldSettings {
            kind: HeightGeneratorKind::CoherentNoise,
            sea_level: 0.2,
            ..s
        }));
        assert_eq!(h.settings().sea_level, 0.2);
    }

    #[test]
    fn test_region_data_clamps_data_level() {
        let h = hierarchy();
        let (region, data) = h.region_data(5, 1, 2).unwrap();
        assert_eq!(region, 5);
        assert_eq!(data, h.sphere(1).unwrap().polygon_data(5).unwrap());
        let (region, _) = h.region_data(40, 2, 0).unwrap();
        assert_eq!(region, h.polygon_index(40, 2, 0).unwrap());
    }
}
