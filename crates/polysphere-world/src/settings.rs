//! Generation settings compared by value.

use polysphere_terrain::{HeightField, HeightGeneratorKind, NoiseSettings};

/// Everything that determines generated world data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldSettings {
    /// Height strategy.
    pub kind: HeightGeneratorKind,
    /// Noise parameters, used by [`HeightGeneratorKind::CoherentNoise`].
    pub noise: NoiseSettings,
    /// Heights below this are sea.
    pub sea_level: f64,
    /// World seed.
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            kind: HeightGeneratorKind::default(),
            noise: NoiseSettings::default(),
            sea_level: 0.7,
            seed: 0,
        }
    }
}

/// What moving from one [`WorldSettings`] to another affects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsChange {
    /// The height field must be rebuilt.
    pub rebuild_field: bool,
    /// The sea level moved.
    pub sea_level: bool,
}

impl SettingsChange {
    /// Whether any held state changed.
    pub fn changed(&self) -> bool {
        self.rebuild_field || self.sea_level
    }
}

impl WorldSettings {
    /// Compare against `next`.
    ///
    /// Seed or kind changes always rebuild the field. Noise parameter
    /// changes only rebuild it when `next` samples noise.
    pub fn diff(&self, next: &WorldSettings) -> SettingsChange {
        let identity = self.seed != next.seed || self.kind != next.kind;
        let noise =
            self.noise != next.noise && next.kind == HeightGeneratorKind::CoherentNoise;
        SettingsChange {
            rebuild_field: identity || noise,
            sea_level: self.sea_level != next.sea_level,
        }
    }

    /// Height field described by these settings.
    pub fn height_field(&self) -> HeightField {
        HeightField::new(self.kind, self.seed, self.noise)
    }
}
