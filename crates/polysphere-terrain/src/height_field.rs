//! The active height generation strategy.

use glam::DVec3;
use polysphere_geodesic::{HeightSource, stream_rng};
use rand::Rng;

use crate::heightmap::{HeightmapSampler, NoiseSettings};

/// Which height strategy is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeightGeneratorKind {
    /// Independent uniform height per region.
    #[default]
    UniformRandom,
    /// Continuous fBm noise sampled at the region center.
    CoherentNoise,
}

/// A height field over the sphere, chosen by [`HeightGeneratorKind`].
///
/// Switching strategy replaces the value; callers never hold a concrete
/// generator type.
#[derive(Clone)]
pub enum HeightField {
    /// Each region draws its own value; spatially incoherent.
    UniformRandom {
        /// World seed.
        seed: u64,
    },
    /// Spatially coherent fBm noise.
    CoherentNoise {
        /// World seed.
        seed: u64,
        /// Sampler seeded from `seed` and the noise seed offset.
        sampler: HeightmapSampler,
    },
}

impl HeightField {
    /// Build the field for `kind`. `noise` is only used by
    /// [`HeightGeneratorKind::CoherentNoise`].
    pub fn new(kind: HeightGeneratorKind, seed: u64, noise: NoiseSettings) -> Self {
        match kind {
            HeightGeneratorKind::UniformRandom => HeightField::UniformRandom { seed },
            HeightGeneratorKind::CoherentNoise => HeightField::CoherentNoise {
                seed,
                sampler: HeightmapSampler::new(seed, noise),
            },
        }
    }

    /// The strategy this field implements.
    pub fn kind(&self) -> HeightGeneratorKind {
        match self {
            HeightField::UniformRandom { .. } => HeightGeneratorKind::UniformRandom,
            HeightField::CoherentNoise { .. } => HeightGeneratorKind::CoherentNoise,
        }
    }
}

impl HeightSource for HeightField {
    fn seed(&self) -> u64 {
        match self {
            HeightField::UniformRandom { seed } | HeightField::CoherentNoise { seed, .. } => *seed,
        }
    }

    fn height(&self, direction: DVec3, stream: u64) -> f64 {
        match self {
            HeightField::UniformRandom { seed } => stream_rng(*seed, stream).random::<f64>(),
            HeightField::CoherentNoise { sampler, .. } => sampler.sample_normalized(direction),
        }
    }
}
