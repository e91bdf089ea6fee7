//! Procedural height fields over the unit sphere: per-region random heights and multi-octave coherent noise.

mod height_field;
mod heightmap;

pub use height_field::{HeightField, HeightGeneratorKind};
pub use heightmap::{HeightmapSampler, NoiseSettings};
