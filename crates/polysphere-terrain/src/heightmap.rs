//! Multi-octave fractal Brownian motion (fBm) sampler over 3-D Perlin noise.
//!
//! Samples are taken at sphere-surface directions, so the field is seamless
//! across the whole globe, and normalized into `[0, 1]` for region heights.

use glam::DVec3;
use noise::{NoiseFn, Perlin};

/// Shape parameters for the coherent noise height field.
///
/// The world seed is held separately; changing only these values never
/// changes which seed the noise uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSettings {
    /// Added to the world seed before seeding the noise permutation table.
    pub seed_offset: u32,
    /// Frequency of the first octave, in cycles per unit of direction.
    pub frequency: f64,
    /// Number of octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed_offset: 0,
            frequency: 1.5,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

/// Generates coherent heights using fBm over Perlin noise.
#[derive(Clone)]
pub struct HeightmapSampler {
    noise: Perlin,
    settings: NoiseSettings,
}

impl HeightmapSampler {
    /// Create a sampler for `world_seed` with the given shape.
    pub fn new(world_seed: u64, settings: NoiseSettings) -> Self {
        let folded = (world_seed ^ (world_seed >> 32)) as u32;
        let noise = Perlin::new(folded.wrapping_add(settings.seed_offset));
        Self { noise, settings }
    }

    /// Raw fBm sum at a direction on the sphere.
    ///
    /// The theoretical range is `[-max_amplitude, +max_amplitude]`.
    pub fn sample(&self, direction: DVec3) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.settings.frequency;
        let mut amplitude = 1.0;

        for _ in 0..self.settings.octaves {
            let p = direction * frequency;
            total += self.noise.get([p.x, p.y, p.z]) * amplitude;

            frequency *= self.settings.lacunarity;
            amplitude *= self.settings.persistence;
        }

        total
    }

    /// fBm remapped from `[-max_amplitude, max_amplitude]` into `[0, 1]`.
    pub fn sample_normalized(&self, direction: DVec3) -> f64 {
        let max_amp = self.max_amplitude();
        if max_amp == 0.0 {
            return 0.5;
        }
        ((self.sample(direction) / max_amp + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Geometric sum of all octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.settings.octaves {
            sum += amp;
            amp *= self.settings.persistence;
        }
        sum
    }

    /// The shape parameters this sampler was built with.
    pub fn settings(&self) -> &NoiseSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn directions() -> impl Iterator<Item = DVec3> {
        (0..40).flat_map(|i| {
            (0..20).map(move |j| {
                let lon = i as f64 / 40.0 * std::f64::consts::TAU;
                let lat = (j as f64 / 19.0 - 0.5) * std::f64::consts::PI;
                DVec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
            })
        })
    }

    #[test]
    fn test_determinism_same_seed_same_direction() {
        let a = HeightmapSampler::new(42, NoiseSettings::default());
        let b = HeightmapSampler::new(42, NoiseSettings::default());
        let dir = DVec3::new(0.2, 0.9, -0.4).normalize();
        assert_eq!(a.sample(dir), b.sample(dir));
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let a = HeightmapSampler::new(1, NoiseSettings::default());
        let b = HeightmapSampler::new(999, NoiseSettings::default());
        let differs = directions().any(|d| (a.sample(d) - b.sample(d)).abs() > EPSILON);
        assert!(differs, "different seeds should change the field");
    }

    #[test]
    fn test_seed_offset_changes_field() {
        let a = HeightmapSampler::new(5, NoiseSettings::default());
        let b = HeightmapSampler::new(
            5,
            NoiseSettings {
                seed_offset: 3,
                ..Default::default()
            },
        );
        assert!(directions().any(|d| (a.sample(d) - b.sample(d)).abs() > EPSILON));
    }

    #[test]
    fn test_normalized_within_unit_range() {
        let sampler = HeightmapSampler::new(7, NoiseSettings::default());
        let max_amp = sampler.max_amplitude();
        for dir in directions() {
            assert!(sampler.sample(dir).abs() <= max_amp + EPSILON);
            let h = sampler.sample_normalized(dir);
            assert!((0.0..=1.0).contains(&h), "height {h} outside [0, 1]");
        }
    }

    #[test]
    fn test_smooth_over_small_steps() {
        let sampler = HeightmapSampler::new(42, NoiseSettings::default());
        let axis = DVec3::Y;
        let mut prev = sampler.sample_normalized(DVec3::X);
        for i in 1..2000 {
            let angle = i as f64 * 1e-4;
            let dir = glam::DQuat::from_axis_angle(axis, angle) * DVec3::X;
            let h = sampler.sample_normalized(dir);
            assert!((h - prev).abs() < 0.05, "discontinuity at step {i}");
            prev = h;
        }
    }

    #[test]
    fn test_max_amplitude_calculation() {
        let sampler = HeightmapSampler::new(
            0,
            NoiseSettings {
                octaves: 4,
                persistence: 0.5,
                ..Default::default()
            },
        );
        assert!((sampler.max_amplitude() - 1.875).abs() < EPSILON);
    }

    #[test]
    fn test_zero_octaves_is_flat_midpoint() {
        let sampler = HeightmapSampler::new(
            0,
            NoiseSettings {
                octaves: 0,
                ..Default::default()
            },
        );
        assert_eq!(sampler.sample_normalized(DVec3::Z), 0.5);
    }
}
