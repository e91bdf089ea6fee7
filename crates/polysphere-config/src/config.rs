//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere levels.
    pub levels: LevelsConfig,
    /// Height generation and sea level.
    pub terrain: TerrainConfig,
    /// What to render and how.
    pub view: ViewConfig,
    /// Logging and picking probes.
    pub debug: DebugConfig,
}

/// Subdivision frequency of each level, coarsest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelsConfig {
    /// Strictly increasing frequencies.
    pub frequencies: Vec<u32>,
}

/// Height strategy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum GeneratorKind {
    /// Independent random height per region.
    #[default]
    UniformRandom,
    /// Multi-octave coherent noise.
    CoherentNoise,
}

/// fBm noise parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Added to the world seed to seed the noise.
    pub seed_offset: u32,
    /// Base frequency over the unit sphere.
    pub frequency: f64,
    /// Number of octaves.
    pub octaves: u32,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
}

/// Terrain generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Height strategy.
    pub generator: GeneratorKind,
    /// Noise parameters for [`GeneratorKind::CoherentNoise`].
    pub noise: NoiseConfig,
    /// Heights below this are sea, in `[0, 1]`.
    pub sea_level: f64,
    /// Fixed world seed; `None` picks a random one per run.
    pub seed: Option<u64>,
    /// Edges with a ridge strength below this are ridges, in `[0, 1]`.
    pub ridge_density: f64,
}

/// Polygon coloring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ColoringMode {
    /// One color per zone.
    #[default]
    Zones,
    /// Sea and land.
    Terrain,
    /// Random color per region.
    Random,
    /// Plain white.
    White,
}

/// Vertex normal source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum NormalsMode {
    /// Polyhedral surface normals.
    #[default]
    Polyhedron,
    /// Unit sphere normals.
    Sphere,
}

/// Primitive used for the edge skeleton.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EdgeTopology {
    /// Line segments.
    Lines,
    /// Solid bands.
    #[default]
    Bands,
}

/// View configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Level whose tessellation is meshed.
    pub render_level: usize,
    /// Level whose data colors the mesh; clamped to `render_level`.
    pub data_level: usize,
    /// Polygon coloring.
    pub coloring: ColoringMode,
    /// Normal source.
    pub normals: NormalsMode,
    /// Share shading across non-border edges.
    pub smooth_polygons: bool,
    /// Miter edge bands where they meet.
    pub smooth_edges: bool,
    /// Edge skeleton primitive.
    pub edge_topology: EdgeTopology,
    /// Full width of edge bands.
    pub edge_width: f64,
    /// Height of the edge skeleton above the surface.
    pub edge_lift: f64,
}

/// Diagnostics for the demo host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// `tracing` filter directive, e.g. `"debug,polysphere_mesh=trace"`.
    pub log_level: String,
    /// Triangle index the demo picks to exercise selection.
    pub pick_triangle: usize,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            frequencies: vec![0, 1, 3, 7, 15, 31],
        }
    }
}

impl Default for NoiseConfig {
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

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::default(),
            noise: NoiseConfig::default(),
            sea_level: 0.7,
            seed: None,
            ridge_density: 0.1,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            render_level: 3,
            data_level: 1,
            coloring: ColoringMode::default(),
            normals: NormalsMode::default(),
            smooth_polygons: true,
            smooth_edges: true,
            edge_topology: EdgeTopology::default(),
            edge_width: 0.004,
            edge_lift: 0.001,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pick_triangle: 0,
        }
    }
}

fn unit_range(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} {value} outside [0, 1]")))
    }
}

impl Config {
    fn path(config_dir: &Path) -> PathBuf {
        config_dir.join(FILE_NAME)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `config.ron` from `config_dir`, writing the defaults there first if it is missing.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::path(config_dir);
        if path.exists() {
            let config = Self::read(&path)?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        let path = Self::path(config_dir);
        std::fs::write(&path, serialized).map_err(|source| ConfigError::WriteError { path, source })
    }

    /// Re-read the file; `Some` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&Self::path(config_dir))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Check the values describe a buildable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let frequencies = &self.levels.frequencies;
        if frequencies.is_empty() || frequencies.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid(format!(
                "level frequencies {frequencies:?} must be non-empty and strictly increasing"
            )));
        }
        if self.view.render_level >= frequencies.len() {
            return Err(ConfigError::Invalid(format!(
                "render level {} but only {} levels",
                self.view.render_level,
                frequencies.len()
            )));
        }
        unit_range("sea level", self.terrain.sea_level)?;
        unit_range("ridge density", self.terrain.ridge_density)?;
        if self.terrain.noise.octaves == 0 {
            return Err(ConfigError::Invalid("noise needs at least one octave".into()));
        }
        if self.view.edge_width.is_nan() || self.view.edge_width < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "edge width {} is negative",
                self.view.edge_width
            )));
        }
        Ok(())
    }
}
