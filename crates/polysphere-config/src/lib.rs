//! Configuration for polysphere hosts.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section defaults field by field, so older or newer
//! files still load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    ColoringMode, Config, DebugConfig, EdgeTopology, GeneratorKind, LevelsConfig, NoiseConfig,
    NormalsMode, TerrainConfig, ViewConfig,
};
pub use error::ConfigError;
