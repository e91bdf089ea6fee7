//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{ColoringMode, Config, GeneratorKind};

/// Polysphere command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "polysphere", about = "Geodesic hex-sphere world generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Height generator.
    #[arg(long, value_enum)]
    pub generator: Option<GeneratorKind>,

    /// Sea level in [0, 1].
    #[arg(long)]
    pub sea_level: Option<f64>,

    /// Ridge density in [0, 1].
    #[arg(long)]
    pub ridge_density: Option<f64>,

    /// Level to mesh.
    #[arg(long)]
    pub render_level: Option<usize>,

    /// Level whose data colors the mesh.
    #[arg(long)]
    pub data_level: Option<usize>,

    /// Polygon coloring.
    #[arg(long, value_enum)]
    pub coloring: Option<ColoringMode>,

    /// Share shading across non-border edges.
    #[arg(long)]
    pub smooth: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.terrain.seed = Some(seed);
        }
        if let Some(generator) = args.generator {
            self.terrain.generator = generator;
        }
        if let Some(sea_level) = args.sea_level {
            self.terrain.sea_level = sea_level;
        }
        if let Some(density) = args.ridge_density {
            self.terrain.ridge_density = density;
        }
        if let Some(level) = args.render_level {
            self.view.render_level = level;
        }
        if let Some(level) = args.data_level {
            self.view.data_level = level;
        }
        if let Some(coloring) = args.coloring {
            self.view.coloring = coloring;
        }
        if let Some(smooth) = args.smooth {
            self.view.smooth_polygons = smooth;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(42),
            coloring: Some(ColoringMode::Random),
            render_level: Some(2),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.seed, Some(42));
        assert_eq!(config.view.coloring, ColoringMode::Random);
        assert_eq!(config.view.render_level, 2);
        assert_eq!(config.view.data_level, 1);
        assert_eq!(config.terrain.sea_level, 0.7);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "polysphere",
            "--seed",
            "7",
            "--generator",
            "coherent-noise",
            "--smooth",
            "false",
        ]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.generator, Some(GeneratorKind::CoherentNoise));
        assert_eq!(args.smooth, Some(false));
    }
}
