//! Headless demo that generates a geodesic world and builds its meshes.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p polysphere-demo` to log level, mesh and picking stats.
//! Run with `cargo run -p polysphere-demo -- --seed 42 --coloring terrain` to override.

mod world_demos;

use std::path::PathBuf;

use clap::Parser;
use polysphere_config::{CliArgs, Config};
use polysphere_world::BorderSnapshot;
use tracing::{error, info};

use world_demos::DemoResult;

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("polysphere"))
        .unwrap_or_else(|| PathBuf::from(".polysphere"))
}

fn run(config: &Config) -> DemoResult<()> {
    let seed = config.terrain.seed.unwrap_or_else(rand::random);
    let settings = world_demos::world_settings(config, seed);
    info!(seed = settings.seed, kind = ?settings.kind, "generating world");

    let hierarchy = world_demos::demonstrate_hierarchy(config, settings)?;
    let snapshot = BorderSnapshot::new(
        &hierarchy,
        config.view.render_level,
        config.view.data_level,
        config.terrain.ridge_density,
    );

    let polygons = world_demos::demonstrate_polygon_mesh(&hierarchy, &snapshot, config)?;
    world_demos::demonstrate_edge_mesh(&hierarchy, &snapshot, config)?;
    world_demos::demonstrate_picking(&hierarchy, &snapshot, &polygons, config.debug.pick_triangle)?;
    world_demos::demonstrate_edge_resolution(&hierarchy, &snapshot, config.debug.pick_triangle)?;
    Ok(())
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    polysphere_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(2);
    }

    if let Err(e) = run(&config) {
        error!("demo failed: {e}");
        std::process::exit(1);
    }
    info!("done");
}
