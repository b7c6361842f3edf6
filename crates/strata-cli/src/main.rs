//! Reference generation driver: loads config, generates a square of chunks
//! and writes a cross-section of them to disk.

mod world;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strata_config::{CliArgs, Config, default_config_dir};
use tracing::{debug, error, info, warn};

use crate::world::{World, WorldError, chunk_window};

fn run(config: &Config) -> Result<(), WorldError> {
    let world = World::from_config(config)?;
    debug!(biomes = world.biomes().len(), "biome registry ready");
    info!(
        seed = config.world.seed,
        biome = %world.biome().name,
        variant = %world.biome().surface,
        radius = config.world.chunk_radius,
        "generating"
    );

    let mut chunks = Vec::new();
    let mut carved_total = 0;
    for pos in chunk_window(config.world.chunk_radius) {
        let (chunk, report) = world.generate(pos);
        match report.min_surface {
            Some(surface) => info!(
                chunk_x = pos.x,
                chunk_z = pos.z,
                carved = report.carved,
                min_surface = surface,
                "chunk generated"
            ),
            None => warn!(chunk_x = pos.x, chunk_z = pos.z, "chunk surface unresolved"),
        }
        carved_total += report.carved;
        chunks.push((pos, chunk));
    }
    info!(chunks = chunks.len(), carved = carved_total, "generation complete");

    if let Some(path) = &config.output.cross_section_path {
        // Only the row through the origin chunk, so the image stays readable.
        let row: Vec<_> = chunks.into_iter().filter(|(pos, _)| pos.z == 0).collect();
        world.cross_section(&row).write_png(path)?;
        info!(path = %path.display(), "cross-section written");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "generation failed");
            ExitCode::FAILURE
        }
    }
}
