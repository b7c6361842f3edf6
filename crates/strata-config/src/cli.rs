//! Command-line argument parsing for the strata generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Procedural terrain generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sea level in cells.
    #[arg(long)]
    pub sea_level: Option<i32>,

    /// Chunks generated on each side of the origin chunk.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Biome applied to every generated chunk.
    #[arg(long)]
    pub biome: Option<String>,

    /// Where to write the cross-section PNG.
    #[arg(long)]
    pub output: Option<PathBuf>,

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
            self.world.seed = seed;
        }
        if let Some(sea_level) = args.sea_level {
            self.world.sea_level = sea_level;
        }
        if let Some(radius) = args.radius {
            self.world.chunk_radius = radius;
        }
        if let Some(ref biome) = args.biome {
            self.world.biome = biome.clone();
        }
        if let Some(ref path) = args.output {
            self.output.cross_section_path = Some(path.clone());
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
            seed: Some(77),
            biome: Some("dunes".to_string()),
            output: Some(PathBuf::from("out/slice.png")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 77);
        assert_eq!(config.world.biome, "dunes");
        assert_eq!(
            config.output.cross_section_path,
            Some(PathBuf::from("out/slice.png"))
        );
        // Non-overridden fields retain defaults
        assert_eq!(config.world.sea_level, 63);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from(["strata", "--seed", "5", "--radius", "0", "--log-level", "debug"]);
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.radius, Some(0));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(args.config.is_none());
    }
}
