//! Configuration for the strata terrain generator.
//!
//! Settings persist to disk as RON (`config.ron`). Missing fields fall back to
//! defaults, unknown fields are ignored, and command-line flags override
//! whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeEntry, Config, DebugConfig, OutputConfig, TerrainConfig, WorldConfig, default_config_dir,
};
pub use error::ConfigError;
