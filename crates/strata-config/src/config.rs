//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World-wide settings.
    pub world: WorldConfig,
    /// Terrain pass tuning.
    pub terrain: TerrainConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Where generated artifacts are written.
    pub output: OutputConfig,
    /// Biomes available to the generator, with materials named by registry name.
    pub biomes: Vec<BiomeEntry>,
}

/// World configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed.
    pub seed: u64,
    /// Sea level in cells.
    pub sea_level: i32,
    /// Chunks generated on each side of the origin chunk.
    pub chunk_radius: u32,
    /// Name of the biome applied to every generated chunk.
    pub biome: String,
}

/// Terrain pass configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Carved cells at or below this height fill with lava.
    pub lava_depth: i32,
    /// Seed of the dune height noise. Shared by every world.
    pub dune_noise_seed: u32,
    /// Cave noise threshold; higher values give more caves.
    pub cave_threshold: f64,
    /// Mean height of the base terrain.
    pub base_height: i32,
    /// Amplitude of the first heightmap octave, in cells.
    pub height_amplitude: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// PNG written with a cross-section of every generated chunk.
    /// `None` skips rendering.
    pub cross_section_path: Option<PathBuf>,
}

/// A biome as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiomeEntry {
    /// Unique biome name.
    pub name: String,
    /// Surface variant name: `default`, `banded`, `dune` or `glacier`.
    pub surface: String,
    /// Top material name.
    pub top: String,
    /// Filler material name.
    pub under: String,
    /// Submerged top material name.
    pub underwater: String,
}

impl BiomeEntry {
    fn new(name: &str, surface: &str, top: &str, under: &str, underwater: &str) -> Self {
        Self {
            name: name.to_string(),
            surface: surface.to_string(),
            top: top.to_string(),
            under: under.to_string(),
            underwater: underwater.to_string(),
        }
    }
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            terrain: TerrainConfig::default(),
            debug: DebugConfig::default(),
            output: OutputConfig::default(),
            biomes: vec![
                BiomeEntry::new("plains", "default", "grass_block", "dirt", "gravel"),
                BiomeEntry::new("badlands", "banded", "red_sand", "white_terracotta", "gravel"),
                BiomeEntry::new("dunes", "dune", "sand", "sand", "gravel"),
                BiomeEntry::new("glacier", "glacier", "snow", "ice", "gravel"),
            ],
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            sea_level: 63,
            chunk_radius: 2,
            biome: "badlands".to_string(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            lava_depth: 10,
            dune_noise_seed: 3445,
            cave_threshold: -0.15,
            base_height: 72,
            height_amplitude: 24.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cross_section_path: Some(PathBuf::from("cross_section.png")),
        }
    }
}

/// Platform config directory for strata, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("strata"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Checks values that parse but cannot drive generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=255).contains(&self.world.sea_level) {
            return Err(ConfigError::Invalid(format!(
                "sea_level {} outside 1..=255",
                self.world.sea_level
            )));
        }
        if !(1..255).contains(&self.terrain.base_height) {
            return Err(ConfigError::Invalid(format!(
                "base_height {} outside 1..255",
                self.terrain.base_height
            )));
        }
        for (i, entry) in self.biomes.iter().enumerate() {
            if self.biomes[..i].iter().any(|b| b.name == entry.name) {
                return Err(ConfigError::Invalid(format!(
                    "biome '{}' defined twice",
                    entry.name
                )));
            }
        }
        if !self.biomes.iter().any(|b| b.name == self.world.biome) {
            return Err(ConfigError::Invalid(format!(
                "world biome '{}' is not defined",
                self.world.biome
            )));
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("sea_level: 63"));
        assert!(ron_str.contains("dune_noise_seed: 3445"));
        assert!(ron_str.contains("white_terracotta"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(world: (seed: 99))").unwrap();
        assert_eq!(config.world.seed, 99);
        assert_eq!(config.world.sea_level, 63);
        assert_eq!(config.terrain, TerrainConfig::default());
        assert_eq!(config.biomes.len(), 4);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.seed = 1234;
        config.world.biome = "glacier".to_string();
        config.output.cross_section_path = None;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("strata");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.lava_depth = 4;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.terrain.lava_depth), Some(4));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// This is a comment\n(\n  // Another comment\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.world.sea_level = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.world.biome = "swamp".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        let dup = config.biomes[0].clone();
        config.biomes.push(dup);
        assert!(config.validate().is_err());
    }
}
