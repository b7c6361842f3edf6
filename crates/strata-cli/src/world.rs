//! Wires configured terrain passes into a chunk generator.

use std::sync::Arc;

use strata_config::{BiomeEntry, Config};
use strata_terrain::debug_viz::{DebugImage, DebugImageError, SliceAxis, render_cross_section};
use strata_terrain::{
    BaseTerrain, BiomeDef, BiomeRegistry, BiomeRegistryError, CarveConfig, CaveCarver, CaveField,
    CaveFieldConfig, CavePass, DuneConfig, HeightmapParams, HeightmapSampler, MaterialProfile,
    SurfacePass, SurfaceSynthesizer, SurfaceVariant, TerrainError, min_altitude,
};
use strata_voxel::{Chunk, ChunkPos, MaterialRegistry};
use thiserror::Error;

/// Errors raised while building or running the generator.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] strata_config::ConfigError),
    #[error("biome '{biome}': {source}")]
    Biome {
        biome: String,
        #[source]
        source: TerrainError,
    },
    #[error(transparent)]
    Registry(#[from] BiomeRegistryError),
    #[error("biome '{0}' is not registered")]
    UnknownBiome(String),
    #[error(transparent)]
    Image(#[from] DebugImageError),
}

/// Per-chunk generation summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkReport {
    pub pos: ChunkPos,
    pub carved: usize,
    /// Lowest probed surface, or `None` when a probe found no ground.
    pub min_surface: Option<i32>,
}

/// Every pass needed to turn a chunk position into a finished chunk.
pub struct World {
    registry: Arc<MaterialRegistry>,
    biomes: BiomeRegistry,
    biome: BiomeDef,
    terrain: BaseTerrain,
    surface: SurfacePass,
    caves: CavePass,
}

impl World {
    /// Builds the generator described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, WorldError> {
        config.validate()?;

        let registry = Arc::new(MaterialRegistry::new());
        let biomes = biome_registry(&registry, &config.biomes)?;
        let biome = biomes
            .lookup_by_name(&config.world.biome)
            .map(|id| biomes.get(id).clone())
            .ok_or_else(|| WorldError::UnknownBiome(config.world.biome.clone()))?;

        let world = &config.world;
        let terrain = BaseTerrain::new(
            HeightmapSampler::new(HeightmapParams {
                seed: world.seed,
                amplitude: config.terrain.height_amplitude,
                ..Default::default()
            }),
            config.terrain.base_height,
            world.sea_level,
        );

        let synthesizer = SurfaceSynthesizer::new(
            Arc::clone(&registry),
            DuneConfig {
                noise_seed: config.terrain.dune_noise_seed,
            },
        );
        let surface = SurfacePass::new(synthesizer, world.seed, world.sea_level);

        let caves = CavePass::new(
            CaveField::new(CaveFieldConfig {
                seed: world.seed,
                threshold: config.terrain.cave_threshold,
                ..Default::default()
            }),
            CaveCarver::new(
                Arc::clone(&registry),
                CarveConfig {
                    lava_depth: config.terrain.lava_depth,
                },
            ),
            world.sea_level,
        );

        Ok(Self {
            registry,
            biomes,
            biome,
            terrain,
            surface,
            caves,
        })
    }

    pub fn biomes(&self) -> &BiomeRegistry {
        &self.biomes
    }

    /// The biome every chunk is dressed with.
    pub fn biome(&self) -> &BiomeDef {
        &self.biome
    }

    /// Base terrain, surface, then caves.
    pub fn generate(&self, pos: ChunkPos) -> (Chunk, ChunkReport) {
        let mut chunk = Chunk::new();
        self.terrain.fill_chunk(&mut chunk, pos);
        self.surface.run(&mut chunk, pos, &self.biome);
        let carved = self.caves.run(&mut chunk, pos, &self.biome.profile);
        let min_surface = min_altitude(&chunk, &self.registry).ok();
        chunk.clear_modified();

        let report = ChunkReport {
            pos,
            carved,
            min_surface,
        };
        (chunk, report)
    }

    /// A slice through the middle of each chunk, left to right.
    pub fn cross_section(&self, chunks: &[(ChunkPos, Chunk)]) -> DebugImage {
        let slices: Vec<DebugImage> = chunks
            .iter()
            .map(|(_, chunk)| render_cross_section(chunk, &self.registry, SliceAxis::Z, 8))
            .collect();
        DebugImage::hstack(&slices)
    }
}

/// Chunk positions within `radius` of the origin chunk, row by row.
pub fn chunk_window(radius: u32) -> impl Iterator<Item = ChunkPos> {
    let r = radius as i32;
    (-r..=r).flat_map(move |z| (-r..=r).map(move |x| ChunkPos::new(x, z)))
}

fn biome_registry(
    registry: &MaterialRegistry,
    entries: &[BiomeEntry],
) -> Result<BiomeRegistry, WorldError> {
    let mut biomes = BiomeRegistry::new();
    for entry in entries {
        let resolve = || -> Result<BiomeDef, TerrainError> {
            let surface: SurfaceVariant = entry.surface.parse()?;
            let profile =
                MaterialProfile::from_names(registry, &entry.top, &entry.under, &entry.underwater)?;
            Ok(BiomeDef::new(entry.name.clone(), profile, surface))
        };
        let def = resolve().map_err(|source| WorldError::Biome {
            biome: entry.name.clone(),
            source,
        })?;
        biomes.register(def)?;
    }
    Ok(biomes)
}
