//! Column surface synthesis.
//!
//! A surface variant rewrites one column of a chunk, top-down, replacing the
//! placeholder solid left by base terrain with biome materials. Every variant
//! is a function of the column context, the chunk and the column RNG, and
//! draws from the RNG in a fixed order so a column is reproducible from
//! `(seed, x, z)`.

mod banded;
mod default;
mod dune;
mod glacier;
mod pass;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;
use strata_voxel::{ChunkAccess, MaterialId, MaterialRegistry};

use crate::biome::MaterialProfile;
use crate::cache::SeedCache;
use crate::octave::{OctaveConfig, OctaveNoise};
use crate::palette::BandingTables;
use crate::TerrainError;

pub use dune::DuneConfig;
pub use glacier::glacier_thinning;
pub use pass::SurfacePass;

/// Column synthesis strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SurfaceVariant {
    /// Top over filler, with sandstone runs under sand.
    #[default]
    Default,
    /// Terracotta strata driven by the layer palette.
    Banded,
    /// Wind-shaped sand mounds built upward from the sea floor.
    Dune,
    /// Thick packed ice with noise-driven thinning.
    Glacier,
}

impl SurfaceVariant {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Banded => "banded",
            Self::Dune => "dune",
            Self::Glacier => "glacier",
        }
    }
}

impl fmt::Display for SurfaceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SurfaceVariant {
    type Err = TerrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "banded" | "badlands" => Ok(Self::Banded),
            "dune" | "dunes" => Ok(Self::Dune),
            "glacier" => Ok(Self::Glacier),
            _ => Err(TerrainError::UnknownSurfaceVariant(s.to_string())),
        }
    }
}

/// Everything a variant needs to know about the column it is dressing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnContext {
    /// World seed.
    pub seed: u64,
    /// World X of the column.
    pub world_x: i32,
    /// World Z of the column.
    pub world_z: i32,
    /// Working height: the scan starts here and walks down.
    pub height: i32,
    /// Surface depth noise for the column, roughly in `[-15, 15]`.
    pub noise: f64,
    /// Placeholder solid written by base terrain.
    pub solid: MaterialId,
    /// Placeholder liquid written by base terrain.
    pub liquid: MaterialId,
    /// Sea level.
    pub sea_level: i32,
    /// Biome materials.
    pub profile: MaterialProfile,
}

impl ColumnContext {
    /// Chunk-local X.
    pub fn local_x(&self) -> i32 {
        self.world_x & 15
    }

    /// Chunk-local Z.
    pub fn local_z(&self) -> i32 {
        self.world_z & 15
    }
}

/// Depth of the top band for a column: `floor(noise / 3 + 3 + r * 0.25)`.
///
/// Consumes one `f64` from `rng`.
pub(crate) fn top_band_depth<R: Rng + ?Sized>(noise: f64, rng: &mut R) -> i32 {
    (noise / 3.0 + 3.0 + rng.random::<f64>() * 0.25).floor() as i32
}

/// Dispatches columns to their surface variant and owns the per-seed tables
/// the variants read.
pub struct SurfaceSynthesizer {
    registry: Arc<MaterialRegistry>,
    banding: SeedCache<BandingTables>,
    glacier: SeedCache<OctaveNoise>,
    dune: dune::DuneNoise,
}

impl SurfaceSynthesizer {
    /// Creates a synthesizer over `registry`.
    pub fn new(registry: Arc<MaterialRegistry>, dune: DuneConfig) -> Self {
        Self {
            registry,
            banding: SeedCache::new(),
            glacier: SeedCache::new(),
            dune: dune::DuneNoise::new(dune),
        }
    }

    /// The material registry used for air/liquid classification.
    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    /// Banding tables for `seed`, built on first use.
    pub fn banding_tables(&self, seed: u64) -> Arc<BandingTables> {
        self.banding.get_or_build(seed, BandingTables::build)
    }

    /// Rewrites the column described by `ctx` using `variant`.
    pub fn build_column<C, R>(
        &self,
        variant: SurfaceVariant,
        ctx: &ColumnContext,
        chunk: &mut C,
        rng: &mut R,
    ) where
        C: ChunkAccess + ?Sized,
        R: Rng + ?Sized,
    {
        match variant {
            SurfaceVariant::Default => default::build(&self.registry, ctx, chunk, rng),
            SurfaceVariant::Banded => {
                let tables = self.banding_tables(ctx.seed);
                banded::build(&self.registry, &tables, ctx, chunk, rng);
            }
            SurfaceVariant::Dune => dune::build(&self.registry, &self.dune, ctx, chunk),
            SurfaceVariant::Glacier => {
                let noise = self
                    .glacier
                    .get_or_build(ctx.seed, |seed| OctaveNoise::from_seed(seed, OctaveConfig::GLACIER));
                glacier::build(&self.registry, &noise, ctx, chunk);
            }
        }
    }
}
