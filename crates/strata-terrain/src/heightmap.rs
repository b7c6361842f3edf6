//! Multi-octave fractal Brownian motion (fBm) heightmap and the base terrain
//! it shapes.
//!
//! [`BaseTerrain`] is what the surface pass expects to find: solid
//! placeholder up to the column height, liquid placeholder up to sea level,
//! and a bedrock floor.

use noise::{NoiseFn, Simplex};
use strata_voxel::builtin::{AIR, BEDROCK, STONE, WATER};
use strata_voxel::{Chunk, ChunkPos, MAX_Y, MaterialId};

use crate::seed::derive_source_seed;

/// Salt separating the heightmap from other per-world noise.
const HEIGHTMAP_SALT: u64 = 0x4E16_47A9;

/// Configuration for multi-octave fBm noise used in heightmap generation.
#[derive(Clone, Debug)]
pub struct HeightmapParams {
    /// World seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves to composite. Default: 5.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Each octave's frequency
    /// is `base_frequency * lacunarity^octave_index`. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Each octave's amplitude
    /// is `amplitude * persistence^octave_index`. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first (lowest) octave. Default: 0.005 (one full cycle
    /// per 200 cells).
    pub base_frequency: f64,
    /// Amplitude of the first octave, in cells. Default: 24.0.
    pub amplitude: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 5,
            lacunarity: 2.0,
            persistence: 0.5,
            amplitude: 24.0,
            base_frequency: 0.005,
        }
    }
}

/// Generates terrain height offsets using fractal Brownian motion over simplex noise.
pub struct HeightmapSampler {
    noise: Simplex,
    params: HeightmapParams,
}

impl HeightmapSampler {
    /// Create a new sampler with the given parameters.
    pub fn new(params: HeightmapParams) -> Self {
        let noise = Simplex::new(derive_source_seed(params.seed, HEIGHTMAP_SALT) as u32);
        Self { noise, params }
    }

    /// Sample the heightmap at world column `(x, z)`.
    ///
    /// The result lies within `[-max_amplitude, +max_amplitude]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Compute the theoretical maximum absolute amplitude (geometric series sum).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}

/// Fills chunks with the placeholder terrain later passes dress and carve.
pub struct BaseTerrain {
    sampler: HeightmapSampler,
    base_height: i32,
    sea_level: i32,
    solid: MaterialId,
    liquid: MaterialId,
}

impl BaseTerrain {
    /// Stone and water placeholders around `base_height`.
    pub fn new(sampler: HeightmapSampler, base_height: i32, sea_level: i32) -> Self {
        Self {
            sampler,
            base_height,
            sea_level,
            solid: STONE,
            liquid: WATER,
        }
    }

    /// Overrides the placeholder materials.
    pub fn with_placeholders(mut self, solid: MaterialId, liquid: MaterialId) -> Self {
        self.solid = solid;
        self.liquid = liquid;
        self
    }

    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    /// Height of the highest solid cell in world column `(world_x, world_z)`.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        let offset = self.sampler.sample(f64::from(world_x), f64::from(world_z));
        (self.base_height + offset.round() as i32).clamp(1, MAX_Y - 1)
    }

    /// Overwrites every column of `chunk` at `pos`.
    pub fn fill_chunk(&self, chunk: &mut Chunk, pos: ChunkPos) {
        for local_x in 0..16 {
            for local_z in 0..16 {
                let (world_x, world_z) = pos.world_column(local_x, local_z);
                let height = self.column_height(world_x, world_z);
                chunk.fill_column(local_x, local_z, 0, MAX_Y, AIR);
                chunk.set(local_x, 0, local_z, BEDROCK);
                chunk.fill_column(local_x, local_z, 1, height, self.solid);
                if height + 1 < self.sea_level {
                    chunk.fill_column(local_x, local_z, height + 1, self.sea_level - 1, self.liquid);
                }
            }
        }
        tracing::trace!(chunk_x = pos.x, chunk_z = pos.z, "base terrain filled");
    }
}
