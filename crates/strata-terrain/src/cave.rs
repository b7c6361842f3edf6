//! 3D noise-based cave generation using the Swiss cheese model.
//!
//! [`CaveField`] decides where tunnels run; [`CavePass`] walks a chunk below
//! its probed surface and hands every cell inside a tunnel to the
//! [`CaveCarver`], which has the final say on what may be hollowed.

use glam::DVec3;
use noise::{NoiseFn, Simplex};
use strata_voxel::builtin::LAVA;
use strata_voxel::{ChunkAccess, ChunkPos, MaterialId};

use crate::altitude::{column_surface_altitude, max_altitude};
use crate::biome::MaterialProfile;
use crate::carve::CaveCarver;
use crate::seed::derive_source_seed;

/// Salt separating cave noise from terrain noise.
const CAVE_SALT: u64 = 0xCAFE_BABE;

/// Configuration for 3D noise-based cave generation.
#[derive(Clone, Debug)]
pub struct CaveFieldConfig {
    /// World seed for deterministic cave generation.
    pub seed: u64,
    /// Noise threshold. Cells where `noise_value <= threshold` are inside a tunnel.
    /// Lower thresholds produce fewer, smaller caves. Typical range: -0.3 to 0.0.
    /// Default: -0.15.
    pub threshold: f64,
    /// Number of noise octaves. Default: 3.
    pub octaves: u32,
    /// Base frequency of the cave noise. Higher frequency gives narrower,
    /// more frequent tunnels. Default: 0.04.
    pub frequency: f64,
    /// Lacunarity (frequency multiplier per octave). Default: 2.0.
    pub lacunarity: f64,
    /// Persistence (amplitude multiplier per octave). Default: 0.5.
    pub persistence: f64,
    /// Maximum depth below the surface where caves can exist, in cells. Default: 120.
    pub max_depth: f64,
    /// Minimum depth below the surface before caves can appear.
    /// Prevents thin "eggshell" surfaces. Default: 5.
    pub min_depth: f64,
    /// Depth below a submerged surface where caves stay suppressed, so seas
    /// do not drain into them. Default: 10.
    pub ocean_floor_buffer: f64,
}

impl Default for CaveFieldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            threshold: -0.15,
            octaves: 3,
            frequency: 0.04,
            lacunarity: 2.0,
            persistence: 0.5,
            max_depth: 120.0,
            min_depth: 5.0,
            ocean_floor_buffer: 10.0,
        }
    }
}

/// Decides which cells lie inside a cave tunnel.
pub struct CaveField {
    noise: Simplex,
    config: CaveFieldConfig,
}

impl CaveField {
    /// Create a new cave field with the given configuration.
    pub fn new(config: CaveFieldConfig) -> Self {
        let noise = Simplex::new(derive_source_seed(config.seed, CAVE_SALT) as u32);
        Self { noise, config }
    }

    /// Returns the cave configuration.
    pub fn config(&self) -> &CaveFieldConfig {
        &self.config
    }

    /// Whether world cell `(x, y, z)` lies inside a tunnel.
    ///
    /// `surface` is the column's surface altitude and `sea_level` the world's.
    pub fn is_cave(&self, x: i32, y: i32, z: i32, surface: i32, sea_level: i32) -> bool {
        if y >= surface {
            return false;
        }

        let depth_below_surface = f64::from(surface - y);
        if depth_below_surface < self.config.min_depth {
            return false;
        }
        if depth_below_surface > self.config.max_depth {
            return false;
        }

        // Submerged columns keep a solid floor.
        if surface <= sea_level && depth_below_surface < self.config.ocean_floor_buffer {
            return false;
        }

        let noise_val = self.sample_cave_noise(DVec3::new(f64::from(x), f64::from(y), f64::from(z)));

        // Caves become less likely near max_depth.
        let depth_factor = 1.0
            - ((depth_below_surface - self.config.min_depth)
                / (self.config.max_depth - self.config.min_depth))
                .powf(2.0);

        noise_val <= self.config.threshold * depth_factor
    }

    /// Sample multi-octave 3D cave noise at a position.
    fn sample_cave_noise(&self, pos: DVec3) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.config.frequency;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.config.octaves {
            let val = self
                .noise
                .get([pos.x * frequency, pos.y * frequency, pos.z * frequency]);
            total += val * amplitude;
            max_amplitude += amplitude;

            frequency *= self.config.lacunarity;
            amplitude *= self.config.persistence;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        total / max_amplitude
    }
}

/// Carves caves through whole chunks.
pub struct CavePass {
    field: CaveField,
    carver: CaveCarver,
    sea_level: i32,
    lava: MaterialId,
}

impl CavePass {
    /// Creates a pass that fills deep carves with lava.
    pub fn new(field: CaveField, carver: CaveCarver, sea_level: i32) -> Self {
        Self {
            field,
            carver,
            sea_level,
            lava: LAVA,
        }
    }

    /// Overrides the material used below the lava depth.
    pub fn with_lava(mut self, lava: MaterialId) -> Self {
        self.lava = lava;
        self
    }

    /// The carver this pass delegates to.
    pub fn carver(&self) -> &CaveCarver {
        &self.carver
    }

    /// Carves every tunnel cell of `chunk` and returns how many cells changed.
    ///
    /// The vertical search is bounded by the chunk's probed maximum altitude.
    /// Chunks with an unresolved surface are skipped.
    pub fn run<C: ChunkAccess + ?Sized>(
        &self,
        chunk: &mut C,
        pos: ChunkPos,
        profile: &MaterialProfile,
    ) -> usize {
        let registry = self.carver.registry();
        let ceiling = match max_altitude(chunk, registry) {
            Ok(altitude) => altitude,
            Err(err) => {
                tracing::warn!(chunk_x = pos.x, chunk_z = pos.z, %err, "skipping cave pass");
                return 0;
            }
        };

        let mut carved = 0;
        for local_x in 0..16 {
            for local_z in 0..16 {
                let Some(surface) = column_surface_altitude(chunk, registry, local_x, local_z)
                else {
                    continue;
                };
                let (world_x, world_z) = pos.world_column(local_x, local_z);
                // Top-down, so sand is capped before the cell below it is dug.
                for y in (1..surface.min(ceiling)).rev() {
                    if self
                        .field
                        .is_cave(world_x, y, world_z, surface, self.sea_level)
                        && self
                            .carver
                            .carve(chunk, profile, self.lava, local_x, y, local_z, pos)
                    {
                        carved += 1;
                    }
                }
            }
        }

        tracing::debug!(chunk_x = pos.x, chunk_z = pos.z, carved, "cave pass complete");
        carved
    }
}
