//! Chunk-wide surface pass: feeds every column of a chunk through its biome's variant.

use strata_voxel::builtin::{STONE, WATER};
use strata_voxel::{ChunkAccess, ChunkPos, MAX_Y, MaterialId, MaterialRegistry};

use super::{ColumnContext, SurfaceSynthesizer};
use crate::biome::BiomeDef;
use crate::cache::SeedCache;
use crate::octave::{OctaveConfig, OctaveNoise};
use crate::seed::{chunk_rng, derive_source_seed};

/// Salt separating the surface depth field from other per-world noise.
const SURFACE_DEPTH_SALT: u64 = 0x5EED_DE97;

/// Scale from the unit depth field to the per-column noise value.
const SURFACE_DEPTH_SCALE: f64 = 15.0;

/// Runs surface synthesis over whole chunks for one world.
pub struct SurfacePass {
    synthesizer: SurfaceSynthesizer,
    depth_noise: SeedCache<OctaveNoise>,
    seed: u64,
    sea_level: i32,
    solid: MaterialId,
    liquid: MaterialId,
}

impl SurfacePass {
    /// Creates a pass with stone and water as the base-terrain placeholders.
    pub fn new(synthesizer: SurfaceSynthesizer, seed: u64, sea_level: i32) -> Self {
        Self {
            synthesizer,
            depth_noise: SeedCache::new(),
            seed,
            sea_level,
            solid: STONE,
            liquid: WATER,
        }
    }

    /// Overrides the placeholder materials written by base terrain.
    pub fn with_placeholders(mut self, solid: MaterialId, liquid: MaterialId) -> Self {
        self.solid = solid;
        self.liquid = liquid;
        self
    }

    /// The synthesizer this pass dispatches to.
    pub fn synthesizer(&self) -> &SurfaceSynthesizer {
        &self.synthesizer
    }

    /// Surface depth noise for world column `(world_x, world_z)`.
    pub fn column_noise(&self, world_x: i32, world_z: i32) -> f64 {
        let field = self.depth_noise.get_or_build(self.seed, |seed| {
            OctaveNoise::from_seed(
                derive_source_seed(seed, SURFACE_DEPTH_SALT),
                OctaveConfig::SURFACE_DEPTH,
            )
        });
        field.sample(world_x as f64, world_z as f64) * SURFACE_DEPTH_SCALE
    }

    /// Dresses every column of `chunk` with `biome`'s surface.
    ///
    /// Columns are visited in x-major order with one RNG per chunk, so the
    /// result depends only on the world seed and `pos`.
    pub fn run<C: ChunkAccess + ?Sized>(&self, chunk: &mut C, pos: ChunkPos, biome: &BiomeDef) {
        let registry = self.synthesizer.registry();
        let mut rng = chunk_rng(self.seed, pos);

        for local_x in 0..16 {
            for local_z in 0..16 {
                let (world_x, world_z) = pos.world_column(local_x, local_z);
                let ctx = ColumnContext {
                    seed: self.seed,
                    world_x,
                    world_z,
                    height: working_height(chunk, registry, local_x, local_z),
                    noise: self.column_noise(world_x, world_z),
                    solid: self.solid,
                    liquid: self.liquid,
                    sea_level: self.sea_level,
                    profile: biome.profile,
                };
                self.synthesizer
                    .build_column(biome.surface, &ctx, chunk, &mut rng);
            }
        }

        tracing::debug!(
            chunk_x = pos.x,
            chunk_z = pos.z,
            biome = %biome.name,
            variant = %biome.surface,
            "surface pass complete"
        );
    }
}

/// One above the highest non-air cell, capped at the top of the chunk.
fn working_height<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
    x: i32,
    z: i32,
) -> i32 {
    (0..=MAX_Y)
        .rev()
        .find(|&y| !registry.is_air(chunk.material(x, y, z)))
        .map_or(0, |y| (y + 1).min(MAX_Y))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use strata_voxel::builtin::{AIR, GRANITE, GRASS_BLOCK, RED_SAND};
    use strata_voxel::Chunk;

    use super::*;
    use crate::biome::{BiomeRegistry, MaterialProfile};
    use crate::seed::hash_chunk;
    use crate::surface::{DuneConfig, SurfaceVariant};

    fn pass(seed: u64) -> SurfacePass {
        let registry = Arc::new(MaterialRegistry::new());
        SurfacePass::new(SurfaceSynthesizer::new(registry, DuneConfig::default()), seed, 63)
    }

    fn flat_chunk(top: i32) -> Chunk {
        flat_chunk_of(top, STONE)
    }

    fn flat_chunk_of(top: i32, material: MaterialId) -> Chunk {
        let mut chunk = Chunk::new();
        for x in 0..16 {
            for z in 0..16 {
                chunk.fill_column(x, z, 0, top, material);
            }
        }
        chunk
    }

    #[test]
    fn test_working_height_is_above_top_cell() {
        let registry = MaterialRegistry::new();
        let chunk = flat_chunk(70);
        assert_eq!(working_height(&chunk, &registry, 3, 3), 71);
        assert_eq!(working_height(&Chunk::new(), &registry, 3, 3), 0);
        assert_eq!(working_height(&flat_chunk(MAX_Y), &registry, 0, 0), MAX_Y);
    }

    #[test]
    fn test_default_biome_grasses_every_column() {
        let biome = BiomeDef::new("plains", MaterialProfile::GRASSLAND, SurfaceVariant::Default);
        let mut chunk = flat_chunk(70);
        pass(1).run(&mut chunk, ChunkPos::new(0, 0), &biome);

        for x in 0..16 {
            for z in 0..16 {
                // Columns whose depth noise exhausts the band lose their top.
                let top = chunk.get(x, 70, z);
                assert!(top == GRASS_BLOCK || top == AIR, "({x}, {z}) topped with {top:?}");
                assert_eq!(chunk.get(x, 71, z), AIR);
            }
        }
    }

    #[test]
    fn test_every_default_biome_runs() {
        let biomes = BiomeRegistry::with_defaults();
        for (_, biome) in biomes.iter() {
            let mut chunk = flat_chunk(90);
            chunk.clear_modified();
            pass(5).run(&mut chunk, ChunkPos::new(-2, 7), biome);
            assert!(chunk.is_modified(), "{} did nothing", biome.name);
        }
    }

    #[test]
    fn test_same_seed_same_chunk_on_other_threads() {
        let biome = BiomeDef::new("badlands", MaterialProfile::BADLANDS, SurfaceVariant::Banded);
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let biome = biome.clone();
                std::thread::spawn(move || {
                    let mut chunk = flat_chunk(100);
                    pass(2024).run(&mut chunk, ChunkPos::new(3, -4), &biome);
                    hash_chunk(&chunk)
                })
            })
            .collect();
        let hashes: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(hashes.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_different_seeds_band_differently() {
        let biome = BiomeDef::new("badlands", MaterialProfile::BADLANDS, SurfaceVariant::Banded);
        let mut a = flat_chunk(100);
        let mut b = flat_chunk(100);
        pass(1).run(&mut a, ChunkPos::new(0, 0), &biome);
        pass(2).run(&mut b, ChunkPos::new(0, 0), &biome);
        assert_ne!(hash_chunk(&a), hash_chunk(&b));
        assert_ne!(a.get(0, 100, 0), RED_SAND);
    }

    #[test]
    fn test_custom_solid_placeholder_is_dressed() {
        let biome = BiomeDef::new("plains", MaterialProfile::GRASSLAND, SurfaceVariant::Default);
        let pass = pass(1).with_placeholders(GRANITE, WATER);

        let mut chunk = flat_chunk_of(70, GRANITE);
        pass.run(&mut chunk, ChunkPos::new(0, 0), &biome);
        for x in 0..16 {
            for z in 0..16 {
                let top = chunk.get(x, 70, z);
                assert!(top == GRASS_BLOCK || top == AIR, "({x}, {z}) topped with {top:?}");
                assert_eq!(chunk.get(x, 40, z), GRANITE);
            }
        }

        // Stone is no longer the placeholder, so nothing is dressed.
        let mut stone = flat_chunk(70);
        let before = hash_chunk(&stone);
        pass.run(&mut stone, ChunkPos::new(0, 0), &biome);
        assert_eq!(hash_chunk(&stone), before);
    }
}
