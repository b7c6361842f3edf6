//! Sand dunes stacked upward from the sea floor.

use noise::{NoiseFn, OpenSimplex};
use strata_voxel::{ChunkAccess, MaterialRegistry};

use super::ColumnContext;

/// Solid cells laid below the floor before the dune itself.
const BASE_CELLS: i32 = 8;

/// Minimum filler cells between the dune body and its top.
const MIN_FILLER: f64 = 3.0;

/// Settings for the dune field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuneConfig {
    /// Seed of the dune shape noise. Independent of the world seed, so every
    /// world shares the same dune field unless this is changed.
    pub noise_seed: u32,
}

impl Default for DuneConfig {
    fn default() -> Self {
        Self { noise_seed: 3445 }
    }
}

/// The dune shape field.
pub(crate) struct DuneNoise(OpenSimplex);

impl DuneNoise {
    pub(crate) fn new(config: DuneConfig) -> Self {
        Self(OpenSimplex::new(config.noise_seed))
    }

    fn sample(&self, x: f64, z: f64) -> f64 {
        self.0.get([x, z])
    }
}

/// Number of whole cells needed to cover `height`, as `for h in 0.. while h < height` would.
fn cells_covering(height: f64) -> i32 {
    if height > 0.0 { height.ceil() as i32 } else { 0 }
}

pub(crate) fn build<C>(registry: &MaterialRegistry, noise: &DuneNoise, ctx: &ColumnContext, chunk: &mut C)
where
    C: ChunkAccess + ?Sized,
{
    let (x, z) = (ctx.local_x(), ctx.local_z());
    let (wx, wz) = (ctx.world_x as f64, ctx.world_z as f64);

    let floor = chunk.ocean_floor_height(x, z, registry);
    let blend = ((floor - ctx.sea_level) as f64 * 0.125).clamp(0.0, 1.0);
    let raw = (noise.sample(wx * 0.01, wz * 0.015) * 30.0 * blend).abs();
    let cap = noise.sample(wx * 0.03 + 5.0, wz * 0.05 + 5.0) * 30.0 + 6.0;
    let dune_cells = cells_covering(raw.min(cap));
    let filler_cells = cells_covering((MIN_FILLER + ctx.noise / 2.0).max(MIN_FILLER));

    let mut y = floor - BASE_CELLS;
    for _ in 0..BASE_CELLS + dune_cells {
        chunk.set_material(x, y, z, ctx.solid);
        y += 1;
    }
    for _ in 0..filler_cells {
        chunk.set_material(x, y, z, ctx.profile.under);
        y += 1;
    }
    chunk.set_material(x, y, z, ctx.profile.top);
}

#[cfg(test)]
mod tests {
    use strata_voxel::Chunk;
    use strata_voxel::builtin::{AIR, SAND, STONE};

    use super::*;
    use crate::biome::MaterialProfile;
    use crate::octave::{OctaveConfig, sample};
    use crate::surface::test_support::{SEA_LEVEL, column_slice, context, stone_column};

    const DUNE_PROFILE: MaterialProfile = MaterialProfile {
        top: SAND,
        under: strata_voxel::builtin::DIRT,
        underwater: strata_voxel::builtin::GRAVEL,
    };

    fn dress(chunk: &mut Chunk, world_x: i32, world_z: i32, noise_value: f64) {
        let registry = MaterialRegistry::new();
        let dune = DuneNoise::new(DuneConfig::default());
        let mut ctx = context(SEA_LEVEL, noise_value, DUNE_PROFILE);
        ctx.world_x = world_x;
        ctx.world_z = world_z;
        build(&registry, &dune, &ctx, chunk);
    }

    #[test]
    fn test_cells_covering_matches_loop_count() {
        assert_eq!(cells_covering(0.0), 0);
        assert_eq!(cells_covering(-2.0), 0);
        assert_eq!(cells_covering(3.0), 3);
        assert_eq!(cells_covering(3.2), 4);
    }

    #[test]
    fn test_flat_sea_floor_has_no_dune_body() {
        for (world_x, world_z) in [(4, 4), (1204, -3372)] {
            let noise_value = sample(3445, world_x as f64, world_z as f64, OctaveConfig::SURFACE_DEPTH);
            let mut chunk = stone_column(SEA_LEVEL - 1);
            dress(&mut chunk, world_x, world_z, noise_value);

            let base_start = SEA_LEVEL - BASE_CELLS;
            assert!(column_slice(&chunk, base_start, SEA_LEVEL - 1).iter().all(|&m| m == STONE));

            let filler = (SEA_LEVEL..)
                .take_while(|&y| chunk.get(4, y, 4) == DUNE_PROFILE.under)
                .count() as i32;
            assert!((3..=4).contains(&filler), "{filler} filler cells");
            assert_eq!(chunk.get(4, SEA_LEVEL + filler, 4), SAND);
            assert_eq!(chunk.get(4, SEA_LEVEL + filler + 1, 4), AIR);
        }
    }

    #[test]
    fn test_flat_sea_floor_is_reproducible() {
        let noise_value = sample(3445, 4.0, 4.0, OctaveConfig::SURFACE_DEPTH);
        let mut a = stone_column(SEA_LEVEL - 1);
        let mut b = stone_column(SEA_LEVEL - 1);
        dress(&mut a, 4, 4, noise_value);
        dress(&mut b, 4, 4, noise_value);
        assert_eq!(column_slice(&a, 0, 255), column_slice(&b, 0, 255));
    }

    #[test]
    fn test_large_noise_raises_filler_count() {
        let mut chunk = stone_column(SEA_LEVEL - 1);
        dress(&mut chunk, 4, 4, 10.0);
        // 3 + 10 / 2 = 8 filler cells.
        assert_eq!(
            column_slice(&chunk, SEA_LEVEL, SEA_LEVEL + 8),
            [vec![DUNE_PROFILE.under; 8], vec![SAND]].concat()
        );
    }

    #[test]
    fn test_negative_noise_keeps_three_filler_cells() {
        let mut chunk = stone_column(SEA_LEVEL - 1);
        dress(&mut chunk, 4, 4, -12.0);
        assert_eq!(
            column_slice(&chunk, SEA_LEVEL, SEA_LEVEL + 3),
            vec![DUNE_PROFILE.under, DUNE_PROFILE.under, DUNE_PROFILE.under, SAND]
        );
    }

    #[test]
    fn test_raised_floor_grows_dune_body() {
        let registry = MaterialRegistry::new();
        let dune = DuneNoise::new(DuneConfig::default());
        let floor = SEA_LEVEL + 8;

        let mut tallest = 0;
        for world_x in (0..2000).step_by(37) {
            let mut chunk = stone_column(floor - 1);
            let mut ctx = context(floor, 0.0, DUNE_PROFILE);
            ctx.world_x = world_x;
            build(&registry, &dune, &ctx, &mut chunk);
            let top = (0..=255).rev().find(|&y| chunk.get(4, y, 4) != AIR).unwrap_or(0);
            // 3 filler cells and a top sit above the dune body.
            tallest = tallest.max(top - floor - 3);
        }
        assert!(tallest > 0, "no column grew a dune body");
    }
}
