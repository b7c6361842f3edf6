//! Glaciers: packed-ice caps that thin out where the glacier noise peaks.

use strata_voxel::builtin::{AIR, BLUE_ICE, PACKED_ICE};
use strata_voxel::{ChunkAccess, MAX_Y, MaterialRegistry};

use super::ColumnContext;
use crate::octave::OctaveNoise;

/// Ice depth offset for a glacier noise sample.
///
/// Non-zero only for samples strictly inside `(0.1, 0.5)`, where it is
/// `floor(1171875 * (sample - 0.26)^4) - 3`.
pub fn glacier_thinning(sample: f64) -> i32 {
    if sample > 0.1 && sample < 0.5 {
        (1_171_875.0 * (sample - 0.26).powi(4)).floor() as i32 - 3
    } else {
        0
    }
}

pub(crate) fn build<C>(registry: &MaterialRegistry, noise: &OctaveNoise, ctx: &ColumnContext, chunk: &mut C)
where
    C: ChunkAccess + ?Sized,
{
    let sample = noise.sample(ctx.world_x as f64, ctx.world_z as f64);
    build_with_offset(registry, glacier_thinning(sample), ctx, chunk);
}

/// Rewrites the column top-down. Each cell reads the cell above it, which
/// this pass may already have rewritten.
fn build_with_offset<C>(registry: &MaterialRegistry, offset: i32, ctx: &ColumnContext, chunk: &mut C)
where
    C: ChunkAccess + ?Sized,
{
    let (x, z) = (ctx.local_x(), ctx.local_z());
    let mut height = ctx.height.min(MAX_Y);

    if offset != 0 {
        chunk.set_material(x, height, z, AIR);
        chunk.set_material(x, height - 1, z, AIR);
        height -= 2;
    }

    for y in (0..=height).rev() {
        let depth = y - height;
        let material = if depth > offset {
            if depth == -1 { BLUE_ICE } else { PACKED_ICE }
        } else if y < MAX_Y {
            let above = chunk.material(x, y + 1, z);
            if registry.is_air(above) {
                ctx.profile.top
            } else if registry.is_liquid(above) {
                ctx.profile.underwater
            } else if y < MAX_Y - 2
                && (registry.is_air(chunk.material(x, y + 3, z))
                    || registry.is_air(chunk.material(x, y + 2, z)))
            {
                ctx.profile.under
            } else {
                ctx.solid
            }
        } else {
            ctx.solid
        };
        chunk.set_material(x, y, z, material);
    }
}

#[cfg(test)]
mod tests {
    use strata_voxel::builtin::{STONE, WATER};

    use super::*;
    use crate::biome::MaterialProfile;
    use crate::surface::test_support::{column_slice, context, stone_column};

    fn run(offset: i32, top: i32) -> strata_voxel::Chunk {
        let registry = MaterialRegistry::new();
        let mut chunk = stone_column(top);
        let ctx = context(top, 0.0, MaterialProfile::GLACIER);
        build_with_offset(&registry, offset, &ctx, &mut chunk);
        chunk
    }

    #[test]
    fn test_thinning_at_point_three() {
        // 0.3 - 0.26 is slightly under 0.04 in f64, so the product lands just
        // below 3.0 and floors to 2. The offset is non-zero and the column clears.
        assert_eq!(glacier_thinning(0.3), -1);
        assert_eq!(glacier_thinning(0.26), -3);
    }

    #[test]
    fn test_thinning_zero_outside_window() {
        for sample in [-1.0, 0.0, 0.1, 0.5, 0.75, 1.0] {
            assert_eq!(glacier_thinning(sample), 0, "sample {sample}");
        }
        assert_ne!(glacier_thinning(0.49), 0);
    }

    #[test]
    fn test_no_offset_keeps_surface_cells() {
        let chunk = run(0, 80);
        let profile = MaterialProfile::GLACIER;
        assert_eq!(
            column_slice(&chunk, 76, 81),
            vec![STONE, STONE, profile.under, profile.under, profile.top, AIR]
        );
    }

    #[test]
    fn test_offset_clears_two_cells_and_lays_ice() {
        let chunk = run(-3, 80);
        assert_eq!(chunk.get(4, 80, 4), AIR);
        assert_eq!(chunk.get(4, 79, 4), AIR);
        assert_eq!(
            column_slice(&chunk, 75, 78),
            vec![STONE, PACKED_ICE, BLUE_ICE, PACKED_ICE]
        );
    }

    #[test]
    fn test_void_clearing_only_when_offset_nonzero() {
        let untouched = run(0, 80);
        assert_ne!(untouched.get(4, 80, 4), AIR);
        assert_ne!(untouched.get(4, 79, 4), AIR);

        let large = run(40, 80);
        assert_eq!(large.get(4, 80, 4), AIR);
        assert_eq!(large.get(4, 79, 4), AIR);
        assert_eq!(large.get(4, 78, 4), MaterialProfile::GLACIER.top);
    }

    #[test]
    fn test_submerged_cell_gets_underwater_material() {
        let registry = MaterialRegistry::new();
        let mut chunk = stone_column(50);
        chunk.fill_column(4, 4, 51, 62, WATER);
        let ctx = context(50, 0.0, MaterialProfile::GLACIER);
        build_with_offset(&registry, 0, &ctx, &mut chunk);
        assert_eq!(chunk.get(4, 50, 4), MaterialProfile::GLACIER.underwater);
    }

    #[test]
    fn test_column_at_build_limit_uses_solid() {
        let chunk = run(0, MAX_Y);
        assert_eq!(chunk.get(4, MAX_Y, 4), STONE);
    }
}
