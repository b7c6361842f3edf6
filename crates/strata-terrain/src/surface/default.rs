//! Plain top-over-filler columns.

use rand::Rng;
use strata_voxel::builtin::{AIR, RED_SAND, RED_SANDSTONE, SAND, SANDSTONE};
use strata_voxel::{ChunkAccess, MAX_Y, MaterialId, MaterialRegistry};

use super::{ColumnContext, top_band_depth};

pub(crate) fn build<C, R>(registry: &MaterialRegistry, ctx: &ColumnContext, chunk: &mut C, rng: &mut R)
where
    C: ChunkAccess + ?Sized,
    R: Rng + ?Sized,
{
    let (x, z) = (ctx.local_x(), ctx.local_z());
    let sea = ctx.sea_level;
    let band = top_band_depth(ctx.noise, rng);

    let mut top: Option<MaterialId> = Some(ctx.profile.top);
    let mut under = ctx.profile.under;
    let mut remaining = -1;

    for y in (0..=ctx.height.min(MAX_Y)).rev() {
        let current = chunk.material(x, y, z);
        if registry.is_air(current) {
            remaining = -1;
            continue;
        }
        if current != ctx.solid {
            continue;
        }

        if remaining == -1 {
            if band <= 0 {
                top = None;
                under = ctx.solid;
            } else if (sea - 4..=sea + 1).contains(&y) {
                top = Some(ctx.profile.top);
                under = ctx.profile.under;
            }
            if y < sea && top.is_none() {
                top = Some(ctx.liquid);
            }

            remaining = band;
            if y >= sea - 1 {
                chunk.set_material(x, y, z, top.unwrap_or(AIR));
            } else if y < sea - 7 - band {
                top = None;
                under = ctx.solid;
                chunk.set_material(x, y, z, ctx.profile.underwater);
            } else {
                chunk.set_material(x, y, z, under);
            }
        } else if remaining > 0 {
            remaining -= 1;
            chunk.set_material(x, y, z, under);

            // Sand rests on a sandstone run that thickens above sea level.
            if remaining == 0 && band > 1 && (under == SAND || under == RED_SAND) {
                remaining = rng.random_range(0..4) + (y - sea).max(0);
                under = if under == RED_SAND { RED_SANDSTONE } else { SANDSTONE };
            }
        }
    }
}
