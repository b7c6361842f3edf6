//! Terracotta cliffs: stacked palette layers under a thin biome top.

use std::f64::consts::PI;

use rand::Rng;
use strata_voxel::builtin::{GRAY_TERRACOTTA, WHITE_TERRACOTTA, is_dyed_terracotta};
use strata_voxel::{ChunkAccess, MAX_Y, MaterialId, MaterialRegistry};

use super::{ColumnContext, top_band_depth};
use crate::palette::BandingTables;

/// The scan stops after this many non-air cells.
const SCAN_LIMIT: u32 = 15;

/// Altitudes whose high cliffs draw from the palette. Outside this window
/// high cliffs are plain gray.
const LAYERED_ALTITUDES: std::ops::RangeInclusive<i32> = 64..=127;

pub(crate) fn build<C, R>(
    registry: &MaterialRegistry,
    tables: &BandingTables,
    ctx: &ColumnContext,
    chunk: &mut C,
    rng: &mut R,
) where
    C: ChunkAccess + ?Sized,
    R: Rng + ?Sized,
{
    let (x, z) = (ctx.local_x(), ctx.local_z());
    let sea = ctx.sea_level;
    let band = top_band_depth(ctx.noise, rng);
    let flat_top = libm::cos(ctx.noise / 3.0 * PI) > 0.0;
    let layer = |y: i32| tables.layer_at(ctx.world_x, y, ctx.world_z);

    // `None` marks a column whose top band has been pushed below the surface.
    let mut top: Option<MaterialId> = Some(ctx.profile.top);
    let mut under = ctx.profile.under;
    let mut remaining = -1;
    let mut flattened = false;
    let mut scanned = 0;

    for y in (0..=ctx.height.min(MAX_Y)).rev() {
        if scanned >= SCAN_LIMIT {
            break;
        }
        let current = chunk.material(x, y, z);
        if registry.is_air(current) {
            remaining = -1;
            continue;
        }
        scanned += 1;
        if current != ctx.solid {
            continue;
        }

        if remaining == -1 {
            flattened = false;
            let exhausted = band <= 0;
            if exhausted {
                top = None;
                under = ctx.solid;
            } else if (sea - 4..=sea + 1).contains(&y) {
                top = Some(ctx.profile.top);
                under = ctx.profile.under;
            }
            if y < sea && top.is_none() {
                top = Some(ctx.liquid);
            }

            remaining = band + (y - sea).max(0);
            // The liquid fallback never reaches the surface of an exhausted band.
            let material = if y >= sea - 1 {
                match top {
                    _ if exhausted => under,
                    None => under,
                    Some(_) if y > sea + 3 + band => {
                        if !LAYERED_ALTITUDES.contains(&y) {
                            GRAY_TERRACOTTA
                        } else if flat_top {
                            WHITE_TERRACOTTA
                        } else {
                            layer(y)
                        }
                    }
                    Some(top) => {
                        flattened = true;
                        top
                    }
                }
            } else if is_dyed_terracotta(under) {
                GRAY_TERRACOTTA
            } else {
                under
            };
            chunk.set_material(x, y, z, material);
        } else if remaining > 0 {
            remaining -= 1;
            let material = if flattened { GRAY_TERRACOTTA } else { layer(y) };
            chunk.set_material(x, y, z, material);
        }
    }
}
