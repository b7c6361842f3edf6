//! Surface altitude probes over sampled columns of a chunk.
//!
//! Liquid counts as surface: a flooded column reports the height just above
//! its sea floor, not the water line.

use strata_voxel::{ChunkAccess, MAX_Y, MaterialRegistry};

use crate::TerrainError;

/// Legacy marker for a column whose surface could not be found.
pub const UNRESOLVED_ALTITUDE: i32 = -1;

/// Local offsets probed on each axis for whole-chunk estimates.
const CHUNK_PROBES: [i32; 3] = [0, 7, 15];

/// Local offsets probed on each axis inside a 2×2 sub-chunk.
const SUB_CHUNK_PROBES: [i32; 2] = [0, 1];

fn is_ground(registry: &MaterialRegistry, material: strata_voxel::MaterialId) -> bool {
    !registry.is_air(material) && !registry.is_liquid(material)
}

/// Surface altitude of column `(x, z)`, searching `bottom..=top` from the top.
///
/// Returns one above the highest ground cell, or `top` itself when that cell
/// is ground. Returns `None` when the range holds no ground at all.
pub fn search_surface_altitude<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
    x: i32,
    z: i32,
    top: i32,
    bottom: i32,
) -> Option<i32> {
    let top = top.min(MAX_Y);
    let bottom = bottom.max(0);
    (bottom..=top)
        .rev()
        .find(|&y| is_ground(registry, chunk.material(x, y, z)))
        .map(|y| if y == top { top } else { y + 1 })
}

/// Surface altitude of column `(x, z)` over the full chunk height.
pub fn column_surface_altitude<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
    x: i32,
    z: i32,
) -> Option<i32> {
    search_surface_altitude(chunk, registry, x, z, MAX_Y, 0)
}

fn probe<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
    x: i32,
    z: i32,
) -> Result<i32, TerrainError> {
    column_surface_altitude(chunk, registry, x, z).ok_or(TerrainError::UnresolvedAltitude { x, z })
}

fn probe_grid<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
    columns: impl Iterator<Item = (i32, i32)>,
    pick: fn(i32, i32) -> i32,
) -> Result<i32, TerrainError> {
    let mut result = None;
    for (x, z) in columns {
        let altitude = probe(chunk, registry, x, z)?;
        result = Some(result.map_or(altitude, |best| pick(best, altitude)));
    }
    result.ok_or(TerrainError::UnresolvedAltitude { x: 0, z: 0 })
}

fn grid(offsets: &[i32]) -> impl Iterator<Item = (i32, i32)> + '_ {
    offsets
        .iter()
        .flat_map(move |&x| offsets.iter().map(move |&z| (x, z)))
}

/// Approximate highest surface in the chunk from a 3×3 probe grid.
///
/// # Errors
///
/// Returns [`TerrainError::UnresolvedAltitude`] if any probed column has no surface.
pub fn max_altitude<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
) -> Result<i32, TerrainError> {
    probe_grid(chunk, registry, grid(&CHUNK_PROBES), i32::max)
}

/// Approximate lowest surface in the chunk from a 3×3 probe grid.
///
/// # Errors
///
/// Returns [`TerrainError::UnresolvedAltitude`] if any probed column has no surface.
pub fn min_altitude<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
) -> Result<i32, TerrainError> {
    probe_grid(chunk, registry, grid(&CHUNK_PROBES), i32::min)
}

/// Highest surface among the four columns of sub-chunk `(sub_x, sub_z)`.
///
/// Sub-chunk coordinates are chunk-local coordinates halved, so `(7, 7)`
/// covers columns 14 and 15 on both axes.
///
/// # Errors
///
/// Returns [`TerrainError::UnresolvedAltitude`] if any of the columns has no surface.
pub fn max_altitude_sub_chunk<C: ChunkAccess + ?Sized>(
    chunk: &C,
    registry: &MaterialRegistry,
    sub_x: i32,
    sub_z: i32,
) -> Result<i32, TerrainError> {
    let columns = grid(&SUB_CHUNK_PROBES).map(|(dx, dz)| (sub_x * 2 + dx, sub_z * 2 + dz));
    probe_grid(chunk, registry, columns, i32::max)
}

/// Collapses a probe result to the legacy integer form, [`UNRESOLVED_ALTITUDE`] on error.
pub fn altitude_or_sentinel(result: Result<i32, TerrainError>) -> i32 {
    result.unwrap_or(UNRESOLVED_ALTITUDE)
}
