//! Banded-cliff layer palette and the per-seed tables that sample it.
//!
//! A palette is a cyclic strip of 64 terracotta bands. Column synthesis reads
//! it by altitude, shifted a couple of cells by a slow horizontal noise so the
//! strata tilt gently across the landscape.

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_voxel::MaterialId;
use strata_voxel::builtin::{
    BLACK_TERRACOTTA, BROWN_TERRACOTTA, CYAN_TERRACOTTA, GRAY_TERRACOTTA, LIGHT_GRAY_TERRACOTTA,
    WHITE_TERRACOTTA,
};

use crate::octave::{OctaveConfig, OctaveNoise};

/// Number of bands in a layer palette.
pub const PALETTE_LEN: usize = 64;

/// A 64-entry cyclic sequence of layer materials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerPalette {
    bands: [MaterialId; PALETTE_LEN],
}

impl LayerPalette {
    /// Draws a palette from `rng`.
    ///
    /// Draw order is fixed, so the same RNG state always yields the same palette.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bands = [WHITE_TERRACOTTA; PALETTE_LEN];

        // Dark bands at gaps of 1..=5.
        let mut i = 0;
        while i < PALETTE_LEN {
            i += rng.random_range(1..=5);
            if i < PALETTE_LEN {
                bands[i] = GRAY_TERRACOTTA;
            }
            i += 1;
        }

        scatter_runs(&mut bands, rng, BLACK_TERRACOTTA, 1..=3);
        scatter_runs(&mut bands, rng, BROWN_TERRACOTTA, 2..=4);
        scatter_runs(&mut bands, rng, CYAN_TERRACOTTA, 1..=3);

        // Highlights with optional light-gray neighbours.
        let highlights = rng.random_range(3..=5);
        let mut z = 0;
        for _ in 0..highlights {
            z += rng.random_range(4..=19);
            if z < PALETTE_LEN {
                bands[z] = WHITE_TERRACOTTA;
                if z > 1 && rng.random_bool(0.5) {
                    bands[z - 1] = LIGHT_GRAY_TERRACOTTA;
                }
                if z < PALETTE_LEN - 1 && rng.random_bool(0.5) {
                    bands[z + 1] = LIGHT_GRAY_TERRACOTTA;
                }
            }
        }

        Self { bands }
    }

    /// The palette the banded variant uses for `seed`.
    pub fn from_seed(seed: u64) -> Self {
        BandingTables::build(seed).palette
    }

    /// Returns the band at `index`, wrapped modulo 64 (negative indices wrap too).
    pub fn get(&self, index: i64) -> MaterialId {
        self.bands[index.rem_euclid(PALETTE_LEN as i64) as usize]
    }

    /// All 64 bands in order.
    pub fn bands(&self) -> &[MaterialId; PALETTE_LEN] {
        &self.bands
    }
}

/// Places 2..=5 runs of `material`, each `run` cells long, at random offsets.
fn scatter_runs<R: Rng + ?Sized>(
    bands: &mut [MaterialId; PALETTE_LEN],
    rng: &mut R,
    material: MaterialId,
    run: RangeInclusive<usize>,
) {
    let count = rng.random_range(2..=5);
    for _ in 0..count {
        let len = rng.random_range(run.clone());
        let start = rng.random_range(0..PALETTE_LEN);
        for cell in bands.iter_mut().skip(start).take(len) {
            *cell = material;
        }
    }
}

/// Per-seed tables for banded synthesis: the palette and its drift noise.
///
/// Both come from one [`ChaCha8Rng`] seeded with the world seed; the palette
/// is drawn first.
#[derive(Clone, Debug)]
pub struct BandingTables {
    /// The layer palette.
    pub palette: LayerPalette,
    layer_noise: OctaveNoise,
}

impl BandingTables {
    /// Builds the tables for `seed`.
    pub fn build(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let palette = LayerPalette::generate(&mut rng);
        let layer_noise = OctaveNoise::new(&mut rng, OctaveConfig::LAYER);
        Self {
            palette,
            layer_noise,
        }
    }

    /// Layer material at world position `(world_x, y, world_z)`.
    ///
    /// The palette index is `y` shifted by at most two cells of horizontal drift.
    pub fn layer_at(&self, world_x: i32, y: i32, world_z: i32) -> MaterialId {
        let drift = (self.layer_noise.sample(world_x as f64, world_z as f64) * 2.0).round() as i64;
        self.palette.get(y as i64 + drift + PALETTE_LEN as i64)
    }
}
