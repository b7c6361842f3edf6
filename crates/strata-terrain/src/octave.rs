//! Seeded multi-octave 2-D simplex noise.
//!
//! Every per-seed noise source in the crate is an [`OctaveNoise`]: one
//! [`Simplex`] per octave, each seeded from a draw of the caller's RNG, summed
//! with halving amplitudes and normalized into `[-1, 1]`.

use noise::{NoiseFn, Simplex};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of an octave stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OctaveConfig {
    /// Number of octaves. Zero yields a constant `0.0` field.
    pub octaves: u32,
    /// Exponent of the first octave: octave `k` runs at
    /// `frequency * 2^(start_octave + k)`.
    pub start_octave: i32,
    /// Base frequency applied to raw world coordinates.
    pub frequency: f64,
}

impl OctaveConfig {
    /// Horizontal drift of the banding layers, one octave over 512-block features.
    pub const LAYER: Self = Self {
        octaves: 1,
        start_octave: 0,
        frequency: 1.0 / 512.0,
    };

    /// Per-column surface depth driver. Callers scale the result by 15.
    pub const SURFACE_DEPTH: Self = Self {
        octaves: 4,
        start_octave: -3,
        frequency: 0.0625,
    };

    /// Glacier thinning field, one octave over 260-block features.
    pub const GLACIER: Self = Self {
        octaves: 1,
        start_octave: 0,
        frequency: 1.0 / 260.0,
    };
}

impl Default for OctaveConfig {
    fn default() -> Self {
        Self::SURFACE_DEPTH
    }
}

/// A deterministic 2-D noise field built from a stack of simplex octaves.
#[derive(Clone)]
pub struct OctaveNoise {
    octaves: Vec<Simplex>,
    config: OctaveConfig,
}

impl OctaveNoise {
    /// Builds the octave stack, drawing one `u32` seed per octave from `rng`.
    pub fn new<R: RngCore + ?Sized>(rng: &mut R, config: OctaveConfig) -> Self {
        let octaves = (0..config.octaves)
            .map(|_| Simplex::new(rng.next_u32()))
            .collect();
        Self { octaves, config }
    }

    /// Builds the octave stack from a fresh [`ChaCha8Rng`] seeded with `seed`.
    pub fn from_seed(seed: u64, config: OctaveConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(&mut rng, config)
    }

    /// Samples the field at world coordinates `(x, z)`.
    ///
    /// The result is always in `[-1, 1]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for (k, octave) in self.octaves.iter().enumerate() {
            let frequency = self.config.frequency * 2f64.powi(self.config.start_octave + k as i32);
            total += octave.get([x * frequency, z * frequency]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
        }

        if max_amplitude == 0.0 {
            return 0.0;
        }
        (total / max_amplitude).clamp(-1.0, 1.0)
    }

    /// Returns the octave configuration.
    pub fn config(&self) -> &OctaveConfig {
        &self.config
    }
}

impl std::fmt::Debug for OctaveNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctaveNoise")
            .field("octaves", &self.octaves.len())
            .field("config", &self.config)
            .finish()
    }
}

/// One-shot sample of the field for `(seed, config)` at `(x, z)`.
///
/// Builds the octave stack on every call. Passes that sample many columns
/// should hold an [`OctaveNoise`] or go through a [`crate::SeedCache`].
pub fn sample(seed: u64, x: f64, z: f64, config: OctaveConfig) -> f64 {
    OctaveNoise::from_seed(seed, config).sample(x, z)
}
