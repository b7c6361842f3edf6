//! Deterministic seeded generation utilities.
//!
//! Provides per-chunk RNG derivation from a world seed and chunk position,
//! plus content hashing used to verify that generation is reproducible.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use strata_voxel::{Chunk, ChunkPos};

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derive a u64 seed for a chunk from the world seed and chunk position.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the world seed with
/// the chunk position into a well-distributed u64.
pub fn derive_chunk_seed(world_seed: u64, pos: ChunkPos) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    pos.x.hash(&mut hasher);
    pos.z.hash(&mut hasher);
    hasher.finish()
}

/// Derive a deterministic RNG for a specific chunk.
///
/// The returned RNG will produce an identical sequence of random numbers
/// for the same `(world_seed, pos)` pair, regardless of thread or platform.
pub fn chunk_rng(world_seed: u64, pos: ChunkPos) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_chunk_seed(world_seed, pos))
}

/// Derive an independent seed for one noise source of the world.
///
/// `salt` keeps sources built from the same world seed decorrelated.
pub fn derive_source_seed(world_seed: u64, salt: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    salt.hash(&mut hasher);
    hasher.finish()
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Hash the contents of a [`Chunk`] for determinism comparison.
pub fn hash_chunk(chunk: &Chunk) -> u64 {
    let mut hasher = DefaultHasher::new();
    for material in chunk.data().cells() {
        material.0.hash(&mut hasher);
    }
    hasher.finish()
}
