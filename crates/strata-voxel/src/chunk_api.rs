//! Chunk buffer with bounds-checked material access and the [`ChunkAccess`] capability.
//!
//! Generation passes never own a chunk. They receive `&mut impl ChunkAccess`
//! for the duration of one column or cell operation, so two passes can only
//! touch the same column when the caller serializes them.

use crate::chunk::{CHUNK_HEIGHT, ChunkData, MAX_Y};
use crate::registry::{MaterialId, MaterialRegistry, builtin};

/// Read/write capability over a chunk-local material grid.
///
/// `x` and `z` are chunk-local and implementations mask them with `& 15`, so
/// world coordinates may be passed directly. `y` is absolute in `0..256`.
pub trait ChunkAccess {
    /// Returns the material at `(x, y, z)`. Out-of-range `y` reads as air.
    fn material(&self, x: i32, y: i32, z: i32) -> MaterialId;

    /// Writes `material` at `(x, y, z)`. Out-of-range `y` writes are dropped.
    fn set_material(&mut self, x: i32, y: i32, z: i32, material: MaterialId);

    /// One above the highest cell in the column that is neither air nor liquid.
    ///
    /// Returns 0 for a column with no such cell.
    fn ocean_floor_height(&self, x: i32, z: i32, registry: &MaterialRegistry) -> i32 {
        (0..=MAX_Y)
            .rev()
            .find(|&y| {
                let material = self.material(x, y, z);
                !registry.is_air(material) && !registry.is_liquid(material)
            })
            .map_or(0, |y| y + 1)
    }
}

/// A 16×256×16 chunk with bounds-checked access and a modification counter.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The underlying dense storage.
    data: ChunkData,
    /// Set on every mutation, cleared by the owner.
    modified: bool,
    /// Monotonically increasing version counter, incremented on each mutation.
    version: u64,
}

impl Chunk {
    /// Creates a new chunk filled with Air.
    pub fn new() -> Self {
        Self {
            data: ChunkData::new_air(),
            modified: false,
            version: 0,
        }
    }

    /// Creates a new chunk filled with the given material.
    pub fn new_filled(material: MaterialId) -> Self {
        Self {
            data: ChunkData::new(material),
            modified: false,
            version: 0,
        }
    }

    /// Returns the material at `(x, y, z)`.
    ///
    /// Returns Air if `y` is outside `0..256`.
    pub fn get(&self, x: i32, y: i32, z: i32) -> MaterialId {
        if !Self::y_in_bounds(y) {
            return builtin::AIR;
        }
        self.data
            .get((x & 15) as usize, y as usize, (z & 15) as usize)
    }

    /// Sets the material at `(x, y, z)`.
    ///
    /// No-op with a warning log if `y` is outside `0..256`.
    pub fn set(&mut self, x: i32, y: i32, z: i32, material: MaterialId) {
        if !Self::y_in_bounds(y) {
            tracing::warn!("Chunk::set out of bounds: ({}, {}, {})", x, y, z);
            return;
        }
        self.data
            .set((x & 15) as usize, y as usize, (z & 15) as usize, material);
        self.modified = true;
        self.version += 1;
    }

    /// Fills every cell in the chunk with the given material.
    pub fn fill(&mut self, material: MaterialId) {
        self.data.fill(material);
        self.modified = true;
        self.version += 1;
    }

    /// Writes `material` into column `(x, z)` for every `y` in `bottom..=top`.
    ///
    /// The range is clipped to the chunk's vertical extent.
    pub fn fill_column(&mut self, x: i32, z: i32, bottom: i32, top: i32, material: MaterialId) {
        let bottom = bottom.max(0);
        let top = top.min(MAX_Y);
        if bottom > top {
            return;
        }
        for y in bottom..=top {
            self.data
                .set((x & 15) as usize, y as usize, (z & 15) as usize, material);
        }
        self.modified = true;
        self.version += 1;
    }

    /// Iterates column `(x, z)` from `y = 0` upward.
    pub fn column(&self, x: i32, z: i32) -> impl Iterator<Item = MaterialId> + '_ {
        self.data.column((x & 15) as usize, (z & 15) as usize)
    }

    /// Returns `true` if the chunk changed since the last [`Chunk::clear_modified`].
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clears the modification flag.
    pub fn clear_modified(&mut self) {
        self.modified = false;
    }

    /// Returns the current version counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns a reference to the underlying [`ChunkData`].
    pub fn data(&self) -> &ChunkData {
        &self.data
    }

    fn y_in_bounds(y: i32) -> bool {
        (0..CHUNK_HEIGHT as i32).contains(&y)
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkAccess for Chunk {
    fn material(&self, x: i32, y: i32, z: i32) -> MaterialId {
        self.get(x, y, z)
    }

    fn set_material(&mut self, x: i32, y: i32, z: i32, material: MaterialId) {
        self.set(x, y, z, material);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
