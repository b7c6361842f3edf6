//! Dense material storage for 16×256×16 chunk columns.
//!
//! Cells are laid out with `x` varying fastest, then `z`, then `y`, so a
//! horizontal layer is contiguous and a vertical column is a fixed stride.

use crate::registry::MaterialId;

/// Horizontal side length of a chunk in cells.
pub const CHUNK_WIDTH: usize = 16;

/// Vertical extent of a chunk in cells.
pub const CHUNK_HEIGHT: usize = 256;

/// Highest valid `y` coordinate.
pub const MAX_Y: i32 = CHUNK_HEIGHT as i32 - 1;

/// Total number of cells in a chunk (16 × 256 × 16).
pub const CHUNK_VOLUME: usize = CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_WIDTH;

/// Identifies a chunk's position on the horizontal chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChunkPos {
    /// Chunk-grid X coordinate.
    pub x: i32,
    /// Chunk-grid Z coordinate.
    pub z: i32,
}

impl ChunkPos {
    /// Creates a new chunk position.
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Returns the chunk containing world column `(world_x, world_z)`.
    pub fn containing(world_x: i32, world_z: i32) -> Self {
        Self {
            x: world_x >> 4,
            z: world_z >> 4,
        }
    }

    /// World-space block coordinates of the chunk's `(0, 0)` column.
    pub fn origin(self) -> (i32, i32) {
        (self.x << 4, self.z << 4)
    }

    /// World-space coordinates of local column `(local_x, local_z)`.
    pub fn world_column(self, local_x: i32, local_z: i32) -> (i32, i32) {
        let (ox, oz) = self.origin();
        (ox + (local_x & 15), oz + (local_z & 15))
    }
}

/// Flat material storage for one 16×256×16 chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkData {
    cells: Box<[MaterialId]>,
}

impl ChunkData {
    /// Creates a new chunk filled entirely with `fill`.
    pub fn new(fill: MaterialId) -> Self {
        Self {
            cells: vec![fill; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    /// Creates a new chunk filled with Air (`MaterialId(0)`).
    pub fn new_air() -> Self {
        Self::new(MaterialId(0))
    }

    /// Returns the material at `(x, y, z)`.
    ///
    /// `x` and `z` must be in `0..16`, `y` in `0..256`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> MaterialId {
        self.cells[Self::linear_index(x, y, z)]
    }

    /// Sets the material at `(x, y, z)`.
    pub fn set(&mut self, x: usize, y: usize, z: usize, material: MaterialId) {
        self.cells[Self::linear_index(x, y, z)] = material;
    }

    /// Resets every cell to `material`.
    pub fn fill(&mut self, material: MaterialId) {
        self.cells.fill(material);
    }

    /// Iterates the column at `(x, z)` from `y = 0` upward.
    pub fn column(&self, x: usize, z: usize) -> impl Iterator<Item = MaterialId> + '_ {
        let base = Self::linear_index(x, 0, z);
        self.cells[base..]
            .iter()
            .step_by(CHUNK_WIDTH * CHUNK_WIDTH)
            .copied()
    }

    /// Number of cells holding `material`.
    pub fn count(&self, material: MaterialId) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    /// Raw cell slice in storage order.
    pub fn cells(&self) -> &[MaterialId] {
        &self.cells
    }

    /// Converts `(x, y, z)` to a linear index (x fastest, then z, then y).
    fn linear_index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < CHUNK_WIDTH && y < CHUNK_HEIGHT && z < CHUNK_WIDTH);
        x + z * CHUNK_WIDTH + y * CHUNK_WIDTH * CHUNK_WIDTH
    }
}

impl Default for ChunkData {
    fn default() -> Self {
        Self::new_air()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
