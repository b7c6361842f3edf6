//! Material identifiers, the material classification registry, and the dense
//! chunk buffer that terrain generation passes write into.

pub mod chunk;
pub mod chunk_api;
pub mod registry;

pub use chunk::{CHUNK_HEIGHT, CHUNK_VOLUME, CHUNK_WIDTH, ChunkData, ChunkPos, MAX_Y};
pub use chunk_api::{Chunk, ChunkAccess};
pub use registry::{MaterialDef, MaterialId, MaterialKind, MaterialRegistry, RegistryError, builtin};
