//! Procedural terrain generation: layered noise, column surface synthesis,
//! cave carving, and surface altitude probes over 16×256×16 chunks.

mod altitude;
mod cache;
mod carve;
mod cave;
mod error;
mod heightmap;
mod octave;
mod palette;

pub mod biome;
pub mod debug_viz;
pub mod seed;
pub mod surface;

pub use altitude::{
    UNRESOLVED_ALTITUDE, altitude_or_sentinel, column_surface_altitude, max_altitude,
    max_altitude_sub_chunk, min_altitude, search_surface_altitude,
};
pub use biome::{BiomeDef, BiomeId, BiomeRegistry, BiomeRegistryError, MaterialProfile};
pub use cache::SeedCache;
pub use carve::{CarveConfig, CaveCarver};
pub use cave::{CaveField, CaveFieldConfig, CavePass};
pub use error::TerrainError;
pub use heightmap::{BaseTerrain, HeightmapParams, HeightmapSampler};
pub use octave::{OctaveConfig, OctaveNoise, sample};
pub use palette::{BandingTables, LayerPalette, PALETTE_LEN};
pub use surface::{ColumnContext, DuneConfig, SurfacePass, SurfaceSynthesizer, SurfaceVariant};
