//! Biomes: named pairings of a surface variant with a material profile.

mod def;
mod profile;
mod registry;

pub use def::BiomeDef;
pub use profile::MaterialProfile;
pub use registry::{BiomeId, BiomeRegistry, BiomeRegistryError};
