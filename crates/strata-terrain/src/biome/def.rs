//! Biome definition: describes how one biome dresses its columns.

use super::MaterialProfile;
use crate::surface::SurfaceVariant;

/// Full descriptor for a biome type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeDef {
    /// Human-readable biome name (e.g., "badlands").
    pub name: String,
    /// Surface, filler and underwater materials.
    pub profile: MaterialProfile,
    /// Column synthesis strategy applied to this biome.
    pub surface: SurfaceVariant,
}

impl BiomeDef {
    /// Creates a biome definition.
    pub fn new(name: impl Into<String>, profile: MaterialProfile, surface: SurfaceVariant) -> Self {
        Self {
            name: name.into(),
            profile,
            surface,
        }
    }
}
