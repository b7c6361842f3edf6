//! Per-biome surface material triples.

use strata_voxel::builtin::{
    DIRT, GRASS_BLOCK, GRAVEL, ICE, RED_SAND, SAND, SNOW, WHITE_TERRACOTTA,
};
use strata_voxel::{MaterialId, MaterialRegistry};

use crate::TerrainError;

/// The materials a biome uses to dress a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialProfile {
    /// Topmost exposed cell.
    pub top: MaterialId,
    /// Filler directly beneath the top.
    pub under: MaterialId,
    /// Top replacement for submerged surfaces.
    pub underwater: MaterialId,
}

impl MaterialProfile {
    /// Grass over dirt, gravel underwater.
    pub const GRASSLAND: Self = Self {
        top: GRASS_BLOCK,
        under: DIRT,
        underwater: GRAVEL,
    };

    /// Red sand over terracotta.
    pub const BADLANDS: Self = Self {
        top: RED_SAND,
        under: WHITE_TERRACOTTA,
        underwater: GRAVEL,
    };

    /// Sand all the way down.
    pub const DESERT: Self = Self {
        top: SAND,
        under: SAND,
        underwater: GRAVEL,
    };

    /// Snow over ice.
    pub const GLACIER: Self = Self {
        top: SNOW,
        under: ICE,
        underwater: GRAVEL,
    };

    /// Resolves a profile from material names.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::UnknownMaterial`] for the first name that is not registered.
    pub fn from_names(
        registry: &MaterialRegistry,
        top: &str,
        under: &str,
        underwater: &str,
    ) -> Result<Self, TerrainError> {
        let resolve = |name: &str| {
            registry
                .lookup_by_name(name)
                .ok_or_else(|| TerrainError::UnknownMaterial(name.to_string()))
        };
        Ok(Self {
            top: resolve(top)?,
            under: resolve(under)?,
            underwater: resolve(underwater)?,
        })
    }
}

impl Default for MaterialProfile {
    fn default() -> Self {
        Self::GRASSLAND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_names_resolves_builtins() {
        let registry = MaterialRegistry::new();
        let profile = MaterialProfile::from_names(&registry, "red_sand", "white_terracotta", "gravel")
            .unwrap();
        assert_eq!(profile, MaterialProfile::BADLANDS);
    }

    #[test]
    fn test_from_names_reports_unknown_material() {
        let registry = MaterialRegistry::new();
        let err = MaterialProfile::from_names(&registry, "grass_block", "mud", "gravel").unwrap_err();
        assert_eq!(err, TerrainError::UnknownMaterial("mud".into()));
    }
}
