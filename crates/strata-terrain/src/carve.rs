//! Cave carving: which cells may be hollowed out, and the repairs that follow.

use std::sync::Arc;

use strata_voxel::builtin::{
    AIR, ANDESITE, CAVE_AIR, COARSE_DIRT, DIORITE, DIRT, FARMLAND, GRANITE, GRASS_BLOCK,
    GRASS_PATH, GRAVEL, MYCELIUM, PACKED_ICE, PODZOL, RED_SAND, RED_SANDSTONE, SAND, SANDSTONE,
    SNOW, STONE, TERRACOTTA, TERRACOTTA_COLORS,
};
use strata_voxel::{ChunkAccess, ChunkPos, MaterialId, MaterialKind, MaterialRegistry};

use crate::biome::MaterialProfile;

/// Materials that are always carvable, on top of anything stone-like.
const CARVABLE: [MaterialId; 14] = [
    STONE,
    GRANITE,
    DIORITE,
    ANDESITE,
    DIRT,
    COARSE_DIRT,
    PODZOL,
    GRASS_BLOCK,
    TERRACOTTA,
    SANDSTONE,
    RED_SANDSTONE,
    MYCELIUM,
    SNOW,
    PACKED_ICE,
];

/// Carving settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarveConfig {
    /// Carved cells at or below this height fill with lava instead of void.
    pub lava_depth: i32,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self { lava_depth: 10 }
    }
}

/// Decides carve eligibility and performs single-cell carves.
#[derive(Clone, Debug)]
pub struct CaveCarver {
    registry: Arc<MaterialRegistry>,
    config: CarveConfig,
}

impl CaveCarver {
    /// Creates a carver.
    pub fn new(registry: Arc<MaterialRegistry>, config: CarveConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the carving configuration.
    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    /// The registry used to classify materials.
    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    /// Whether `material`, with `above` resting on it, may become a cave.
    ///
    /// Trees, anything under a trunk, and farmland or paths are protected.
    /// Stone-like and common ground materials are carvable. Sand and gravel
    /// are carvable only when no liquid sits directly above them.
    pub fn is_replaceable(&self, material: MaterialId, above: MaterialId) -> bool {
        let registry = &self.registry;
        if registry.is_wood_or_leaves(material) {
            return false;
        }
        if registry.kind(above) == MaterialKind::Wood {
            return false;
        }
        if material == FARMLAND || material == GRASS_PATH {
            return false;
        }
        if registry.kind(material) == MaterialKind::Stone {
            return true;
        }
        if CARVABLE.contains(&material) || TERRACOTTA_COLORS.contains(&material) {
            return true;
        }
        (material == SAND || material == GRAVEL) && !registry.is_liquid(above)
    }

    /// Carves the cell at chunk-local `(x, y, z)`.
    ///
    /// Returns `false` and leaves the chunk untouched when the cell is not
    /// eligible. At or below the lava depth the cell becomes `lava`. Above it
    /// the cell becomes cave air. A carved biome top is re-laid two cells
    /// lower, and sand left hanging above the void turns to sandstone.
    #[allow(clippy::too_many_arguments)]
    pub fn carve<C: ChunkAccess + ?Sized>(
        &self,
        chunk: &mut C,
        profile: &MaterialProfile,
        lava: MaterialId,
        x: i32,
        y: i32,
        z: i32,
        chunk_pos: ChunkPos,
    ) -> bool {
        let target = chunk.material(x, y, z);
        let above = chunk.material(x, y + 1, z);

        let eligible = self.is_replaceable(target, above)
            || target == profile.top
            || target == profile.under;
        if !eligible {
            return false;
        }

        if y <= self.config.lava_depth {
            chunk.set_material(x, y, z, lava);
            tracing::trace!(chunk_x = chunk_pos.x, chunk_z = chunk_pos.z, x, y, z, "lava fill");
            return true;
        }

        if target == profile.top && self.is_replaceable(chunk.material(x, y - 2, z), AIR) {
            chunk.set_material(x, y - 2, z, profile.top);
        }
        chunk.set_material(x, y, z, CAVE_AIR);

        if above == SAND {
            chunk.set_material(x, y + 1, z, SANDSTONE);
        } else if above == RED_SAND {
            chunk.set_material(x, y + 1, z, RED_SANDSTONE);
        }

        tracing::trace!(chunk_x = chunk_pos.x, chunk_z = chunk_pos.z, x, y, z, "carved");
        true
    }
}
