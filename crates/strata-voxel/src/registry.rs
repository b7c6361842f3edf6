//! Material registry: maps compact [`MaterialId`] values to [`MaterialDef`] metadata.
//!
//! The registry is built once during generator startup. Air is always ID 0 so
//! that a freshly allocated chunk buffer represents empty space. Every builtin
//! material is pre-registered in a fixed order, which keeps the constants in
//! [`builtin`] valid for every registry instance.

use rustc_hash::FxHashMap;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact identifier stored inside every chunk cell (2 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MaterialId(pub u16);

/// Coarse classification used by surface synthesis and carve eligibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Empty space, including carved cave voids.
    Air,
    /// Flowing or still fluids (water, lava).
    Liquid,
    /// Rock-like materials. Host-registered rocks with this kind are carvable.
    Stone,
    /// Dirt, grass and other diggable ground cover.
    Soil,
    /// Granular materials that fall when unsupported.
    Sand,
    /// Tree trunks and worked wood.
    Wood,
    /// Foliage.
    Leaves,
    /// Ice and snow.
    Ice,
    /// Fired clay bands.
    Terracotta,
    /// Player or village made ground (farmland, paths).
    Constructed,
    /// Anything else. Never carved unless explicitly allow-listed.
    Other,
}

/// Full descriptor for a material.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDef {
    /// Human-readable name (e.g. "stone", "red_sand").
    pub name: String,
    /// Classification used by the generation rules.
    pub kind: MaterialKind,
    /// Display color used by debug cross-section rendering.
    pub color: [u8; 3],
}

/// Errors that can occur during material registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A material with the same name has already been registered.
    #[error("duplicate material name: {0}")]
    DuplicateName(String),
    /// All 65 536 slots have been consumed.
    #[error("material registry is full (max 65536 materials)")]
    RegistryFull,
}

// ---------------------------------------------------------------------------
// Builtins
// ---------------------------------------------------------------------------

/// Materials every registry starts with. IDs are assigned in table order.
pub mod builtin {
    use super::MaterialId;

    pub const AIR: MaterialId = MaterialId(0);
    pub const CAVE_AIR: MaterialId = MaterialId(1);
    pub const STONE: MaterialId = MaterialId(2);
    pub const GRANITE: MaterialId = MaterialId(3);
    pub const DIORITE: MaterialId = MaterialId(4);
    pub const ANDESITE: MaterialId = MaterialId(5);
    pub const DIRT: MaterialId = MaterialId(6);
    pub const COARSE_DIRT: MaterialId = MaterialId(7);
    pub const PODZOL: MaterialId = MaterialId(8);
    pub const GRASS_BLOCK: MaterialId = MaterialId(9);
    pub const MYCELIUM: MaterialId = MaterialId(10);
    pub const SAND: MaterialId = MaterialId(11);
    pub const RED_SAND: MaterialId = MaterialId(12);
    pub const GRAVEL: MaterialId = MaterialId(13);
    pub const SANDSTONE: MaterialId = MaterialId(14);
    pub const RED_SANDSTONE: MaterialId = MaterialId(15);
    pub const WATER: MaterialId = MaterialId(16);
    pub const LAVA: MaterialId = MaterialId(17);
    pub const SNOW: MaterialId = MaterialId(18);
    pub const ICE: MaterialId = MaterialId(19);
    pub const PACKED_ICE: MaterialId = MaterialId(20);
    pub const BLUE_ICE: MaterialId = MaterialId(21);
    pub const TERRACOTTA: MaterialId = MaterialId(22);
    pub const WHITE_TERRACOTTA: MaterialId = MaterialId(23);
    pub const ORANGE_TERRACOTTA: MaterialId = MaterialId(24);
    pub const MAGENTA_TERRACOTTA: MaterialId = MaterialId(25);
    pub const LIGHT_BLUE_TERRACOTTA: MaterialId = MaterialId(26);
    pub const YELLOW_TERRACOTTA: MaterialId = MaterialId(27);
    pub const LIME_TERRACOTTA: MaterialId = MaterialId(28);
    pub const PINK_TERRACOTTA: MaterialId = MaterialId(29);
    pub const GRAY_TERRACOTTA: MaterialId = MaterialId(30);
    pub const LIGHT_GRAY_TERRACOTTA: MaterialId = MaterialId(31);
    pub const CYAN_TERRACOTTA: MaterialId = MaterialId(32);
    pub const PURPLE_TERRACOTTA: MaterialId = MaterialId(33);
    pub const BLUE_TERRACOTTA: MaterialId = MaterialId(34);
    pub const BROWN_TERRACOTTA: MaterialId = MaterialId(35);
    pub const GREEN_TERRACOTTA: MaterialId = MaterialId(36);
    pub const RED_TERRACOTTA: MaterialId = MaterialId(37);
    pub const BLACK_TERRACOTTA: MaterialId = MaterialId(38);
    pub const FARMLAND: MaterialId = MaterialId(39);
    pub const GRASS_PATH: MaterialId = MaterialId(40);
    pub const OAK_LOG: MaterialId = MaterialId(41);
    pub const OAK_LEAVES: MaterialId = MaterialId(42);
    pub const OAK_PLANKS: MaterialId = MaterialId(43);
    pub const BEDROCK: MaterialId = MaterialId(44);

    /// The sixteen dyed terracotta variants, in dye order.
    pub const TERRACOTTA_COLORS: [MaterialId; 16] = [
        WHITE_TERRACOTTA,
        ORANGE_TERRACOTTA,
        MAGENTA_TERRACOTTA,
        LIGHT_BLUE_TERRACOTTA,
        YELLOW_TERRACOTTA,
        LIME_TERRACOTTA,
        PINK_TERRACOTTA,
        GRAY_TERRACOTTA,
        LIGHT_GRAY_TERRACOTTA,
        CYAN_TERRACOTTA,
        PURPLE_TERRACOTTA,
        BLUE_TERRACOTTA,
        BROWN_TERRACOTTA,
        GREEN_TERRACOTTA,
        RED_TERRACOTTA,
        BLACK_TERRACOTTA,
    ];

    /// Returns `true` for any of the sixteen dyed terracotta variants.
    pub fn is_dyed_terracotta(id: MaterialId) -> bool {
        TERRACOTTA_COLORS.contains(&id)
    }
}

use MaterialKind as K;

/// `(name, kind, color)` rows, indexed by the constants in [`builtin`].
const BUILTIN_TABLE: &[(&str, MaterialKind, [u8; 3])] = &[
    ("air", K::Air, [0, 0, 0]),
    ("cave_air", K::Air, [20, 20, 24]),
    ("stone", K::Stone, [125, 125, 125]),
    ("granite", K::Stone, [149, 103, 85]),
    ("diorite", K::Stone, [188, 188, 188]),
    ("andesite", K::Stone, [136, 136, 136]),
    ("dirt", K::Soil, [134, 96, 67]),
    ("coarse_dirt", K::Soil, [119, 85, 59]),
    ("podzol", K::Soil, [91, 63, 24]),
    ("grass_block", K::Soil, [95, 159, 53]),
    ("mycelium", K::Soil, [111, 99, 105]),
    ("sand", K::Sand, [219, 207, 163]),
    ("red_sand", K::Sand, [190, 102, 33]),
    ("gravel", K::Sand, [131, 127, 126]),
    ("sandstone", K::Stone, [216, 203, 155]),
    ("red_sandstone", K::Stone, [186, 99, 29]),
    ("water", K::Liquid, [44, 72, 201]),
    ("lava", K::Liquid, [207, 92, 20]),
    ("snow", K::Ice, [249, 254, 254]),
    ("ice", K::Ice, [145, 183, 253]),
    ("packed_ice", K::Ice, [141, 180, 250]),
    ("blue_ice", K::Ice, [116, 167, 253]),
    ("terracotta", K::Terracotta, [152, 94, 67]),
    ("white_terracotta", K::Terracotta, [209, 178, 161]),
    ("orange_terracotta", K::Terracotta, [161, 83, 37]),
    ("magenta_terracotta", K::Terracotta, [149, 88, 108]),
    ("light_blue_terracotta", K::Terracotta, [113, 108, 137]),
    ("yellow_terracotta", K::Terracotta, [186, 133, 35]),
    ("lime_terracotta", K::Terracotta, [103, 117, 52]),
    ("pink_terracotta", K::Terracotta, [161, 78, 78]),
    ("gray_terracotta", K::Terracotta, [57, 42, 35]),
    ("light_gray_terracotta", K::Terracotta, [135, 106, 97]),
    ("cyan_terracotta", K::Terracotta, [86, 91, 91]),
    ("purple_terracotta", K::Terracotta, [118, 70, 86]),
    ("blue_terracotta", K::Terracotta, [74, 59, 91]),
    ("brown_terracotta", K::Terracotta, [77, 51, 35]),
    ("green_terracotta", K::Terracotta, [76, 83, 42]),
    ("red_terracotta", K::Terracotta, [143, 61, 46]),
    ("black_terracotta", K::Terracotta, [37, 22, 16]),
    ("farmland", K::Constructed, [143, 102, 70]),
    ("grass_path", K::Constructed, [148, 122, 65]),
    ("oak_log", K::Wood, [109, 85, 50]),
    ("oak_leaves", K::Leaves, [60, 110, 30]),
    ("oak_planks", K::Wood, [162, 130, 78]),
    ("bedrock", K::Other, [85, 85, 85]),
];

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Maps [`MaterialId`] → [`MaterialDef`] with O(1) lookup by index and
/// O(1) reverse lookup by name.
#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    /// Dense array where `index == MaterialId.0`.
    defs: Vec<MaterialDef>,
    /// Reverse lookup: name → ID.
    name_to_id: FxHashMap<String, MaterialId>,
}

impl MaterialRegistry {
    /// Creates a registry holding every builtin material.
    pub fn new() -> Self {
        let mut defs = Vec::with_capacity(BUILTIN_TABLE.len());
        let mut name_to_id = FxHashMap::default();
        for (index, &(name, kind, color)) in BUILTIN_TABLE.iter().enumerate() {
            name_to_id.insert(name.to_string(), MaterialId(index as u16));
            defs.push(MaterialDef {
                name: name.to_string(),
                kind,
                color,
            });
        }
        Self { defs, name_to_id }
    }

    /// Registers a host-defined material and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a material with the same
    /// name already exists, or [`RegistryError::RegistryFull`] if all 65 536
    /// slots are consumed.
    pub fn register(&mut self, def: MaterialDef) -> Result<MaterialId, RegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if self.defs.len() > u16::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = MaterialId(self.defs.len() as u16);
        self.name_to_id.insert(def.name.clone(), id);
        self.defs.push(def);
        Ok(id)
    }

    /// Returns the definition for a given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range. IDs only come from the registry itself,
    /// so this indicates a programming error.
    pub fn get(&self, id: MaterialId) -> &MaterialDef {
        &self.defs[id.0 as usize]
    }

    /// Returns the ID for a named material, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<MaterialId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the classification of `id`. Unknown IDs classify as [`MaterialKind::Other`].
    pub fn kind(&self, id: MaterialId) -> MaterialKind {
        self.defs
            .get(id.0 as usize)
            .map_or(MaterialKind::Other, |def| def.kind)
    }

    /// Returns `true` for air and cave voids.
    pub fn is_air(&self, id: MaterialId) -> bool {
        self.kind(id) == MaterialKind::Air
    }

    /// Returns `true` for fluids.
    pub fn is_liquid(&self, id: MaterialId) -> bool {
        self.kind(id) == MaterialKind::Liquid
    }

    /// Returns `true` for tree trunks, planks and foliage.
    pub fn is_wood_or_leaves(&self, id: MaterialId) -> bool {
        matches!(self.kind(id), MaterialKind::Wood | MaterialKind::Leaves)
    }

    /// Returns the total number of registered materials (including Air).
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns `true` if the registry holds nothing but Air.
    pub fn is_empty(&self) -> bool {
        self.defs.len() <= 1
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn basalt_def() -> MaterialDef {
        MaterialDef {
            name: "basalt".to_string(),
            kind: MaterialKind::Stone,
            color: [70, 70, 75],
        }
    }

    #[test]
    fn test_air_is_id_zero() {
        let registry = MaterialRegistry::new();
        assert_eq!(registry.get(builtin::AIR).name, "air");
        assert!(registry.is_air(MaterialId(0)));
    }

    #[test]
    fn test_builtin_constants_match_names() {
        let registry = MaterialRegistry::new();
        let expected = [
            (builtin::CAVE_AIR, "cave_air"),
            (builtin::STONE, "stone"),
            (builtin::GRASS_BLOCK, "grass_block"),
            (builtin::RED_SANDSTONE, "red_sandstone"),
            (builtin::WATER, "water"),
            (builtin::BLUE_ICE, "blue_ice"),
            (builtin::WHITE_TERRACOTTA, "white_terracotta"),
            (builtin::BLACK_TERRACOTTA, "black_terracotta"),
            (builtin::GRASS_PATH, "grass_path"),
            (builtin::BEDROCK, "bedrock"),
        ];
        for (id, name) in expected {
            assert_eq!(registry.get(id).name, name, "constant for {name} is stale");
            assert_eq!(registry.lookup_by_name(name), Some(id));
        }
        assert_eq!(registry.len(), BUILTIN_TABLE.len());
    }

    #[test]
    fn test_terracotta_colors_are_terracotta_kind() {
        let registry = MaterialRegistry::new();
        for id in builtin::TERRACOTTA_COLORS {
            assert_eq!(registry.kind(id), MaterialKind::Terracotta);
            assert!(builtin::is_dyed_terracotta(id));
        }
        assert!(!builtin::is_dyed_terracotta(builtin::TERRACOTTA));
    }

    #[test]
    fn test_classification_queries() {
        let registry = MaterialRegistry::new();
        assert!(registry.is_air(builtin::CAVE_AIR));
        assert!(registry.is_liquid(builtin::WATER));
        assert!(registry.is_liquid(builtin::LAVA));
        assert!(!registry.is_liquid(builtin::ICE));
        assert!(registry.is_wood_or_leaves(builtin::OAK_LOG));
        assert!(registry.is_wood_or_leaves(builtin::OAK_LEAVES));
        assert!(!registry.is_wood_or_leaves(builtin::DIRT));
    }

    #[test]
    fn test_register_appends_after_builtins() {
        let mut registry = MaterialRegistry::new();
        let builtin_count = registry.len();
        let id = registry.register(basalt_def()).unwrap();
        assert_eq!(id, MaterialId(builtin_count as u16));
        assert_eq!(registry.kind(id), MaterialKind::Stone);
        assert_eq!(registry.lookup_by_name("basalt"), Some(id));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = MaterialRegistry::new();
        registry.register(basalt_def()).unwrap();
        let result = registry.register(basalt_def());
        assert!(matches!(result, Err(RegistryError::DuplicateName(_))));

        let builtin_clash = registry.register(MaterialDef {
            name: "stone".to_string(),
            kind: MaterialKind::Stone,
            color: [0, 0, 0],
        });
        assert!(matches!(builtin_clash, Err(RegistryError::DuplicateName(_))));
    }

    #[test]
    fn test_unknown_id_classifies_as_other() {
        let registry = MaterialRegistry::new();
        assert_eq!(registry.kind(MaterialId(u16::MAX)), MaterialKind::Other);
        assert!(!registry.is_air(MaterialId(u16::MAX)));
    }
}
